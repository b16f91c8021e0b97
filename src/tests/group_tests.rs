use super::{add_test_user, create_test_service};
use crate::error::FairsplitError;
use crate::models::Role;
use uuid::Uuid;

#[tokio::test]
async fn creator_becomes_admin_member() {
    let service = create_test_service();
    let alice = add_test_user(&service, "Alice").await;
    let bob = add_test_user(&service, "Bob").await;

    let group = service
        .create_group("Flat".to_string(), vec![bob.id], &alice)
        .await
        .unwrap();

    assert_eq!(group.created_by, alice.id);
    assert_eq!(group.members.len(), 2);
    let creator_row = group
        .members
        .iter()
        .find(|m| m.user_id == alice.id)
        .unwrap();
    assert_eq!(creator_row.role, Role::Admin);
    assert!(group.is_admin(alice.id));
    assert!(group.is_member(bob.id));
    assert!(!group.is_admin(bob.id));
}

#[tokio::test]
async fn create_group_rejects_unknown_members() {
    let service = create_test_service();
    let alice = add_test_user(&service, "Alice").await;

    let ghost = Uuid::new_v4();
    let err = service
        .create_group("Flat".to_string(), vec![ghost], &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, FairsplitError::UserNotFound(id) if id == ghost));
}

#[tokio::test]
async fn admin_can_add_members() {
    let service = create_test_service();
    let alice = add_test_user(&service, "Alice").await;
    let bob = add_test_user(&service, "Bob").await;

    let group = service
        .create_group("Flat".to_string(), vec![], &alice)
        .await
        .unwrap();
    service.add_member(group.id, bob.id, &alice).await.unwrap();

    let group = service.get_group(group.id).await.unwrap().unwrap();
    assert!(group.is_member(bob.id));
}

#[tokio::test]
async fn non_admin_cannot_add_members() {
    let service = create_test_service();
    let alice = add_test_user(&service, "Alice").await;
    let bob = add_test_user(&service, "Bob").await;
    let carol = add_test_user(&service, "Carol").await;

    let group = service
        .create_group("Flat".to_string(), vec![bob.id], &alice)
        .await
        .unwrap();

    let err = service.add_member(group.id, carol.id, &bob).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Access denied: Only a group admin can modify group membership"
    );
}

#[tokio::test]
async fn adding_an_existing_member_conflicts() {
    let service = create_test_service();
    let alice = add_test_user(&service, "Alice").await;
    let bob = add_test_user(&service, "Bob").await;

    let group = service
        .create_group("Flat".to_string(), vec![bob.id], &alice)
        .await
        .unwrap();

    let err = service.add_member(group.id, bob.id, &alice).await.unwrap_err();
    assert!(matches!(err, FairsplitError::AlreadyGroupMember(id) if id == bob.id));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let service = create_test_service();
    service
        .create_user("Alice".to_string(), "alice@example.com".to_string())
        .await
        .unwrap();

    let err = service
        .create_user("Alice Again".to_string(), "alice@example.com".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email alice@example.com already registered");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let service = create_test_service();
    let err = service
        .create_user("Alice".to_string(), "not-an-email".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, FairsplitError::InvalidEmail(_)));
}
