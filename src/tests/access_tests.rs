use crate::access::{
    ExpenseAccessContext, can_delete, can_toggle_settlement, can_update, can_view,
};
use uuid::Uuid;

#[test]
fn payer_has_full_access() {
    let ctx = ExpenseAccessContext {
        is_payer: true,
        ..Default::default()
    };
    assert!(can_view(&ctx));
    assert!(can_update(&ctx));
    assert!(can_delete(&ctx));
}

#[test]
fn participant_can_view_and_update_but_not_delete() {
    let ctx = ExpenseAccessContext {
        is_participant: true,
        ..Default::default()
    };
    assert!(can_view(&ctx));
    assert!(can_update(&ctx));
    assert!(!can_delete(&ctx));
}

#[test]
fn plain_group_member_cannot_delete() {
    let ctx = ExpenseAccessContext {
        is_group_expense: true,
        is_group_member: true,
        ..Default::default()
    };
    assert!(can_view(&ctx));
    assert!(can_update(&ctx));
    assert!(!can_delete(&ctx));
}

#[test]
fn group_admin_can_delete() {
    let ctx = ExpenseAccessContext {
        is_group_expense: true,
        is_group_member: true,
        is_group_admin: true,
        ..Default::default()
    };
    assert!(can_delete(&ctx));
}

#[test]
fn outsider_has_no_access() {
    let ctx = ExpenseAccessContext::default();
    assert!(!can_view(&ctx));
    assert!(!can_update(&ctx));
    assert!(!can_delete(&ctx));
}

#[test]
fn group_membership_is_irrelevant_for_personal_expenses() {
    // A membership fact without a group expense grants nothing.
    let ctx = ExpenseAccessContext {
        is_group_expense: false,
        is_group_member: true,
        is_group_admin: true,
        ..Default::default()
    };
    assert!(!can_view(&ctx));
    assert!(!can_delete(&ctx));
}

#[test]
fn settlement_toggles_for_ower_and_payer_only() {
    let ower = Uuid::new_v4();
    let payer = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    assert!(can_toggle_settlement(ower, ower, payer));
    assert!(can_toggle_settlement(payer, ower, payer));
    assert!(!can_toggle_settlement(stranger, ower, payer));
}
