mod access_tests;
mod group_tests;
mod split_tests;

use crate::logger::in_memory::InMemoryAuditLogger;
use crate::models::User;
use crate::notifier::in_memory::InMemoryNotifier;
use crate::service::ExpenseService;
use crate::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> ExpenseService<InMemoryStorage, InMemoryAuditLogger, InMemoryNotifier>
{
    ExpenseService::new(
        InMemoryStorage::new(),
        InMemoryAuditLogger::new(),
        InMemoryNotifier::new(),
    )
}

pub async fn add_test_user<S, L, N>(service: &ExpenseService<S, L, N>, name: &str) -> User
where
    S: crate::storage::Storage,
    L: crate::logger::AuditLogger,
    N: crate::notifier::Notifier,
{
    service
        .create_user(name.to_string(), format!("{}@example.com", name.to_lowercase()))
        .await
        .unwrap()
}
