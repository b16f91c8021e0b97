use crate::error::FairsplitError;
use crate::models::{Expense, ExpenseSplit, Group, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for the expense service.
///
/// `create_expense_with_splits` and `update_expense_with_splits` must be
/// all-or-nothing: an expense is never visible with stale or missing split
/// rows. Deleting an expense cascades to its splits.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, FairsplitError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, FairsplitError>;

    async fn save_group(&self, group: Group) -> Result<(), FairsplitError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, FairsplitError>;

    async fn create_expense_with_splits(
        &self,
        expense: Expense,
        splits: Vec<ExpenseSplit>,
    ) -> Result<(), FairsplitError>;

    /// Replace the expense row and, when `splits` is `Some`, all its split
    /// rows in one atomic step.
    async fn update_expense_with_splits(
        &self,
        expense: Expense,
        splits: Option<Vec<ExpenseSplit>>,
    ) -> Result<(), FairsplitError>;

    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, FairsplitError>;
    async fn get_splits(&self, expense_id: Uuid) -> Result<Vec<ExpenseSplit>, FairsplitError>;
    async fn get_split(
        &self,
        expense_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ExpenseSplit>, FairsplitError>;
    async fn save_split(&self, split: ExpenseSplit) -> Result<(), FairsplitError>;

    async fn delete_expense(&self, expense_id: Uuid) -> Result<(), FairsplitError>;
    async fn list_group_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, FairsplitError>;
}

pub mod in_memory;
