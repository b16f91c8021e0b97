use crate::error::FairsplitError;
use crate::models::{Expense, ExpenseSplit, Group, User};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Reference store backing tests and the demo server. Expense writes take
/// the `expenses` and `splits` locks together (always in that order) so an
/// expense and its split rows change as one unit.
pub struct InMemoryStorage {
    users: Mutex<HashMap<Uuid, User>>,
    emails: Mutex<HashMap<String, Uuid>>, // email -> user_id
    groups: Mutex<HashMap<Uuid, Group>>,
    expenses: Mutex<HashMap<Uuid, Expense>>,
    splits: Mutex<HashMap<Uuid, Vec<ExpenseSplit>>>, // expense_id -> rows
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            groups: Mutex::new(HashMap::new()),
            expenses: Mutex::new(HashMap::new()),
            splits: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, FairsplitError> {
        let mut emails = self.emails.lock().await;
        if emails.contains_key(&user.email) {
            return Err(FairsplitError::EmailAlreadyRegistered(user.email));
        }
        emails.insert(user.email.clone(), user.id);
        let mut users = self.users.lock().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, FairsplitError> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), FairsplitError> {
        self.groups.lock().await.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, FairsplitError> {
        Ok(self.groups.lock().await.get(&group_id).cloned())
    }

    async fn create_expense_with_splits(
        &self,
        expense: Expense,
        splits: Vec<ExpenseSplit>,
    ) -> Result<(), FairsplitError> {
        let mut expenses = self.expenses.lock().await;
        let mut all_splits = self.splits.lock().await;
        all_splits.insert(expense.id, splits);
        expenses.insert(expense.id, expense);
        Ok(())
    }

    async fn update_expense_with_splits(
        &self,
        expense: Expense,
        splits: Option<Vec<ExpenseSplit>>,
    ) -> Result<(), FairsplitError> {
        let mut expenses = self.expenses.lock().await;
        let mut all_splits = self.splits.lock().await;
        if !expenses.contains_key(&expense.id) {
            return Err(FairsplitError::ExpenseNotFound(expense.id));
        }
        if let Some(rows) = splits {
            all_splits.insert(expense.id, rows);
        }
        expenses.insert(expense.id, expense);
        Ok(())
    }

    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, FairsplitError> {
        Ok(self.expenses.lock().await.get(&expense_id).cloned())
    }

    async fn get_splits(&self, expense_id: Uuid) -> Result<Vec<ExpenseSplit>, FairsplitError> {
        Ok(self
            .splits
            .lock()
            .await
            .get(&expense_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_split(
        &self,
        expense_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ExpenseSplit>, FairsplitError> {
        Ok(self
            .splits
            .lock()
            .await
            .get(&expense_id)
            .and_then(|rows| rows.iter().find(|s| s.user_id == user_id).cloned()))
    }

    async fn save_split(&self, split: ExpenseSplit) -> Result<(), FairsplitError> {
        let mut all_splits = self.splits.lock().await;
        let rows = all_splits
            .get_mut(&split.expense_id)
            .ok_or(FairsplitError::ExpenseNotFound(split.expense_id))?;
        let row = rows
            .iter_mut()
            .find(|s| s.user_id == split.user_id)
            .ok_or(FairsplitError::SplitNotFound {
                expense_id: split.expense_id,
                user_id: split.user_id,
            })?;
        *row = split;
        Ok(())
    }

    async fn delete_expense(&self, expense_id: Uuid) -> Result<(), FairsplitError> {
        let mut expenses = self.expenses.lock().await;
        let mut all_splits = self.splits.lock().await;
        expenses.remove(&expense_id);
        all_splits.remove(&expense_id);
        Ok(())
    }

    async fn list_group_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, FairsplitError> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .lock()
            .await
            .values()
            .filter(|e| e.group_id == Some(group_id))
            .cloned()
            .collect();
        expenses.sort_by_key(|e| e.created_at);
        Ok(expenses)
    }
}
