use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One participant's share of an expense. Created and replaced in a batch
/// with the parent expense; `settled` is the only field that mutates
/// independently.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseSplit {
    pub expense_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    /// Set when the split was produced by a percentage policy.
    pub percentage: Option<f64>,
    /// Set when the split was produced by a shares policy.
    pub shares: Option<u32>,
    pub settled: bool,
    pub created_at: DateTime<Utc>,
}
