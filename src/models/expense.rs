use super::expense_split::ExpenseSplit;
use crate::error::FairsplitError;
use crate::split::ParticipantSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// How a total is partitioned among participants. Request-time parameter
/// only; the resulting split rows record its effect via their
/// `percentage`/`shares` fields.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    Equal,
    Exact,
    Percentage,
    Shares,
}

impl FromStr for SplitPolicy {
    type Err = FairsplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(SplitPolicy::Equal),
            "exact" => Ok(SplitPolicy::Exact),
            "percentage" => Ok(SplitPolicy::Percentage),
            "shares" => Ok(SplitPolicy::Shares),
            other => Err(FairsplitError::UnsupportedSplitPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SplitPolicy::Equal => "equal",
            SplitPolicy::Exact => "exact",
            SplitPolicy::Percentage => "percentage",
            SplitPolicy::Shares => "shares",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Accommodation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Education,
    #[default]
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    /// 3-letter uppercase code. One currency per expense.
    pub currency: String,
    pub date: DateTime<Utc>,
    /// The user who fronted the money. Never null.
    pub paid_by: Uuid,
    /// Absent means a personal/peer expense outside any group.
    pub group_id: Option<Uuid>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An expense together with its split rows, as served to clients.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseDetail {
    pub expense: Expense,
    pub splits: Vec<ExpenseSplit>,
}

/// Input for expense creation. `date` defaults to now, `category` to
/// `other`.
#[derive(Clone, Debug, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub paid_by: Uuid,
    pub group_id: Option<Uuid>,
    pub policy: SplitPolicy,
    pub participants: Vec<ParticipantSpec>,
}

/// Replacement split configuration for an update. Splits are recreated
/// wholesale; there is no per-row patching.
#[derive(Clone, Debug, Deserialize)]
pub struct SplitUpdate {
    pub policy: SplitPolicy,
    pub participants: Vec<ParticipantSpec>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub split: Option<SplitUpdate>,
}
