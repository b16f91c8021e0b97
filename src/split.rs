//! Split calculation: partitions an expense total among participants
//! according to a [`SplitPolicy`].
//!
//! Every function here is pure. Persistence lookups, membership checks and
//! the non-empty participant list are the orchestrator's job; this module
//! only does arithmetic and the numeric invariants that go with it.

use crate::constants::SPLIT_TOLERANCE;
use crate::error::FairsplitError;
use crate::models::expense::SplitPolicy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-participant input. Which optional field is required depends on the
/// policy: `amount` for exact, `percentage` for percentage, `shares` for
/// shares. Equal needs only the user id.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ParticipantSpec {
    pub user_id: Uuid,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub shares: Option<u32>,
}

/// One computed share, in input order. `percentage`/`shares` echo the
/// inputs that produced the amount so the rows record which policy applied.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ComputedSplit {
    pub user_id: Uuid,
    pub amount: f64,
    pub percentage: Option<f64>,
    pub shares: Option<u32>,
}

/// Partition `total_amount` among `participants` under `policy`.
///
/// Deterministic and order-preserving: the same input always yields the
/// same output list.
pub fn calculate_splits(
    total_amount: f64,
    policy: SplitPolicy,
    participants: &[ParticipantSpec],
) -> Result<Vec<ComputedSplit>, FairsplitError> {
    match policy {
        SplitPolicy::Equal => split_equal(total_amount, participants),
        SplitPolicy::Exact => split_exact(total_amount, participants),
        SplitPolicy::Percentage => split_percentage(total_amount, participants),
        SplitPolicy::Shares => split_shares(total_amount, participants),
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every participant gets the identical rounded share. The rounding
/// remainder is NOT redistributed, so the sum of shares can drift from the
/// total by up to (n-1) cents.
fn split_equal(
    total_amount: f64,
    participants: &[ParticipantSpec],
) -> Result<Vec<ComputedSplit>, FairsplitError> {
    let share = round_to_cents(total_amount / participants.len() as f64);
    Ok(participants
        .iter()
        .map(|p| ComputedSplit {
            user_id: p.user_id,
            amount: share,
            percentage: None,
            shares: None,
        })
        .collect())
}

fn split_exact(
    total_amount: f64,
    participants: &[ParticipantSpec],
) -> Result<Vec<ComputedSplit>, FairsplitError> {
    let amounts: Vec<f64> = participants
        .iter()
        .map(|p| p.amount)
        .collect::<Option<_>>()
        .ok_or(FairsplitError::MissingExactAmounts)?;

    let sum: f64 = amounts.iter().sum();
    if (sum - total_amount).abs() > SPLIT_TOLERANCE {
        return Err(FairsplitError::SplitAmountMismatch {
            actual: sum,
            expected: total_amount,
        });
    }

    Ok(participants
        .iter()
        .zip(amounts)
        .map(|(p, amount)| ComputedSplit {
            user_id: p.user_id,
            amount,
            percentage: None,
            shares: None,
        })
        .collect())
}

fn split_percentage(
    total_amount: f64,
    participants: &[ParticipantSpec],
) -> Result<Vec<ComputedSplit>, FairsplitError> {
    let percentages: Vec<f64> = participants
        .iter()
        .map(|p| p.percentage)
        .collect::<Option<_>>()
        .ok_or(FairsplitError::MissingPercentages)?;

    let sum: f64 = percentages.iter().sum();
    if (sum - 100.0).abs() > SPLIT_TOLERANCE {
        return Err(FairsplitError::SplitPercentageMismatch(sum));
    }

    Ok(participants
        .iter()
        .zip(percentages)
        .map(|(p, percentage)| ComputedSplit {
            user_id: p.user_id,
            amount: round_to_cents(total_amount * percentage / 100.0),
            percentage: Some(percentage),
            shares: None,
        })
        .collect())
}

fn split_shares(
    total_amount: f64,
    participants: &[ParticipantSpec],
) -> Result<Vec<ComputedSplit>, FairsplitError> {
    let shares: Vec<u32> = participants
        .iter()
        .map(|p| p.shares)
        .collect::<Option<_>>()
        .ok_or(FairsplitError::MissingShares)?;

    let total_shares: u32 = shares.iter().sum();
    if total_shares == 0 {
        return Err(FairsplitError::ZeroTotalShares);
    }

    Ok(participants
        .iter()
        .zip(shares)
        .map(|(p, share)| ComputedSplit {
            user_id: p.user_id,
            amount: round_to_cents(total_amount * share as f64 / total_shares as f64),
            percentage: None,
            shares: Some(share),
        })
        .collect())
}
