use crate::error::FairsplitError;
use crate::models::Category;
use crate::split::ParticipantSpec;
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub member_ids: Vec<Uuid>,
    pub created_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub added_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub paid_by_id: Uuid,
    pub group_id: Option<Uuid>,
    /// One of: equal, exact, percentage, shares.
    pub split_type: String,
    pub participants: Vec<ParticipantSpec>,
    pub created_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct ViewExpenseRequest {
    pub requested_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct SplitUpdateRequest {
    pub split_type: String,
    pub participants: Vec<ParticipantSpec>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub split: Option<SplitUpdateRequest>,
    pub updated_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteExpenseRequest {
    pub deleted_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct SettleSplitRequest {
    pub user_id: Uuid,
    pub settled_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct UnsettleSplitRequest {
    pub user_id: Uuid,
    pub unsettled_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct ListGroupExpensesRequest {
    pub requested_by_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Newtype wrapper so domain errors can implement `IntoResponse`.
pub struct ApiError(pub FairsplitError);

impl From<FairsplitError> for ApiError {
    fn from(err: FairsplitError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use FairsplitError::*;
        let status = match &self.0 {
            EmptyDescription
            | DescriptionTooLong(_)
            | NonPositiveAmount
            | NonFiniteAmount
            | AmountTooLarge(_)
            | InvalidCurrency(_)
            | DateInFuture
            | NoParticipants
            | DuplicateParticipant(_)
            | MissingExactAmounts
            | MissingPercentages
            | MissingShares
            | SplitAmountMismatch { .. }
            | SplitPercentageMismatch(_)
            | ZeroTotalShares
            | UnsupportedSplitPolicy(_)
            | InvalidParticipants
            | ParticipantNotInGroup(_)
            | SplitRequiredForAmountChange
            | MissingEmail
            | InvalidEmail(_)
            | EmptyName
            | NameTooLong(_) => StatusCode::BAD_REQUEST,

            NotGroupMember | ViewDenied | UpdateDenied | DeleteDenied | SettleDenied
            | UnsettleDenied | GroupMembershipDenied => StatusCode::FORBIDDEN,

            UserNotFound(_) | GroupNotFound(_) | ExpenseNotFound(_) | SplitNotFound { .. } => {
                StatusCode::NOT_FOUND
            }

            EmailAlreadyRegistered(_) | AlreadyGroupMember(_) | AlreadySettled | NotSettled => {
                StatusCode::CONFLICT
            }

            StorageError(_) | LoggingError(_) | NotificationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
