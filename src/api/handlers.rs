use crate::api::models::*;
use crate::error::FairsplitError;
use crate::logger::in_memory::InMemoryAuditLogger;
use crate::models::{
    AuditLogEntry, ExpenseDetail, ExpenseSplit, ExpenseUpdate, Group, NewExpense, SplitUpdate,
    User,
};
use crate::notifier::in_memory::InMemoryNotifier;
use crate::service::ExpenseService;
use crate::storage::in_memory::InMemoryStorage;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;
use uuid::Uuid;

type AppService = Arc<ExpenseService<InMemoryStorage, InMemoryAuditLogger, InMemoryNotifier>>;

pub fn api_routes(service: AppService) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/expenses/query", post(list_group_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/{expense_id}/view", post(view_expense))
        .route("/expenses/{expense_id}/update", post(update_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
        .route("/expenses/{expense_id}/splits/settle", post(settle_split))
        .route("/expenses/{expense_id}/splits/unsettle", post(unsettle_split))
        .route("/logs", get(get_audit_logs))
        .with_state(service)
}

async fn resolve_user(service: &AppService, user_id: Uuid) -> Result<User, ApiError> {
    Ok(service
        .get_user(user_id)
        .await?
        .ok_or(FairsplitError::UserNotFound(user_id))?)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid name or email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(service): State<AppService>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.create_user(req.name, req.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_user(
    State(service): State<AppService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = resolve_user(&service, user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 404, description = "Creator or member not found", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<AppService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let created_by = resolve_user(&service, req.created_by_id).await?;
    let group = service
        .create_group(req.name, req.member_ids, &created_by)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .get_group(group_id)
        .await?
        .ok_or(FairsplitError::GroupNotFound(group_id))?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added"),
        (status = 403, description = "Caller is not a group admin", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    )
)]
pub(crate) async fn add_member(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<StatusCode, ApiError> {
    let added_by = resolve_user(&service, req.added_by_id).await?;
    service.add_member(group_id, req.user_id, &added_by).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses/query",
    request_body = ListGroupExpensesRequest,
    responses(
        (status = 200, description = "Expenses in the group", body = [ExpenseDetail]),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse)
    )
)]
pub(crate) async fn list_group_expenses(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<ListGroupExpensesRequest>,
) -> Result<Json<Vec<ExpenseDetail>>, ApiError> {
    let requested_by = resolve_user(&service, req.requested_by_id).await?;
    let details = service.list_group_expenses(group_id, &requested_by).await?;
    Ok(Json(details))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Expense created with its splits", body = ExpenseDetail),
        (status = 400, description = "Invalid split input", body = ErrorResponse),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse)
    )
)]
pub(crate) async fn create_expense(
    State(service): State<AppService>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseDetail>, ApiError> {
    let created_by = resolve_user(&service, req.created_by_id).await?;
    let policy = req.split_type.parse()?;
    let new = NewExpense {
        description: req.description,
        amount: req.amount,
        currency: req.currency,
        date: req.date,
        category: req.category,
        paid_by: req.paid_by_id,
        group_id: req.group_id,
        policy,
        participants: req.participants,
    };
    let detail = service.create_expense(new, &created_by).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/expenses/{expense_id}/view",
    request_body = ViewExpenseRequest,
    responses(
        (status = 200, description = "Expense with its splits", body = ExpenseDetail),
        (status = 403, description = "No view permission", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn view_expense(
    State(service): State<AppService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<ViewExpenseRequest>,
) -> Result<Json<ExpenseDetail>, ApiError> {
    let requested_by = resolve_user(&service, req.requested_by_id).await?;
    let detail = service.get_expense(expense_id, &requested_by).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/expenses/{expense_id}/update",
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Updated expense with its splits", body = ExpenseDetail),
        (status = 400, description = "Invalid split input", body = ErrorResponse),
        (status = 403, description = "No update permission", body = ErrorResponse)
    )
)]
pub(crate) async fn update_expense(
    State(service): State<AppService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseDetail>, ApiError> {
    let updated_by = resolve_user(&service, req.updated_by_id).await?;
    let split = match req.split {
        Some(s) => Some(SplitUpdate {
            policy: s.split_type.parse()?,
            participants: s.participants,
        }),
        None => None,
    };
    let update = ExpenseUpdate {
        description: req.description,
        amount: req.amount,
        currency: req.currency,
        date: req.date,
        category: req.category,
        split,
    };
    let detail = service.update_expense(expense_id, update, &updated_by).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    request_body = DeleteExpenseRequest,
    responses(
        (status = 200, description = "Expense and its splits deleted"),
        (status = 403, description = "Only the payer or group admin may delete", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_expense(
    State(service): State<AppService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<DeleteExpenseRequest>,
) -> Result<StatusCode, ApiError> {
    let deleted_by = resolve_user(&service, req.deleted_by_id).await?;
    service.delete_expense(expense_id, &deleted_by).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/expenses/{expense_id}/splits/settle",
    request_body = SettleSplitRequest,
    responses(
        (status = 200, description = "Split settled", body = ExpenseSplit),
        (status = 403, description = "Not the ower or the payer", body = ErrorResponse),
        (status = 409, description = "Already settled", body = ErrorResponse)
    )
)]
pub(crate) async fn settle_split(
    State(service): State<AppService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<SettleSplitRequest>,
) -> Result<Json<ExpenseSplit>, ApiError> {
    let settled_by = resolve_user(&service, req.settled_by_id).await?;
    let split = service
        .settle_split(expense_id, req.user_id, &settled_by)
        .await?;
    Ok(Json(split))
}

#[utoipa::path(
    post,
    path = "/api/expenses/{expense_id}/splits/unsettle",
    request_body = UnsettleSplitRequest,
    responses(
        (status = 200, description = "Split reverted to unsettled", body = ExpenseSplit),
        (status = 403, description = "Not the ower or the payer", body = ErrorResponse),
        (status = 409, description = "Split is not settled", body = ErrorResponse)
    )
)]
pub(crate) async fn unsettle_split(
    State(service): State<AppService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<UnsettleSplitRequest>,
) -> Result<Json<ExpenseSplit>, ApiError> {
    let unsettled_by = resolve_user(&service, req.unsettled_by_id).await?;
    let split = service
        .unsettle_split(expense_id, req.user_id, &unsettled_by)
        .await?;
    Ok(Json(split))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Audit log entries"))
)]
pub(crate) async fn get_audit_logs(
    State(service): State<AppService>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let logs = service.get_audit_logs().await?;
    Ok(Json(logs))
}
