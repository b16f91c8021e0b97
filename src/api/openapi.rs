use utoipa::OpenApi;

use crate::api::models::{
    AddMemberRequest, CreateExpenseRequest, CreateGroupRequest, CreateUserRequest,
    DeleteExpenseRequest, ErrorResponse, ListGroupExpensesRequest, SettleSplitRequest,
    SplitUpdateRequest, UnsettleSplitRequest, UpdateExpenseRequest, ViewExpenseRequest,
};
use crate::models::{Category, Expense, ExpenseDetail, ExpenseSplit, Group, GroupMember, Role, SplitPolicy, User};
use crate::split::{ComputedSplit, ParticipantSpec};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_member,
        super::handlers::list_group_expenses,
        super::handlers::create_expense,
        super::handlers::view_expense,
        super::handlers::update_expense,
        super::handlers::delete_expense,
        super::handlers::settle_split,
        super::handlers::unsettle_split,
        super::handlers::get_audit_logs
    ),
    components(schemas(
        CreateUserRequest,
        CreateGroupRequest,
        AddMemberRequest,
        CreateExpenseRequest,
        ViewExpenseRequest,
        UpdateExpenseRequest,
        SplitUpdateRequest,
        DeleteExpenseRequest,
        SettleSplitRequest,
        UnsettleSplitRequest,
        ListGroupExpensesRequest,
        ErrorResponse,
        User,
        Group,
        GroupMember,
        Role,
        Expense,
        ExpenseDetail,
        ExpenseSplit,
        Category,
        SplitPolicy,
        ParticipantSpec,
        ComputedSplit
    ))
)]
pub struct ApiDoc;
