/// Absolute tolerance used when reconciling split sums against an expense
/// total. Amounts are cents-precision, so anything under a cent is noise.
pub const SPLIT_TOLERANCE: f64 = 0.01;

pub const MAX_AMOUNT: f64 = 999_999.99;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 100;

// Audit log action names.
pub const USER_CREATED: &str = "user_created";
pub const GROUP_CREATED: &str = "group_created";
pub const MEMBER_ADDED: &str = "member_added";
pub const EXPENSE_CREATED: &str = "expense_created";
pub const EXPENSE_UPDATED: &str = "expense_updated";
pub const EXPENSE_DELETED: &str = "expense_deleted";
pub const SPLIT_SETTLED: &str = "split_settled";
pub const SPLIT_UNSETTLED: &str = "split_unsettled";
