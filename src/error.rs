use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Domain errors for the expense-splitting service.
///
/// Variants fall into four groups, which the API layer maps to status
/// classes: malformed or numerically inconsistent input (400), access
/// denials (403), missing resources (404), and infrastructure failures
/// (500). Message text is stable; callers match on it.
#[derive(Error, Debug, Serialize)]
pub enum FairsplitError {
    // --- Validation ---
    /// Expense description is empty or whitespace
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// Expense description exceeds the storage limit
    #[error("Description cannot exceed {0} characters")]
    DescriptionTooLong(usize),

    /// Amount is zero or negative
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    /// Amount is NaN or infinite
    #[error("Amount must be a finite number")]
    NonFiniteAmount,

    /// Amount exceeds the per-expense ceiling
    #[error("Amount cannot exceed {0}")]
    AmountTooLarge(f64),

    /// Currency is not a 3-letter uppercase code
    #[error("Currency must be a 3-letter uppercase code: {0}")]
    InvalidCurrency(String),

    /// Expense date lies in the future
    #[error("Expense date cannot be in the future")]
    DateInFuture,

    /// Split request carried no participants
    #[error("At least one participant is required")]
    NoParticipants,

    /// Same user listed twice in one split request
    #[error("Duplicate participant {0} in split list")]
    DuplicateParticipant(Uuid),

    /// Exact split where some participant has no amount
    #[error("All participants must have exact amounts specified")]
    MissingExactAmounts,

    /// Percentage split where some participant has no percentage
    #[error("All participants must have percentages specified")]
    MissingPercentages,

    /// Shares split where some participant has no share count
    #[error("All participants must have shares specified")]
    MissingShares,

    /// Exact split amounts do not reconcile with the expense total
    #[error("Split amounts ({actual}) do not equal total amount ({expected})")]
    SplitAmountMismatch { actual: f64, expected: f64 },

    /// Percentages do not sum to 100
    #[error("Split percentages ({0}%) do not equal 100%")]
    SplitPercentageMismatch(f64),

    /// Shares split where every share count is zero
    #[error("Total shares cannot be zero")]
    ZeroTotalShares,

    /// Split type string did not parse to a known policy
    #[error("Unsupported split type: {0}")]
    UnsupportedSplitPolicy(String),

    /// Some listed participant does not exist as a user
    #[error("One or more participants are invalid users")]
    InvalidParticipants,

    /// Participant (or payer) of a group expense is outside the group
    #[error("User {0} is not a member of the group")]
    ParticipantNotInGroup(Uuid),

    /// Amount changed on update without a replacement split configuration
    #[error("Split details are required when the amount changes")]
    SplitRequiredForAmountChange,

    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name cannot exceed {0} characters")]
    NameTooLong(usize),

    // --- Authorization ---
    /// Caller is not a member of the group an expense belongs to
    #[error("Access denied: You are not a member of this group")]
    NotGroupMember,

    #[error("Access denied: You do not have permission to view this expense")]
    ViewDenied,

    #[error("Access denied: You do not have permission to update this expense")]
    UpdateDenied,

    /// Deletion requires the payer or a group admin
    #[error("Access denied: Only the payer or group admin can delete this expense")]
    DeleteDenied,

    #[error("Access denied: You can only settle your own splits or splits owed to you")]
    SettleDenied,

    #[error("Access denied: You can only unsettle your own splits or splits owed to you")]
    UnsettleDenied,

    /// Group membership changes require an admin
    #[error("Access denied: Only a group admin can modify group membership")]
    GroupMembershipDenied,

    // --- Not found / conflicts ---
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Group {0} not found")]
    GroupNotFound(Uuid),

    #[error("Expense {0} not found")]
    ExpenseNotFound(Uuid),

    #[error("Split for user {user_id} on expense {expense_id} not found")]
    SplitNotFound { expense_id: Uuid, user_id: Uuid },

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("User {0} is already a group member")]
    AlreadyGroupMember(Uuid),

    #[error("Split is already settled")]
    AlreadySettled,

    #[error("Split is not settled")]
    NotSettled,

    // --- Infrastructure ---
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}
