pub mod audit;
pub mod expense;
pub mod expense_split;
pub mod group;
pub mod user;

pub use audit::AuditLogEntry;
pub use expense::{Category, Expense, ExpenseDetail, ExpenseUpdate, NewExpense, SplitPolicy, SplitUpdate};
pub use expense_split::ExpenseSplit;
pub use group::{Group, GroupMember, Role};
pub use user::User;
