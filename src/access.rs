//! Authorization predicates for expenses and their splits.
//!
//! The predicates are pure functions over plain relationship facts. The
//! orchestrator gathers the facts from storage into an
//! [`ExpenseAccessContext`] and passes it in, so the rules stay testable
//! without a store.

use uuid::Uuid;

/// The caller's relationships to one expense, as seen by the guard.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpenseAccessContext {
    /// Caller fronted the money for the expense.
    pub is_payer: bool,
    /// Caller holds a split on the expense.
    pub is_participant: bool,
    /// Expense belongs to a group (as opposed to a personal expense).
    pub is_group_expense: bool,
    /// Caller is the group's creator or a listed member.
    pub is_group_member: bool,
    /// Caller is the group's creator or a member with the admin role.
    pub is_group_admin: bool,
}

/// Payer, participant, or any member of the owning group may view.
pub fn can_view(ctx: &ExpenseAccessContext) -> bool {
    ctx.is_payer || ctx.is_participant || (ctx.is_group_expense && ctx.is_group_member)
}

/// Update reachability is identical to view reachability.
pub fn can_update(ctx: &ExpenseAccessContext) -> bool {
    can_view(ctx)
}

/// Deletion is stricter: only the payer or a group admin. Plain
/// membership or participation is not enough.
pub fn can_delete(ctx: &ExpenseAccessContext) -> bool {
    ctx.is_payer || (ctx.is_group_expense && ctx.is_group_admin)
}

/// Settlement may be toggled by the split's ower or the expense's payer,
/// in both directions. There is no terminal state; mistaken settlements
/// are corrected by flipping back.
pub fn can_toggle_settlement(actor_id: Uuid, split_user_id: Uuid, paid_by: Uuid) -> bool {
    actor_id == split_user_id || actor_id == paid_by
}
