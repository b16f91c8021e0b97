use crate::access::{self, ExpenseAccessContext};
use crate::constants::{
    EXPENSE_CREATED, EXPENSE_DELETED, EXPENSE_UPDATED, GROUP_CREATED, MAX_AMOUNT,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MEMBER_ADDED, SPLIT_SETTLED, SPLIT_UNSETTLED,
    USER_CREATED,
};
use crate::error::FairsplitError;
use crate::logger::AuditLogger;
use crate::models::{
    AuditLogEntry, Expense, ExpenseDetail, ExpenseSplit, ExpenseUpdate, Group, GroupMember,
    NewExpense, Role, User,
};
use crate::notifier::{ExpenseEvent, Notifier};
use crate::split::{ComputedSplit, ParticipantSpec, calculate_splits};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Orchestrates expense mutations: gathers relationship facts for the
/// access predicates, runs the split calculator, and persists the result
/// atomically through the storage collaborator. Collaborators are injected
/// once at construction; there is no global service state.
pub struct ExpenseService<S: Storage, L: AuditLogger, N: Notifier> {
    storage: S,
    audit: L,
    notifier: N,
}

impl<S: Storage, L: AuditLogger, N: Notifier> ExpenseService<S, L, N> {
    pub fn new(storage: S, audit: L, notifier: N) -> Self {
        ExpenseService {
            storage,
            audit,
            notifier,
        }
    }

    // USER MANAGEMENT

    pub async fn create_user(&self, name: String, email: String) -> Result<User, FairsplitError> {
        info!("Creating user with email: {}", email);
        if email.is_empty() {
            return Err(FairsplitError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(FairsplitError::InvalidEmail(email));
        }
        self.validate_name(&name)?;

        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };
        let created = self.storage.create_user(user).await?;
        debug!("User created with ID: {}", created.id);

        self.audit
            .log_action(
                USER_CREATED,
                json!({ "user_id": created.id, "email": created.email }),
                Some(created.id),
            )
            .await?;
        Ok(created)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, FairsplitError> {
        self.storage.get_user(user_id).await
    }

    // GROUP MANAGEMENT

    pub async fn create_group(
        &self,
        name: String,
        member_ids: Vec<Uuid>,
        created_by: &User,
    ) -> Result<Group, FairsplitError> {
        info!("Creating group '{}' for creator {}", name, created_by.id);
        self.validate_name(&name)?;

        let mut all_members = member_ids;
        if !all_members.contains(&created_by.id) {
            all_members.push(created_by.id);
        }
        self.ensure_users_exist(&all_members).await?;

        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            name,
            created_by: created_by.id,
            members: all_members
                .into_iter()
                .map(|user_id| GroupMember {
                    user_id,
                    role: if user_id == created_by.id {
                        Role::Admin
                    } else {
                        Role::Member
                    },
                    joined_at: now,
                })
                .collect(),
            created_at: now,
        };
        self.storage.save_group(group.clone()).await?;

        self.audit
            .log_action(
                GROUP_CREATED,
                json!({
                    "group_id": group.id,
                    "name": group.name,
                    "member_ids": group.members.iter().map(|m| m.user_id).collect::<Vec<_>>()
                }),
                Some(created_by.id),
            )
            .await?;
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, FairsplitError> {
        self.storage.get_group(group_id).await
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        added_by: &User,
    ) -> Result<(), FairsplitError> {
        info!("Adding user {} to group {}", user_id, group_id);
        let mut group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or(FairsplitError::GroupNotFound(group_id))?;
        if !group.is_admin(added_by.id) {
            warn!(
                "User {} attempted to add a member to group {} without admin role",
                added_by.id, group_id
            );
            return Err(FairsplitError::GroupMembershipDenied);
        }
        self.ensure_users_exist(&[user_id]).await?;
        if group.is_member(user_id) {
            return Err(FairsplitError::AlreadyGroupMember(user_id));
        }

        group.members.push(GroupMember {
            user_id,
            role: Role::Member,
            joined_at: Utc::now(),
        });
        self.storage.save_group(group).await?;

        self.audit
            .log_action(
                MEMBER_ADDED,
                json!({ "group_id": group_id, "user_id": user_id }),
                Some(added_by.id),
            )
            .await?;
        Ok(())
    }

    // EXPENSE MANAGEMENT

    pub async fn create_expense(
        &self,
        new: NewExpense,
        created_by: &User,
    ) -> Result<ExpenseDetail, FairsplitError> {
        info!(
            "Creating expense '{}' for amount {} by user {}",
            new.description, new.amount, created_by.id
        );
        self.validate_description(&new.description)?;
        self.validate_amount(new.amount)?;
        self.validate_currency(&new.currency)?;
        let date = new.date.unwrap_or_else(Utc::now);
        self.validate_date(date)?;
        self.validate_participant_list(&new.participants)?;

        let group = match new.group_id {
            Some(group_id) => {
                let group = self
                    .storage
                    .get_group(group_id)
                    .await?
                    .ok_or(FairsplitError::GroupNotFound(group_id))?;
                if !group.is_member(created_by.id) {
                    warn!(
                        "User {} attempted to create an expense in group {} without membership",
                        created_by.id, group_id
                    );
                    return Err(FairsplitError::NotGroupMember);
                }
                Some(group)
            }
            None => None,
        };

        self.storage
            .get_user(new.paid_by)
            .await?
            .ok_or(FairsplitError::UserNotFound(new.paid_by))?;
        self.ensure_participants_exist(&new.participants).await?;

        if let Some(ref group) = group {
            if !group.is_member(new.paid_by) {
                return Err(FairsplitError::ParticipantNotInGroup(new.paid_by));
            }
            for p in &new.participants {
                if !group.is_member(p.user_id) {
                    return Err(FairsplitError::ParticipantNotInGroup(p.user_id));
                }
            }
        }

        let computed = calculate_splits(new.amount, new.policy, &new.participants)?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            description: new.description,
            amount: new.amount,
            currency: new.currency,
            date,
            paid_by: new.paid_by,
            group_id: new.group_id,
            category: new.category.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        let splits = Self::to_split_rows(expense.id, computed, now);

        self.storage
            .create_expense_with_splits(expense.clone(), splits.clone())
            .await?;
        debug!("Expense created with ID: {}", expense.id);

        self.audit
            .log_action(
                EXPENSE_CREATED,
                json!({
                    "expense_id": expense.id,
                    "group_id": expense.group_id,
                    "amount": expense.amount,
                    "paid_by": expense.paid_by
                }),
                Some(created_by.id),
            )
            .await?;
        self.notify(ExpenseEvent::Created {
            expense_id: expense.id,
            group_id: expense.group_id,
        })
        .await;

        Ok(ExpenseDetail { expense, splits })
    }

    pub async fn get_expense(
        &self,
        expense_id: Uuid,
        requested_by: &User,
    ) -> Result<ExpenseDetail, FairsplitError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(FairsplitError::ExpenseNotFound(expense_id))?;
        let splits = self.storage.get_splits(expense_id).await?;

        let ctx = self.access_context(requested_by, &expense, &splits).await?;
        if !access::can_view(&ctx) {
            return Err(FairsplitError::ViewDenied);
        }
        Ok(ExpenseDetail { expense, splits })
    }

    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        update: ExpenseUpdate,
        updated_by: &User,
    ) -> Result<ExpenseDetail, FairsplitError> {
        info!("Updating expense {} by user {}", expense_id, updated_by.id);
        let mut expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(FairsplitError::ExpenseNotFound(expense_id))?;
        let current_splits = self.storage.get_splits(expense_id).await?;

        let ctx = self
            .access_context(updated_by, &expense, &current_splits)
            .await?;
        if !access::can_update(&ctx) {
            warn!(
                "User {} not permitted to update expense {}",
                updated_by.id, expense_id
            );
            return Err(FairsplitError::UpdateDenied);
        }

        if let Some(ref description) = update.description {
            self.validate_description(description)?;
        }
        if let Some(amount) = update.amount {
            self.validate_amount(amount)?;
        }
        if let Some(ref currency) = update.currency {
            self.validate_currency(currency)?;
        }
        if let Some(date) = update.date {
            self.validate_date(date)?;
        }

        let new_amount = update.amount.unwrap_or(expense.amount);
        let amount_changed = (new_amount - expense.amount).abs() > f64::EPSILON;
        if amount_changed && update.split.is_none() {
            return Err(FairsplitError::SplitRequiredForAmountChange);
        }

        // Recompute and replace all split rows when the configuration
        // changes; plain field edits leave them untouched.
        let new_splits = match update.split {
            Some(split) => {
                self.validate_participant_list(&split.participants)?;
                self.ensure_participants_exist(&split.participants).await?;
                if let Some(group_id) = expense.group_id {
                    let group = self
                        .storage
                        .get_group(group_id)
                        .await?
                        .ok_or(FairsplitError::GroupNotFound(group_id))?;
                    for p in &split.participants {
                        if !group.is_member(p.user_id) {
                            return Err(FairsplitError::ParticipantNotInGroup(p.user_id));
                        }
                    }
                }
                let computed = calculate_splits(new_amount, split.policy, &split.participants)?;
                Some(Self::to_split_rows(expense.id, computed, Utc::now()))
            }
            None => None,
        };

        if let Some(description) = update.description {
            expense.description = description;
        }
        if let Some(currency) = update.currency {
            expense.currency = currency;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        if let Some(category) = update.category {
            expense.category = category;
        }
        expense.amount = new_amount;
        expense.updated_at = Utc::now();

        self.storage
            .update_expense_with_splits(expense.clone(), new_splits.clone())
            .await?;
        debug!("Expense {} updated", expense.id);

        self.audit
            .log_action(
                EXPENSE_UPDATED,
                json!({ "expense_id": expense.id, "amount": expense.amount }),
                Some(updated_by.id),
            )
            .await?;
        self.notify(ExpenseEvent::Updated {
            expense_id: expense.id,
        })
        .await;

        let splits = match new_splits {
            Some(rows) => rows,
            None => current_splits,
        };
        Ok(ExpenseDetail { expense, splits })
    }

    pub async fn delete_expense(
        &self,
        expense_id: Uuid,
        deleted_by: &User,
    ) -> Result<(), FairsplitError> {
        info!("Deleting expense {} by user {}", expense_id, deleted_by.id);
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(FairsplitError::ExpenseNotFound(expense_id))?;
        let splits = self.storage.get_splits(expense_id).await?;

        let ctx = self.access_context(deleted_by, &expense, &splits).await?;
        if !access::can_delete(&ctx) {
            warn!(
                "User {} not permitted to delete expense {}",
                deleted_by.id, expense_id
            );
            return Err(FairsplitError::DeleteDenied);
        }

        self.storage.delete_expense(expense_id).await?;

        self.audit
            .log_action(
                EXPENSE_DELETED,
                json!({ "expense_id": expense_id, "group_id": expense.group_id }),
                Some(deleted_by.id),
            )
            .await?;
        self.notify(ExpenseEvent::Deleted { expense_id }).await;
        Ok(())
    }

    pub async fn list_group_expenses(
        &self,
        group_id: Uuid,
        requested_by: &User,
    ) -> Result<Vec<ExpenseDetail>, FairsplitError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or(FairsplitError::GroupNotFound(group_id))?;
        if !group.is_member(requested_by.id) {
            return Err(FairsplitError::NotGroupMember);
        }

        let expenses = self.storage.list_group_expenses(group_id).await?;
        let mut details = Vec::with_capacity(expenses.len());
        for expense in expenses {
            let splits = self.storage.get_splits(expense.id).await?;
            details.push(ExpenseDetail { expense, splits });
        }
        Ok(details)
    }

    // SETTLEMENT

    pub async fn settle_split(
        &self,
        expense_id: Uuid,
        split_user_id: Uuid,
        settled_by: &User,
    ) -> Result<ExpenseSplit, FairsplitError> {
        info!(
            "Settling split of user {} on expense {} by user {}",
            split_user_id, expense_id, settled_by.id
        );
        let (expense, mut split) = self.load_split(expense_id, split_user_id).await?;
        if !access::can_toggle_settlement(settled_by.id, split.user_id, expense.paid_by) {
            return Err(FairsplitError::SettleDenied);
        }
        if split.settled {
            return Err(FairsplitError::AlreadySettled);
        }

        split.settled = true;
        self.storage.save_split(split.clone()).await?;

        self.audit
            .log_action(
                SPLIT_SETTLED,
                json!({ "expense_id": expense_id, "user_id": split_user_id }),
                Some(settled_by.id),
            )
            .await?;
        self.notify(ExpenseEvent::SplitSettled {
            expense_id,
            user_id: split_user_id,
        })
        .await;
        Ok(split)
    }

    pub async fn unsettle_split(
        &self,
        expense_id: Uuid,
        split_user_id: Uuid,
        unsettled_by: &User,
    ) -> Result<ExpenseSplit, FairsplitError> {
        info!(
            "Unsettling split of user {} on expense {} by user {}",
            split_user_id, expense_id, unsettled_by.id
        );
        let (expense, mut split) = self.load_split(expense_id, split_user_id).await?;
        if !access::can_toggle_settlement(unsettled_by.id, split.user_id, expense.paid_by) {
            return Err(FairsplitError::UnsettleDenied);
        }
        if !split.settled {
            return Err(FairsplitError::NotSettled);
        }

        split.settled = false;
        self.storage.save_split(split.clone()).await?;

        self.audit
            .log_action(
                SPLIT_UNSETTLED,
                json!({ "expense_id": expense_id, "user_id": split_user_id }),
                Some(unsettled_by.id),
            )
            .await?;
        self.notify(ExpenseEvent::SplitUnsettled {
            expense_id,
            user_id: split_user_id,
        })
        .await;
        Ok(split)
    }

    pub async fn get_audit_logs(&self) -> Result<Vec<AuditLogEntry>, FairsplitError> {
        self.audit.get_logs().await
    }

    // HELPERS

    /// Gather the caller's relationship facts for the access predicates.
    async fn access_context(
        &self,
        actor: &User,
        expense: &Expense,
        splits: &[ExpenseSplit],
    ) -> Result<ExpenseAccessContext, FairsplitError> {
        let (is_group_expense, is_group_member, is_group_admin) = match expense.group_id {
            Some(group_id) => {
                let group = self
                    .storage
                    .get_group(group_id)
                    .await?
                    .ok_or(FairsplitError::GroupNotFound(group_id))?;
                (true, group.is_member(actor.id), group.is_admin(actor.id))
            }
            None => (false, false, false),
        };
        Ok(ExpenseAccessContext {
            is_payer: expense.paid_by == actor.id,
            is_participant: splits.iter().any(|s| s.user_id == actor.id),
            is_group_expense,
            is_group_member,
            is_group_admin,
        })
    }

    async fn load_split(
        &self,
        expense_id: Uuid,
        user_id: Uuid,
    ) -> Result<(Expense, ExpenseSplit), FairsplitError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(FairsplitError::ExpenseNotFound(expense_id))?;
        let split = self
            .storage
            .get_split(expense_id, user_id)
            .await?
            .ok_or(FairsplitError::SplitNotFound {
                expense_id,
                user_id,
            })?;
        Ok((expense, split))
    }

    fn to_split_rows(
        expense_id: Uuid,
        computed: Vec<ComputedSplit>,
        created_at: DateTime<Utc>,
    ) -> Vec<ExpenseSplit> {
        computed
            .into_iter()
            .map(|c| ExpenseSplit {
                expense_id,
                user_id: c.user_id,
                amount: c.amount,
                percentage: c.percentage,
                shares: c.shares,
                settled: false,
                created_at,
            })
            .collect()
    }

    async fn ensure_users_exist(&self, user_ids: &[Uuid]) -> Result<(), FairsplitError> {
        for &user_id in user_ids {
            if self.storage.get_user(user_id).await?.is_none() {
                return Err(FairsplitError::UserNotFound(user_id));
            }
        }
        Ok(())
    }

    async fn ensure_participants_exist(
        &self,
        participants: &[ParticipantSpec],
    ) -> Result<(), FairsplitError> {
        let users = try_join_all(
            participants
                .iter()
                .map(|p| self.storage.get_user(p.user_id)),
        )
        .await?;
        if users.iter().any(|u| u.is_none()) {
            return Err(FairsplitError::InvalidParticipants);
        }
        Ok(())
    }

    /// Non-empty and free of duplicate user ids. One split per participant
    /// per expense; the store is not trusted to enforce it.
    fn validate_participant_list(
        &self,
        participants: &[ParticipantSpec],
    ) -> Result<(), FairsplitError> {
        if participants.is_empty() {
            return Err(FairsplitError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for p in participants {
            if !seen.insert(p.user_id) {
                return Err(FairsplitError::DuplicateParticipant(p.user_id));
            }
        }
        Ok(())
    }

    fn validate_description(&self, description: &str) -> Result<(), FairsplitError> {
        if description.trim().is_empty() {
            return Err(FairsplitError::EmptyDescription);
        }
        if description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(FairsplitError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH));
        }
        Ok(())
    }

    fn validate_amount(&self, amount: f64) -> Result<(), FairsplitError> {
        if !amount.is_finite() {
            return Err(FairsplitError::NonFiniteAmount);
        }
        if amount <= 0.0 {
            return Err(FairsplitError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(FairsplitError::AmountTooLarge(MAX_AMOUNT));
        }
        Ok(())
    }

    fn validate_currency(&self, currency: &str) -> Result<(), FairsplitError> {
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FairsplitError::InvalidCurrency(currency.to_string()));
        }
        Ok(())
    }

    fn validate_date(&self, date: DateTime<Utc>) -> Result<(), FairsplitError> {
        if date > Utc::now() {
            return Err(FairsplitError::DateInFuture);
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), FairsplitError> {
        if name.trim().is_empty() {
            return Err(FairsplitError::EmptyName);
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(FairsplitError::NameTooLong(MAX_NAME_LENGTH));
        }
        Ok(())
    }

    /// Delivery failures are logged and swallowed: notifications must never
    /// abort the mutation they follow.
    async fn notify(&self, event: ExpenseEvent) {
        if let Err(e) = self.notifier.notify(event).await {
            warn!("Notification delivery failed: {}", e);
        }
    }
}
