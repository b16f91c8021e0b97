use crate::error::FairsplitError;
use async_trait::async_trait;
use uuid::Uuid;

/// Events emitted after successful split-affecting mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpenseEvent {
    Created {
        expense_id: Uuid,
        group_id: Option<Uuid>,
    },
    Updated {
        expense_id: Uuid,
    },
    Deleted {
        expense_id: Uuid,
    },
    SplitSettled {
        expense_id: Uuid,
        user_id: Uuid,
    },
    SplitUnsettled {
        expense_id: Uuid,
        user_id: Uuid,
    },
}

/// Fire-and-forget delivery. A failing notifier must never abort or roll
/// back the mutation it follows; the service logs the error and moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: ExpenseEvent) -> Result<(), FairsplitError>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    async fn notify(&self, event: ExpenseEvent) -> Result<(), FairsplitError> {
        (**self).notify(event).await
    }
}

pub mod in_memory;
