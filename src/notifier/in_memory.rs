use crate::error::FairsplitError;
use crate::notifier::{ExpenseEvent, Notifier};
use async_trait::async_trait;

/// Collects events in memory; stands in for a real delivery channel in
/// tests and the demo server.
pub struct InMemoryNotifier {
    events: tokio::sync::Mutex<Vec<ExpenseEvent>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        InMemoryNotifier {
            events: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    pub async fn events(&self) -> Vec<ExpenseEvent> {
        self.events.lock().await.clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, event: ExpenseEvent) -> Result<(), FairsplitError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
