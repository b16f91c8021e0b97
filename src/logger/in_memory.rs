use crate::error::FairsplitError;
use crate::logger::AuditLogger;
use crate::models::AuditLogEntry;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub struct InMemoryAuditLogger {
    logs: tokio::sync::Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogger {
    pub fn new() -> Self {
        InMemoryAuditLogger {
            logs: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogger for InMemoryAuditLogger {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<Uuid>,
    ) -> Result<(), FairsplitError> {
        let mut logs = self.logs.lock().await;
        logs.push(AuditLogEntry {
            id: Uuid::new_v4(),
            action: action.to_string(),
            user_id,
            details,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AuditLogEntry>, FairsplitError> {
        Ok(self.logs.lock().await.clone())
    }
}
