use crate::error::FairsplitError;
use crate::models::AuditLogEntry;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AuditLogger: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<Uuid>,
    ) -> Result<(), FairsplitError>;

    async fn get_logs(&self) -> Result<Vec<AuditLogEntry>, FairsplitError>;
}

pub mod in_memory;
