pub mod in_memory;

use crate::core::errors::SplitError;
use crate::core::models::ActivityEntry;
use async_trait::async_trait;

/// Activity feed sink. One entry per group mutation.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(&self, group_id: &str, action: &str, details: serde_json::Value) -> Result<(), SplitError>;
    async fn get_group_activity(&self, group_id: &str) -> Result<Vec<ActivityEntry>, SplitError>;
    async fn get_logs(&self) -> Result<Vec<ActivityEntry>, SplitError>;
}
