use crate::core::errors::SplitError;
use crate::core::models::ActivityEntry;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, group_id: &str, action: &str, details: serde_json::Value) -> Result<(), SplitError> {
        if !details.is_object() {
            return Err(SplitError::LoggingError(format!(
                "Activity details for {} must be a JSON object",
                action
            )));
        }
        let mut logs = self.logs.write().await;
        logs.push(ActivityEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            action: action.to_string(),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_group_activity(&self, group_id: &str) -> Result<Vec<ActivityEntry>, SplitError> {
        let logs = self.logs.read().await;
        Ok(logs.iter().filter(|entry| entry.group_id == group_id).cloned().collect())
    }

    async fn get_logs(&self) -> Result<Vec<ActivityEntry>, SplitError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }
}
