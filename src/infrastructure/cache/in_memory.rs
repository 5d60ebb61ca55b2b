use crate::core::errors::SplitError;
use crate::core::models::BalanceReport;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::cache_keys::balance_report_key;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CacheState {
    reports: HashMap<String, (BalanceReport, DateTime<Utc>)>,
    generations: HashMap<String, u64>,
}

#[derive(Clone, Default)]
pub struct InMemoryCache {
    state: Arc<RwLock<CacheState>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            state: Arc::new(RwLock::new(CacheState::default())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_balance_report(&self, group_id: &str) -> Result<Option<BalanceReport>, SplitError> {
        let state = self.state.read().await;
        Ok(state
            .reports
            .get(&balance_report_key(group_id))
            .filter(|(_, expiry)| *expiry > Utc::now())
            .map(|(report, _)| report.clone()))
    }

    async fn generation(&self, group_id: &str) -> Result<u64, SplitError> {
        let state = self.state.read().await;
        Ok(state.generations.get(group_id).copied().unwrap_or(0))
    }

    async fn save_balance_report(
        &self,
        group_id: &str,
        report: &BalanceReport,
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, SplitError> {
        let expiry = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| SplitError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut state = self.state.write().await;
        if state.generations.get(group_id).copied().unwrap_or(0) != generation {
            return Ok(false);
        }
        state.reports.insert(balance_report_key(group_id), (report.clone(), expiry));
        Ok(true)
    }

    async fn invalidate_group(&self, group_id: &str) -> Result<(), SplitError> {
        let mut state = self.state.write().await;
        *state.generations.entry(group_id.to_string()).or_insert(0) += 1;
        state.reports.remove(&balance_report_key(group_id));
        let now = Utc::now();
        state.reports.retain(|_, (_, expiry)| *expiry > now);
        Ok(())
    }
}
