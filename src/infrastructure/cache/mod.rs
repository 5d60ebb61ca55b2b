pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::SplitError;
use crate::core::models::BalanceReport;
use async_trait::async_trait;

/// Derived balance reports, keyed by group. Entries must be dropped whenever
/// the group's members or expenses change.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_balance_report(&self, group_id: &str) -> Result<Option<BalanceReport>, SplitError>;
    /// Counter bumped by every invalidation of the group.
    async fn generation(&self, group_id: &str) -> Result<u64, SplitError>;
    /// Stores `report` only if the group is still at `generation`, i.e. nothing
    /// changed while it was computed. Returns whether it was stored.
    async fn save_balance_report(
        &self,
        group_id: &str,
        report: &BalanceReport,
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, SplitError>;
    async fn invalidate_group(&self, group_id: &str) -> Result<(), SplitError>;
}
