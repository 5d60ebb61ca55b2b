use crate::core::errors::SplitError;
use crate::core::models::{Expense, Group, Settlement};
use async_trait::async_trait;

/// Group data store. Owns persistence; the engine only ever reads snapshots
/// handed out by it.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), SplitError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitError>;
    /// All groups, newest first.
    async fn list_groups(&self) -> Result<Vec<Group>, SplitError>;
    /// Applies `apply` to the stored group as one atomic step. The group is
    /// only written back when `apply` succeeds.
    async fn update_group<F, T>(&self, group_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Group) -> Result<T, SplitError> + Send,
        T: Send;
    async fn save_expense(&self, expense: Expense) -> Result<(), SplitError>;
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError>;
    async fn delete_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError>;
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SplitError>;
    async fn save_settlement(&self, settlement: Settlement) -> Result<(), SplitError>;
    async fn get_settlement(&self, settlement_id: &str) -> Result<Option<Settlement>, SplitError>;
    /// Atomic read-modify-write of a settlement, same contract as `update_group`.
    async fn update_settlement<F, T>(&self, settlement_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Settlement) -> Result<T, SplitError> + Send,
        T: Send;
    async fn get_group_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SplitError>;
}

pub mod in_memory;
