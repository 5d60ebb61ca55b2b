use crate::core::errors::SplitError;
use crate::core::models::{Expense, Group, Settlement};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
    settlements: Arc<RwLock<HashMap<String, Settlement>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            groups: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
            settlements: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), SplitError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, SplitError> {
        let groups = self.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn update_group<F, T>(&self, group_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Group) -> Result<T, SplitError> + Send,
        T: Send,
    {
        let mut groups = self.groups.write().await;
        let stored = groups
            .get_mut(group_id)
            .ok_or_else(|| SplitError::GroupNotFound(group_id.to_string()))?;
        let mut draft = stored.clone();
        let result = apply(&mut draft)?;
        *stored = draft;
        Ok(result)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), SplitError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(expense_id).cloned())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError> {
        let mut expenses = self.expenses.write().await;
        Ok(expenses.remove(expense_id))
    }

    // Newest first.
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SplitError> {
        let expenses = self.expenses.read().await;
        let mut group_expenses: Vec<Expense> = expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        group_expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(group_expenses)
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), SplitError> {
        let mut settlements = self.settlements.write().await;
        settlements.insert(settlement.id.clone(), settlement);
        Ok(())
    }

    async fn get_settlement(&self, settlement_id: &str) -> Result<Option<Settlement>, SplitError> {
        let settlements = self.settlements.read().await;
        Ok(settlements.get(settlement_id).cloned())
    }

    async fn update_settlement<F, T>(&self, settlement_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Settlement) -> Result<T, SplitError> + Send,
        T: Send,
    {
        let mut settlements = self.settlements.write().await;
        let stored = settlements
            .get_mut(settlement_id)
            .ok_or_else(|| SplitError::SettlementNotFound(settlement_id.to_string()))?;
        let mut draft = stored.clone();
        let result = apply(&mut draft)?;
        *stored = draft;
        Ok(result)
    }

    async fn get_group_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SplitError> {
        let settlements = self.settlements.read().await;
        let mut group_settlements: Vec<Settlement> = settlements
            .values()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect();
        group_settlements.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(group_settlements)
    }
}
