mod group_tests;
mod settlement_tests;

use crate::core::engine::UnknownMemberPolicy;
use crate::core::errors::SplitError;
use crate::core::models::{Expense, Group, MemberId, NewExpense, Settlement, Split};
use crate::core::money::Money;
use crate::core::services::SplitService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use async_trait::async_trait;
use tokio::task::yield_now;

pub fn create_test_service() -> SplitService<InMemoryLogging, InMemoryStorage, InMemoryCache> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    SplitService::new(storage, logging, cache, UnknownMemberPolicy::Reject)
}

/// Service over a store that hands control back to the scheduler around
/// every access, so joined calls interleave.
pub fn create_yielding_service() -> SplitService<InMemoryLogging, YieldingStorage, InMemoryCache> {
    let storage = YieldingStorage {
        inner: InMemoryStorage::new(),
        expense_read_yields: 3,
    };
    SplitService::new(storage, InMemoryLogging::new(), InMemoryCache::new(), UnknownMemberPolicy::Reject)
}

async fn yield_times(times: usize) {
    for _ in 0..times {
        yield_now().await;
    }
}

pub struct YieldingStorage {
    inner: InMemoryStorage,
    expense_read_yields: usize,
}

#[async_trait]
impl Storage for YieldingStorage {
    async fn save_group(&self, group: Group) -> Result<(), SplitError> {
        yield_now().await;
        self.inner.save_group(group).await
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitError> {
        let group = self.inner.get_group(group_id).await;
        yield_now().await;
        group
    }

    async fn list_groups(&self) -> Result<Vec<Group>, SplitError> {
        self.inner.list_groups().await
    }

    async fn update_group<F, T>(&self, group_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Group) -> Result<T, SplitError> + Send,
        T: Send,
    {
        yield_now().await;
        self.inner.update_group(group_id, apply).await
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), SplitError> {
        self.inner.save_expense(expense).await
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError> {
        let expense = self.inner.get_expense(expense_id).await;
        yield_now().await;
        expense
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<Option<Expense>, SplitError> {
        self.inner.delete_expense(expense_id).await
    }

    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SplitError> {
        let expenses = self.inner.get_group_expenses(group_id).await;
        yield_times(self.expense_read_yields).await;
        expenses
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), SplitError> {
        self.inner.save_settlement(settlement).await
    }

    async fn get_settlement(&self, settlement_id: &str) -> Result<Option<Settlement>, SplitError> {
        let settlement = self.inner.get_settlement(settlement_id).await;
        yield_now().await;
        settlement
    }

    async fn update_settlement<F, T>(&self, settlement_id: &str, apply: F) -> Result<T, SplitError>
    where
        F: FnOnce(&mut Settlement) -> Result<T, SplitError> + Send,
        T: Send,
    {
        yield_now().await;
        self.inner.update_settlement(settlement_id, apply).await
    }

    async fn get_group_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SplitError> {
        self.inner.get_group_settlements(group_id).await
    }
}

/// Creates a group with the given member names and returns it with the
/// member ids in the same order.
pub async fn create_trip<S: Storage>(
    service: &SplitService<InMemoryLogging, S, InMemoryCache>,
    names: &[&str],
) -> (Group, Vec<MemberId>) {
    let group = service
        .create_group(
            "Trip".to_string(),
            names.iter().map(|name| name.to_string()).collect(),
        )
        .await
        .unwrap();
    let ids = group.members.iter().map(|m| m.id.clone()).collect();
    (group, ids)
}

pub fn equal_expense(description: &str, cents: i64, payer: &MemberId, participants: &[MemberId]) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount: Money::from_cents(cents),
        payer: payer.clone(),
        split: Split::equal(participants.iter().cloned()),
        receipt_uri: None,
    }
}
