pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::engine::{
    UnknownMemberPolicy, apply_settlements, calculate_balances, calculate_settlements, member_shares, member_summary,
    total_spending,
};
pub use crate::core::errors::SplitError;
pub use crate::core::models::{
    Balances, Expense, Group, Member, MemberId, MemberSummary, NewExpense, Settlement, SettlementStatus,
    SettlementSuggestion, Split,
};
pub use crate::core::money::Money;
pub use crate::core::services::SplitService;
pub use crate::infrastructure::cache::in_memory::InMemoryCache;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
