pub mod activity;
pub mod balance;
pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;

pub use activity::ActivityEntry;
pub use balance::{BalanceReport, Balances, MemberBalance, MemberSummary};
pub use expense::{Expense, NewExpense, Split};
pub use group::Group;
pub use member::{Member, MemberId};
pub use settlement::{Settlement, SettlementStatus, SettlementSuggestion};
