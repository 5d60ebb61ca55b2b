//! Balance and settlement engine.
//!
//! Everything here is a pure function over a snapshot of members and
//! expenses: [`calculate_balances`] folds expenses into net balances,
//! [`calculate_settlements`] turns those into suggested transfers and
//! [`member_summary`] gives the paid/owed view of a single member.

mod balances;
mod settlements;
mod shares;
mod summary;

pub use balances::{UnknownMemberPolicy, calculate_balances};
pub use settlements::{apply_settlements, calculate_settlements};
pub use shares::member_shares;
pub use summary::{member_summary, total_spending};
