//! Activity feed action names and service limits.

pub const GROUP_CREATED: &str = "group_created";
pub const GROUP_SETTLED: &str = "group_settled";
pub const MEMBER_ADDED: &str = "member_added";
pub const MEMBER_REMOVED: &str = "member_removed";
pub const EXPENSE_ADDED: &str = "expense_added";
pub const EXPENSE_UPDATED: &str = "expense_updated";
pub const EXPENSE_DELETED: &str = "expense_deleted";
pub const SETTLEMENT_REQUESTED: &str = "settlement_requested";
pub const SETTLEMENT_MARKED_PAID: &str = "settlement_marked_paid";
pub const SETTLEMENT_APPROVED: &str = "settlement_approved";

/// Upper bound for a single expense or settlement, in cents.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
