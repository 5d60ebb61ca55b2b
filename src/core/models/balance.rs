use super::member::MemberId;
use super::settlement::SettlementSuggestion;
use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Net position per member: positive is owed by the group, negative owes.
pub type Balances = BTreeMap<MemberId, Money>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    pub member_id: MemberId,
    #[schema(value_type = f64)]
    pub total_paid: Money,
    #[schema(value_type = f64)]
    pub total_owed: Money,
    #[schema(value_type = f64)]
    pub net_balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub name: String,
    #[schema(value_type = f64)]
    pub balance: Money,
    /// False for members removed from the group after taking part in expenses.
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BalanceReport {
    pub group_id: String,
    pub balances: Vec<MemberBalance>,
    pub settlements: Vec<SettlementSuggestion>,
    /// Sum of real spending, payments excluded.
    #[schema(value_type = f64)]
    pub total_spending: Money,
}
