use super::member::MemberId;
use crate::core::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Suggested transfer produced by the settlement reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SettlementSuggestion {
    pub from: MemberId,
    pub to: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Requested,
    MarkedPaid,
    Approved,
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SettlementStatus::Requested => "requested",
            SettlementStatus::MarkedPaid => "marked_paid",
            SettlementStatus::Approved => "approved",
        };
        write!(f, "{}", s)
    }
}

/// A transfer a member committed to make. Once approved it is backed by a
/// payment expense that feeds the next balance computation.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Settlement {
    pub id: String,
    pub group_id: String,
    pub from: MemberId,
    pub to: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub remarks: Option<String>,
    pub status: SettlementStatus,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>)]
    pub marked_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub approved_at: Option<DateTime<Utc>>,
    pub payment_expense_id: Option<String>,
}
