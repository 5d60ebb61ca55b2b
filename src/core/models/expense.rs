use super::member::MemberId;
use crate::core::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;
use uuid::Uuid;

/// How an expense's amount is distributed over the group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Split {
    /// Everyone listed pays the same share.
    Equal { participants: BTreeSet<MemberId> },
    /// Each listed member owes the literal amount given; unlisted members owe nothing.
    Explicit {
        #[schema(value_type = BTreeMap<String, f64>)]
        shares: BTreeMap<MemberId, Money>,
    },
}

impl Split {
    pub fn equal<I, M>(participants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        Split::Equal {
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn explicit<I, M>(shares: I) -> Self
    where
        I: IntoIterator<Item = (M, Money)>,
        M: Into<MemberId>,
    {
        Split::Explicit {
            shares: shares.into_iter().map(|(m, amount)| (m.into(), amount)).collect(),
        }
    }

    /// Members this split touches, in id order.
    pub fn members(&self) -> Vec<&MemberId> {
        match self {
            Split::Equal { participants } => participants.iter().collect(),
            Split::Explicit { shares } => shares.keys().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub payer: MemberId,
    pub split: Split,
    /// Set on expenses recorded from an approved settlement.
    pub is_payment: bool,
    pub receipt_uri: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(group_id: &str, description: impl Into<String>, amount: Money, payer: MemberId, split: Split) -> Self {
        let now = Utc::now();
        Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            description: description.into(),
            amount,
            payer,
            split,
            is_payment: false,
            receipt_uri: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Payment of `amount` from `from` to `to`. Folding it into the balances
    /// moves both members toward zero by `amount`.
    pub fn payment(group_id: &str, from: MemberId, to: MemberId, amount: Money) -> Self {
        let mut expense = Expense::new(
            group_id,
            "Settlement Payment",
            amount,
            from,
            Split::explicit([(to, amount)]),
        );
        expense.is_payment = true;
        expense
    }
}

/// Caller-supplied fields of an expense, used for both creation and edits.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewExpense {
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub payer: MemberId,
    pub split: Split,
    #[serde(default)]
    pub receipt_uri: Option<String>,
}
