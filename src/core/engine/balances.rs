use super::shares::member_shares;
use crate::core::errors::SplitError;
use crate::core::models::{Balances, Expense, Member, MemberId};
use crate::core::money::Money;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when an expense names a member missing from the member list,
/// e.g. someone removed from the group after the expense was logged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMemberPolicy {
    /// Fail the whole computation.
    #[default]
    Reject,
    /// Skip the update for that member only.
    Ignore,
}

impl FromStr for UnknownMemberPolicy {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UnknownMemberPolicy::Reject),
            "ignore" => Ok(UnknownMemberPolicy::Ignore),
            other => Err(SplitError::InvalidInput(
                "unknown_member_policy".to_string(),
                crate::core::errors::FieldError {
                    field: "unknown_member_policy".to_string(),
                    title: "Invalid policy".to_string(),
                    description: format!("'{}' is neither 'reject' nor 'ignore'", other),
                },
            )),
        }
    }
}

/// Folds `expenses` into a net balance per member.
///
/// Every member in `members` gets an entry, starting at zero. The payer of
/// each expense is credited with the full amount and every share holder is
/// debited with their share. The result does not depend on expense order.
pub fn calculate_balances(
    expenses: &[Expense],
    members: &[Member],
    policy: UnknownMemberPolicy,
) -> Result<Balances, SplitError> {
    debug!(
        "Calculating balances for {} members over {} expenses",
        members.len(),
        expenses.len()
    );
    let mut balances: Balances = members.iter().map(|m| (m.id.clone(), Money::ZERO)).collect();

    for expense in expenses {
        let shares = member_shares(expense)?;
        apply(&mut balances, expense, &expense.payer, expense.amount, policy)?;
        for (member_id, share) in shares {
            apply(&mut balances, expense, &member_id, -share, policy)?;
        }
    }

    debug!("Balances calculated: {:?}", balances);
    Ok(balances)
}

fn apply(
    balances: &mut Balances,
    expense: &Expense,
    member_id: &MemberId,
    delta: Money,
    policy: UnknownMemberPolicy,
) -> Result<(), SplitError> {
    match balances.get_mut(member_id) {
        Some(balance) => {
            *balance = balance
                .checked_add(delta)
                .ok_or_else(|| SplitError::AmountOutOfRange(format!("balance of {}", member_id)))?;
            Ok(())
        }
        None if policy == UnknownMemberPolicy::Ignore => {
            debug!("Skipping unknown member {} in expense {}", member_id, expense.id);
            Ok(())
        }
        None => {
            warn!("Expense {} references unknown member {}", expense.id, member_id);
            Err(SplitError::UnknownMember {
                expense_id: expense.id.clone(),
                member_id: member_id.to_string(),
            })
        }
    }
}
