use super::shares::member_shares;
use crate::core::errors::SplitError;
use crate::core::models::{Expense, MemberId, MemberSummary};
use crate::core::money::Money;

/// Paid/owed rollup for one member. `net_balance` matches the member's entry
/// from [`calculate_balances`](super::calculate_balances) over the same expenses.
pub fn member_summary(expenses: &[Expense], member_id: &MemberId) -> Result<MemberSummary, SplitError> {
    let out_of_range = |what: &str| SplitError::AmountOutOfRange(format!("{} of {}", what, member_id));
    let mut total_paid = Money::ZERO;
    let mut total_owed = Money::ZERO;

    for expense in expenses {
        let shares = member_shares(expense)?;
        if expense.payer == *member_id {
            total_paid = total_paid
                .checked_add(expense.amount)
                .ok_or_else(|| out_of_range("total paid"))?;
        }
        let owed_here = Money::checked_sum(
            shares
                .into_iter()
                .filter(|(id, _)| id == member_id)
                .map(|(_, share)| share),
        )
        .ok_or_else(|| out_of_range("total owed"))?;
        total_owed = total_owed.checked_add(owed_here).ok_or_else(|| out_of_range("total owed"))?;
    }

    Ok(MemberSummary {
        member_id: member_id.clone(),
        total_paid,
        total_owed,
        net_balance: total_paid
            .checked_sub(total_owed)
            .ok_or_else(|| out_of_range("net balance"))?,
    })
}

/// Real spending in a group, settlement payments excluded.
pub fn total_spending(expenses: &[Expense]) -> Result<Money, SplitError> {
    Money::checked_sum(expenses.iter().filter(|e| !e.is_payment).map(|e| e.amount))
        .ok_or_else(|| SplitError::AmountOutOfRange("total spending".to_string()))
}
