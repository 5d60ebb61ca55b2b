use crate::core::errors::SplitError;
use crate::core::models::{Balances, MemberId, SettlementSuggestion};
use crate::core::money::Money;
use log::{debug, warn};

/// Reduces zero-summing balances to a short list of transfers.
///
/// Greedy largest-first matching: the biggest remaining debtor pays the
/// biggest remaining creditor `min(owed, due)` until one side runs out.
/// Equal amounts are ordered by member id. Yields at most
/// `non_zero_balances - 1` transfers, each strictly positive.
pub fn calculate_settlements(balances: &Balances) -> Result<Vec<SettlementSuggestion>, SplitError> {
    // Widened so balances that net to zero never overflow part-way through.
    let residual: i128 = balances.values().map(|balance| i128::from(balance.cents())).sum();
    if residual != 0 {
        warn!("Refusing to settle balances with residual {} cents", residual);
        let residual_cents =
            i64::try_from(residual).map_err(|_| SplitError::AmountOutOfRange(format!("residual {}", residual)))?;
        return Err(SplitError::UnbalancedBalances { residual_cents });
    }

    // Balances iterate in id order, and the sorts below are stable.
    let mut debtors: Vec<(MemberId, Money)> = balances
        .iter()
        .filter(|(_, balance)| balance.is_negative())
        .map(|(id, balance)| {
            balance
                .checked_abs()
                .map(|owed| (id.clone(), owed))
                .ok_or_else(|| SplitError::AmountOutOfRange(format!("balance of {}", id)))
        })
        .collect::<Result<_, _>>()?;
    let mut creditors: Vec<(MemberId, Money)> = balances
        .iter()
        .filter(|(_, balance)| balance.is_positive())
        .map(|(id, balance)| (id.clone(), *balance))
        .collect();

    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);

        if amount.is_positive() {
            settlements.push(SettlementSuggestion {
                from: debtors[i].0.clone(),
                to: creditors[j].0.clone(),
                amount,
            });
        }

        debtors[i].1 -= amount;
        creditors[j].1 -= amount;

        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    debug!("Suggested settlements: {:?}", settlements);
    Ok(settlements)
}

/// Balances left after every transfer in `settlements` has been made.
pub fn apply_settlements(balances: &Balances, settlements: &[SettlementSuggestion]) -> Balances {
    let mut remaining = balances.clone();
    for settlement in settlements {
        *remaining.entry(settlement.from.clone()).or_insert(Money::ZERO) += settlement.amount;
        *remaining.entry(settlement.to.clone()).or_insert(Money::ZERO) -= settlement.amount;
    }
    remaining
}
