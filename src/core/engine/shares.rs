use crate::core::errors::SplitError;
use crate::core::models::{Expense, MemberId, Split};
use crate::core::money::Money;

/// Resolves what each member owes for a single expense.
///
/// Equal splits divide the amount in cents; leftover cents go one each to
/// the lowest member ids so the shares always add up to the amount.
/// Explicit splits are returned as given.
pub fn member_shares(expense: &Expense) -> Result<Vec<(MemberId, Money)>, SplitError> {
    if !expense.amount.is_positive() {
        return Err(SplitError::InvalidAmount(format!(
            "expense {} has non-positive amount {}",
            expense.id, expense.amount
        )));
    }

    match &expense.split {
        Split::Equal { participants } => {
            let shares = expense
                .amount
                .split_evenly(participants.len())
                .ok_or_else(|| SplitError::EmptyParticipants(expense.id.clone()))?;
            Ok(participants.iter().cloned().zip(shares).collect())
        }
        Split::Explicit { shares } => {
            if shares.is_empty() {
                return Err(SplitError::EmptyParticipants(expense.id.clone()));
            }
            if let Some((member_id, share)) = shares.iter().find(|(_, share)| share.is_negative()) {
                return Err(SplitError::InvalidAmount(format!(
                    "expense {} assigns negative share {} to {}",
                    expense.id, share, member_id
                )));
            }
            Ok(shares.iter().map(|(member_id, share)| (member_id.clone(), *share)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn equal_split_assigns_remainder_to_lowest_ids() {
        let expense = Expense::new("g", "Taxi", cents(1000), "c".into(), Split::equal(["c", "a", "b"]));
        let shares = member_shares(&expense).unwrap();
        assert_eq!(
            shares,
            vec![
                (MemberId::from("a"), cents(334)),
                (MemberId::from("b"), cents(333)),
                (MemberId::from("c"), cents(333)),
            ]
        );
    }

    #[test]
    fn explicit_split_is_taken_literally() {
        let expense = Expense::new(
            "g",
            "Hotel",
            cents(10_000),
            "a".into(),
            Split::explicit([("b", cents(6_000)), ("c", cents(3_000))]),
        );
        let shares = member_shares(&expense).unwrap();
        assert_eq!(shares.iter().map(|(_, s)| *s).sum::<Money>(), cents(9_000));
    }

    #[test]
    fn empty_participants_are_rejected() {
        let expense = Expense::new("g", "Ghost", cents(500), "a".into(), Split::equal(Vec::<MemberId>::new()));
        assert_eq!(member_shares(&expense), Err(SplitError::EmptyParticipants(expense.id.clone())));

        let expense = Expense::new("g", "Ghost", cents(500), "a".into(), Split::explicit(Vec::<(MemberId, Money)>::new()));
        assert!(matches!(member_shares(&expense), Err(SplitError::EmptyParticipants(_))));
    }

    #[test]
    fn non_positive_amounts_and_negative_shares_are_rejected() {
        let zero = Expense::new("g", "Nothing", Money::ZERO, "a".into(), Split::equal(["a"]));
        assert!(matches!(member_shares(&zero), Err(SplitError::InvalidAmount(_))));

        let negative = Expense::new("g", "Refund", cents(-100), "a".into(), Split::equal(["a"]));
        assert!(matches!(member_shares(&negative), Err(SplitError::InvalidAmount(_))));

        let bad_share = Expense::new(
            "g",
            "Odd",
            cents(100),
            "a".into(),
            Split::explicit([("a", cents(150)), ("b", cents(-50))]),
        );
        assert!(matches!(member_shares(&bad_share), Err(SplitError::InvalidAmount(_))));
    }
}
