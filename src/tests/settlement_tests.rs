use super::{create_test_service, create_trip, equal_expense};
use crate::constants::{SETTLEMENT_APPROVED, SETTLEMENT_MARKED_PAID, SETTLEMENT_REQUESTED};
use crate::core::errors::SplitError;
use crate::core::models::SettlementStatus;
use crate::core::money::Money;

#[tokio::test]
async fn test_settlement_workflow_clears_balances() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;
    service
        .add_expense(&group.id, equal_expense("Dinner", 10_000, &ids[0], &ids))
        .await
        .unwrap();

    let report = service.get_balance_report(&group.id).await.unwrap();
    let suggestion = report.settlements[0].clone();
    assert_eq!(suggestion.from, ids[1]);
    assert_eq!(suggestion.to, ids[0]);

    let settlement = service
        .request_settlement(
            &group.id,
            &suggestion.from,
            &suggestion.to,
            suggestion.amount,
            Some("bank transfer".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(settlement.status, SettlementStatus::Requested);
    assert!(settlement.payment_expense_id.is_none());

    // Requesting alone does not move money.
    let pending = service.get_balance_report(&group.id).await.unwrap();
    assert_eq!(pending.settlements.len(), 1);

    let paid = service.mark_settlement_paid(&settlement.id).await.unwrap();
    assert_eq!(paid.status, SettlementStatus::MarkedPaid);
    assert!(paid.marked_at.is_some());

    let approved = service.approve_settlement(&settlement.id).await.unwrap();
    assert_eq!(approved.status, SettlementStatus::Approved);
    assert!(approved.approved_at.is_some());
    let payment_id = approved.payment_expense_id.clone().unwrap();

    let expenses = service.list_expenses(&group.id).await.unwrap();
    let payment = expenses.iter().find(|e| e.id == payment_id).unwrap();
    assert!(payment.is_payment);
    assert_eq!(payment.payer, ids[1]);
    assert_eq!(payment.amount, Money::from_cents(5_000));

    let settled = service.get_balance_report(&group.id).await.unwrap();
    assert!(settled.settlements.is_empty());
    assert!(settled.balances.iter().all(|b| b.balance.is_zero()));
    assert_eq!(settled.total_spending, Money::from_cents(10_000));

    let ben = service.get_member_summary(&group.id, &ids[1]).await.unwrap();
    assert_eq!(ben.total_paid, Money::from_cents(5_000));
    assert_eq!(ben.total_owed, Money::from_cents(5_000));
    assert_eq!(ben.net_balance, Money::ZERO);

    let actions: Vec<String> = service
        .get_activity(&group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(
        &actions[actions.len() - 3..],
        &[SETTLEMENT_REQUESTED, SETTLEMENT_MARKED_PAID, SETTLEMENT_APPROVED]
    );
}

#[tokio::test]
async fn test_partial_settlement_leaves_remainder() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben", "Cai"]).await;
    service
        .add_expense(&group.id, equal_expense("Hotel", 9_000, &ids[0], &ids))
        .await
        .unwrap();

    let settlement = service
        .request_settlement(&group.id, &ids[1], &ids[0], Money::from_cents(1_000), None)
        .await
        .unwrap();
    service.approve_settlement(&settlement.id).await.unwrap();

    let report = service.get_balance_report(&group.id).await.unwrap();
    let ana = report.balances.iter().find(|b| b.member_id == ids[0]).unwrap();
    let ben = report.balances.iter().find(|b| b.member_id == ids[1]).unwrap();
    assert_eq!(ana.balance, Money::from_cents(5_000));
    assert_eq!(ben.balance, Money::from_cents(-2_000));
    assert_eq!(report.settlements.len(), 2);
    assert_eq!(report.settlements[0].from, ids[2]);
    assert_eq!(report.settlements[0].amount, Money::from_cents(3_000));
}

#[tokio::test]
async fn test_invalid_settlement_requests() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;

    assert_eq!(
        service
            .request_settlement(&group.id, &ids[0], &ids[0], Money::from_cents(100), None)
            .await
            .unwrap_err(),
        SplitError::SelfSettlement
    );
    assert!(matches!(
        service
            .request_settlement(&group.id, &ids[0], &ids[1], Money::from_cents(-100), None)
            .await,
        Err(SplitError::InvalidInput(field, _)) if field == "amount"
    ));
    assert!(matches!(
        service
            .request_settlement(&group.id, &ids[0], &"ghost".into(), Money::from_cents(100), None)
            .await,
        Err(SplitError::NotGroupMember(_))
    ));
    assert!(matches!(
        service
            .request_settlement(&group.id, &ids[0], &ids[1], Money::from_cents(100_000_001), None)
            .await,
        Err(SplitError::InvalidInput(_, detail)) if detail.title == "Amount Too Large"
    ));
    assert!(service.list_settlements(&group.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settlement_transitions_are_one_way() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;

    let direct = service
        .request_settlement(&group.id, &ids[1], &ids[0], Money::from_cents(500), None)
        .await
        .unwrap();
    service.approve_settlement(&direct.id).await.unwrap();

    assert_eq!(
        service.approve_settlement(&direct.id).await.unwrap_err(),
        SplitError::InvalidSettlementTransition {
            id: direct.id.clone(),
            from: SettlementStatus::Approved.to_string(),
            to: SettlementStatus::Approved.to_string(),
        }
    );
    assert!(matches!(
        service.mark_settlement_paid(&direct.id).await,
        Err(SplitError::InvalidSettlementTransition { .. })
    ));

    let marked = service
        .request_settlement(&group.id, &ids[0], &ids[1], Money::from_cents(500), None)
        .await
        .unwrap();
    service.mark_settlement_paid(&marked.id).await.unwrap();
    assert!(matches!(
        service.mark_settlement_paid(&marked.id).await,
        Err(SplitError::InvalidSettlementTransition { .. })
    ));

    assert!(matches!(
        service.approve_settlement("missing").await,
        Err(SplitError::SettlementNotFound(_))
    ));

    let settlements = service.list_settlements(&group.id).await.unwrap();
    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0].id, direct.id);
    assert_eq!(settlements[1].status, SettlementStatus::MarkedPaid);
}

#[tokio::test]
async fn test_payment_expenses_cannot_be_edited() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;
    service
        .add_expense(&group.id, equal_expense("Dinner", 10_000, &ids[0], &ids))
        .await
        .unwrap();
    let settlement = service
        .request_settlement(&group.id, &ids[1], &ids[0], Money::from_cents(5_000), None)
        .await
        .unwrap();
    let approved = service.approve_settlement(&settlement.id).await.unwrap();
    let payment_id = approved.payment_expense_id.unwrap();

    assert_eq!(
        service
            .update_expense(&payment_id, equal_expense("Refund", 9_000, &ids[1], &ids))
            .await
            .unwrap_err(),
        SplitError::PaymentExpenseLocked(payment_id.clone())
    );
    assert_eq!(
        service.delete_expense(&payment_id).await.unwrap_err(),
        SplitError::PaymentExpenseLocked(payment_id.clone())
    );

    let expenses = service.list_expenses(&group.id).await.unwrap();
    let payment = expenses.iter().find(|e| e.id == payment_id).unwrap();
    assert!(payment.is_payment);
    assert_eq!(payment.amount, Money::from_cents(5_000));

    let report = service.get_balance_report(&group.id).await.unwrap();
    assert!(report.balances.iter().all(|b| b.balance.is_zero()));
}
