use super::{create_test_service, create_trip, equal_expense};
use crate::constants::{GROUP_CREATED, GROUP_SETTLED, MEMBER_ADDED, MEMBER_REMOVED};
use crate::core::errors::SplitError;
use crate::core::models::MemberId;
use crate::core::money::Money;

#[tokio::test]
async fn test_create_group_with_members() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    let group = service
        .create_group("Lisbon".to_string(), vec!["Ana".to_string(), " Ben ".to_string()])
        .await
        .unwrap();
    assert_eq!(group.name, "Lisbon");
    assert_eq!(group.members.len(), 2);
    assert_eq!(group.members[1].name, "Ben");
    assert!(group.former_members.is_empty());
    assert_ne!(group.members[0].id, group.members[1].id);

    let fetched = service.get_group(&group.id).await.unwrap();
    assert_eq!(fetched.members, group.members);

    let activity = service.get_activity(&group.id).await.unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].action, GROUP_CREATED);
}

#[tokio::test]
async fn test_create_group_validates_names() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    assert!(matches!(
        service.create_group("  ".to_string(), vec![]).await,
        Err(SplitError::InvalidInput(field, _)) if field == "name"
    ));
    assert!(matches!(
        service.create_group("Trip".to_string(), vec!["<script>".to_string()]).await,
        Err(SplitError::InvalidInput(field, _)) if field == "member_name"
    ));
    assert!(matches!(
        service.create_group("x".repeat(101), vec![]).await,
        Err(SplitError::InvalidInput(_, detail)) if detail.title == "name Too Long"
    ));
    assert!(service.get_app_logs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_group_is_reported() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    assert_eq!(
        service.get_group("nope").await.unwrap_err(),
        SplitError::GroupNotFound("nope".to_string())
    );
    assert!(matches!(service.get_balance_report("nope").await, Err(SplitError::GroupNotFound(_))));
    assert!(matches!(service.get_activity("nope").await, Err(SplitError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_added_member_starts_at_zero() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;
    service
        .add_expense(&group.id, equal_expense("Dinner", 10_000, &ids[0], &ids))
        .await
        .unwrap();

    let cai = service.add_member(&group.id, "Cai".to_string()).await.unwrap();

    let report = service.get_balance_report(&group.id).await.unwrap();
    let cai_balance = report.balances.iter().find(|b| b.member_id == cai.id).unwrap();
    assert_eq!(cai_balance.balance, Money::ZERO);
    assert!(cai_balance.active);

    let summaries = service.get_member_summaries(&group.id).await.unwrap();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[2].member_id, cai.id);
    assert_eq!(summaries[2].net_balance, Money::ZERO);
}

#[tokio::test]
async fn test_removed_member_keeps_their_balance() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben", "Cai"]).await;
    service
        .add_expense(&group.id, equal_expense("Hotel", 9_000, &ids[0], &ids))
        .await
        .unwrap();

    let removed = service.remove_member(&group.id, &ids[2]).await.unwrap();
    assert_eq!(removed.name, "Cai");

    let group = service.get_group(&group.id).await.unwrap();
    assert!(!group.has_member(&ids[2]));
    assert_eq!(group.former_members.len(), 1);

    let report = service.get_balance_report(&group.id).await.unwrap();
    let cai = report.balances.iter().find(|b| b.member_id == ids[2]).unwrap();
    assert!(!cai.active);
    assert_eq!(cai.balance, Money::from_cents(-3_000));
    assert!(report.settlements.iter().any(|s| s.from == ids[2] && s.to == ids[0]));

    let summary = service.get_member_summary(&group.id, &ids[2]).await.unwrap();
    assert_eq!(summary.total_owed, Money::from_cents(3_000));

    // Former members cannot be charged for new expenses.
    assert!(matches!(
        service.add_expense(&group.id, equal_expense("Taxi", 1_000, &ids[0], &ids)).await,
        Err(SplitError::NotGroupMember(_))
    ));

    // Summaries list the same accounts as the report.
    let summaries = service.get_member_summaries(&group.id).await.unwrap();
    assert_eq!(summaries.len(), report.balances.len());
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[2].member_id, ids[2]);
    assert_eq!(summaries[2].net_balance, Money::from_cents(-3_000));
}

#[tokio::test]
async fn test_settled_former_member_leaves_the_report() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben", "Cai"]).await;
    service
        .add_expense(&group.id, equal_expense("Dinner", 4_000, &ids[0], &ids[..2]))
        .await
        .unwrap();

    service.remove_member(&group.id, &ids[2]).await.unwrap();

    let report = service.get_balance_report(&group.id).await.unwrap();
    assert_eq!(report.balances.len(), 2);
    assert!(report.balances.iter().all(|b| b.active));

    let summaries = service.get_member_summaries(&group.id).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.member_id != ids[2]));
}

#[tokio::test]
async fn test_remove_member_twice_fails() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;

    service.remove_member(&group.id, &ids[1]).await.unwrap();
    assert_eq!(
        service.remove_member(&group.id, &ids[1]).await.unwrap_err(),
        SplitError::NotGroupMember(ids[1].to_string())
    );

    let actions: Vec<String> = service
        .get_activity(&group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(actions, vec![GROUP_CREATED, MEMBER_REMOVED]);
}

#[tokio::test]
async fn test_summary_for_unknown_member() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, _) = create_trip(&service, &["Ana"]).await;

    assert_eq!(
        service
            .get_member_summary(&group.id, &MemberId::from("ghost"))
            .await
            .unwrap_err(),
        SplitError::MemberNotFound("ghost".to_string())
    );
}

#[tokio::test]
async fn test_activity_is_scoped_per_group() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (first, _) = create_trip(&service, &["Ana"]).await;
    let (second, _) = create_trip(&service, &["Ben"]).await;
    service.add_member(&first.id, "Cai".to_string()).await.unwrap();

    let first_actions: Vec<String> = service
        .get_activity(&first.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(first_actions, vec![GROUP_CREATED, MEMBER_ADDED]);
    assert_eq!(service.get_activity(&second.id).await.unwrap().len(), 1);
    assert_eq!(service.get_app_logs().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_groups_newest_first() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    assert!(service.list_groups().await.unwrap().is_empty());

    let (first, _) = create_trip(&service, &["Ana"]).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (second, _) = create_trip(&service, &["Ben"]).await;

    let ids: Vec<String> = service
        .list_groups()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_settle_group_closes_it_for_expenses() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let (group, ids) = create_trip(&service, &["Ana", "Ben"]).await;
    let dinner = service
        .add_expense(&group.id, equal_expense("Dinner", 6_000, &ids[0], &ids))
        .await
        .unwrap();
    assert!(!group.is_settled);
    assert!(group.settled_at.is_none());

    let settled = service.settle_group(&group.id).await.unwrap();
    assert!(settled.is_settled);
    assert!(settled.settled_at.is_some());
    assert!(service.get_group(&group.id).await.unwrap().is_settled);
    assert!(service.list_groups().await.unwrap()[0].is_settled);

    assert_eq!(
        service.settle_group(&group.id).await.unwrap_err(),
        SplitError::GroupSettled(group.id.clone())
    );
    assert_eq!(
        service
            .add_expense(&group.id, equal_expense("Taxi", 1_000, &ids[1], &ids))
            .await
            .unwrap_err(),
        SplitError::GroupSettled(group.id.clone())
    );
    assert_eq!(
        service
            .update_expense(&dinner.id, equal_expense("Dinner", 8_000, &ids[0], &ids))
            .await
            .unwrap_err(),
        SplitError::GroupSettled(group.id.clone())
    );
    assert_eq!(
        service.delete_expense(&dinner.id).await.unwrap_err(),
        SplitError::GroupSettled(group.id.clone())
    );

    // Balances are still readable after settling.
    let report = service.get_balance_report(&group.id).await.unwrap();
    assert_eq!(report.total_spending, Money::from_cents(6_000));

    let actions: Vec<String> = service
        .get_activity(&group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(actions.last().map(String::as_str), Some(GROUP_SETTLED));
    assert_eq!(actions.iter().filter(|a| *a == GROUP_SETTLED).count(), 1);
}

#[tokio::test]
async fn test_settle_unknown_group() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    assert_eq!(
        service.settle_group("nope").await.unwrap_err(),
        SplitError::GroupNotFound("nope".to_string())
    );
}
