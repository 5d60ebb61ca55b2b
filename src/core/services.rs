use crate::constants::{
    EXPENSE_ADDED, EXPENSE_DELETED, EXPENSE_UPDATED, GROUP_CREATED, GROUP_SETTLED, MAX_AMOUNT_CENTS,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MEMBER_ADDED, MEMBER_REMOVED, SETTLEMENT_APPROVED,
    SETTLEMENT_MARKED_PAID, SETTLEMENT_REQUESTED,
};
use crate::core::engine::{self, UnknownMemberPolicy};
use crate::core::errors::{FieldError, SplitError};
use crate::core::models::{
    ActivityEntry, BalanceReport, Expense, Group, Member, MemberBalance, MemberId, MemberSummary, NewExpense,
    Settlement, SettlementStatus, Split,
};
use crate::core::money::Money;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

pub struct SplitService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    policy: UnknownMemberPolicy,
    cache_ttl: Duration,
}

impl<L: LoggingService, S: Storage, C: Cache> SplitService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, policy: UnknownMemberPolicy) -> Self {
        SplitService {
            storage,
            logging,
            cache,
            policy,
            cache_ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    async fn fetch_group(&self, group_id: &str) -> Result<Group, SplitError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| SplitError::GroupNotFound(group_id.to_string()))
    }

    async fn fetch_expense(&self, expense_id: &str) -> Result<Expense, SplitError> {
        self.storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| SplitError::ExpenseNotFound(expense_id.to_string()))
    }

    /// Fetches an expense that callers may edit or delete. Payment expenses
    /// back approved settlements and stay as recorded.
    async fn fetch_editable_expense(&self, expense_id: &str) -> Result<(Expense, Group), SplitError> {
        let expense = self.fetch_expense(expense_id).await?;
        if expense.is_payment {
            warn!("Rejected change to payment expense {}", expense.id);
            return Err(SplitError::PaymentExpenseLocked(expense.id));
        }
        let group = self.fetch_group(&expense.group_id).await?;
        ensure_open(&group)?;
        Ok((expense, group))
    }

    /// Appends to the activity feed and drops the group's cached balances.
    async fn record_change(&self, group_id: &str, action: &str, details: serde_json::Value) -> Result<(), SplitError> {
        self.cache.invalidate_group(group_id).await?;
        self.logging.log_action(group_id, action, details).await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), SplitError> {
        if value.trim().is_empty() {
            return Err(SplitError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.chars().count() > max_length {
            return Err(SplitError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(SplitError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Money) -> Result<(), SplitError> {
        if !amount.is_positive() {
            return Err(SplitError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount.cents() > MAX_AMOUNT_CENTS {
            return Err(SplitError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", Money::from_cents(MAX_AMOUNT_CENTS)),
                },
            ));
        }
        Ok(())
    }

    fn validate_new_expense(&self, group: &Group, expense: &NewExpense) -> Result<(), SplitError> {
        self.validate_string_input("description", &expense.description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_amount_input("amount", expense.amount)?;

        if !group.has_member(&expense.payer) {
            warn!("Payer {} not in group {}", expense.payer, group.id);
            return Err(SplitError::NotGroupMember(expense.payer.to_string()));
        }
        if let Some(outsider) = expense.split.members().into_iter().find(|m| !group.has_member(m)) {
            warn!("Split member {} not in group {}", outsider, group.id);
            return Err(SplitError::NotGroupMember(outsider.to_string()));
        }

        match &expense.split {
            Split::Equal { participants } if participants.is_empty() => {
                Err(SplitError::EmptyParticipants(expense.description.clone()))
            }
            Split::Equal { .. } => Ok(()),
            Split::Explicit { shares } => {
                if shares.is_empty() {
                    return Err(SplitError::EmptyParticipants(expense.description.clone()));
                }
                if shares.values().any(|share| share.is_negative()) {
                    return Err(SplitError::InvalidSplit);
                }
                let share_sum = Money::checked_sum(shares.values().copied()).ok_or(SplitError::InvalidSplit)?;
                if share_sum != expense.amount {
                    warn!("Explicit shares sum {} does not match amount {}", share_sum, expense.amount);
                    return Err(SplitError::InvalidSplit);
                }
                Ok(())
            }
        }
    }

    // GROUPS & MEMBERS

    pub async fn create_group(&self, name: String, member_names: Vec<String>) -> Result<Group, SplitError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        for member_name in &member_names {
            self.validate_string_input("member_name", member_name, MAX_NAME_LENGTH)?;
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            members: member_names
                .into_iter()
                .map(|member_name| Member::new(Uuid::new_v4().to_string(), member_name.trim()))
                .collect(),
            former_members: Vec::new(),
            created_at: Utc::now(),
            is_settled: false,
            settled_at: None,
        };
        self.storage.save_group(group.clone()).await?;
        info!("Created group {} with {} members", group.id, group.members.len());

        self.record_change(
            &group.id,
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "member_ids": group.members.iter().map(|m| m.id.to_string()).collect::<Vec<_>>()
            }),
        )
        .await?;
        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, SplitError> {
        self.fetch_group(group_id).await
    }

    /// All groups, newest first. Settled groups are included and carry
    /// `is_settled`.
    pub async fn list_groups(&self) -> Result<Vec<Group>, SplitError> {
        self.storage.list_groups().await
    }

    /// Marks the group settled and archives it. Balances are left as they
    /// are; the group stops accepting expense changes.
    pub async fn settle_group(&self, group_id: &str) -> Result<Group, SplitError> {
        let group = self
            .storage
            .update_group(group_id, |group| {
                ensure_open(group)?;
                group.is_settled = true;
                group.settled_at = Some(Utc::now());
                Ok(group.clone())
            })
            .await?;
        info!("Group {} settled", group.id);

        self.record_change(
            group_id,
            GROUP_SETTLED,
            json!({ "group_id": group.id, "settled_at": group.settled_at }),
        )
        .await?;
        Ok(group)
    }

    pub async fn add_member(&self, group_id: &str, name: String) -> Result<Member, SplitError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;

        let member = Member::new(Uuid::new_v4().to_string(), name.trim());
        let added = member.clone();
        self.storage
            .update_group(group_id, move |group| {
                group.members.push(added);
                Ok(())
            })
            .await?;
        debug!("Member {} added to group {}", member.id, group_id);

        self.record_change(
            group_id,
            MEMBER_ADDED,
            json!({ "group_id": group_id, "member_id": member.id, "name": member.name }),
        )
        .await?;
        Ok(member)
    }

    /// Removes a member from the group. Expenses that reference them are kept
    /// and the member keeps an account as a former member.
    pub async fn remove_member(&self, group_id: &str, member_id: &MemberId) -> Result<Member, SplitError> {
        let member = self
            .storage
            .update_group(group_id, |group| {
                let position = group
                    .members
                    .iter()
                    .position(|m| m.id == *member_id)
                    .ok_or_else(|| SplitError::NotGroupMember(member_id.to_string()))?;
                let member = group.members.remove(position);
                group.former_members.push(member.clone());
                Ok(member)
            })
            .await?;
        debug!("Member {} removed from group {}", member.id, group_id);

        self.record_change(
            group_id,
            MEMBER_REMOVED,
            json!({ "group_id": group_id, "member_id": member.id, "name": member.name }),
        )
        .await?;
        Ok(member)
    }

    // EXPENSES

    pub async fn add_expense(&self, group_id: &str, new_expense: NewExpense) -> Result<Expense, SplitError> {
        let group = self.fetch_group(group_id).await?;
        ensure_open(&group)?;
        self.validate_new_expense(&group, &new_expense)?;

        let mut expense = Expense::new(
            group_id,
            new_expense.description.trim(),
            new_expense.amount,
            new_expense.payer,
            new_expense.split,
        );
        expense.receipt_uri = new_expense.receipt_uri;
        self.storage.save_expense(expense.clone()).await?;
        info!("Expense {} of {} added to group {}", expense.id, expense.amount, group_id);

        self.record_change(
            group_id,
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "description": expense.description,
                "amount": expense.amount,
                "payer": expense.payer
            }),
        )
        .await?;
        Ok(expense)
    }

    pub async fn update_expense(&self, expense_id: &str, changes: NewExpense) -> Result<Expense, SplitError> {
        let (existing, group) = self.fetch_editable_expense(expense_id).await?;
        self.validate_new_expense(&group, &changes)?;

        let updated = Expense {
            description: changes.description.trim().to_string(),
            amount: changes.amount,
            payer: changes.payer,
            split: changes.split,
            receipt_uri: changes.receipt_uri,
            updated_at: Utc::now(),
            ..existing
        };
        self.storage.save_expense(updated.clone()).await?;
        debug!("Expense {} updated", updated.id);

        self.record_change(
            &group.id,
            EXPENSE_UPDATED,
            json!({ "expense_id": updated.id, "amount": updated.amount, "payer": updated.payer }),
        )
        .await?;
        Ok(updated)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<Expense, SplitError> {
        self.fetch_editable_expense(expense_id).await?;
        let expense = self
            .storage
            .delete_expense(expense_id)
            .await?
            .ok_or_else(|| SplitError::ExpenseNotFound(expense_id.to_string()))?;
        debug!("Expense {} deleted from group {}", expense.id, expense.group_id);

        self.record_change(
            &expense.group_id,
            EXPENSE_DELETED,
            json!({ "expense_id": expense.id, "description": expense.description, "amount": expense.amount }),
        )
        .await?;
        Ok(expense)
    }

    pub async fn list_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SplitError> {
        self.fetch_group(group_id).await?;
        self.storage.get_group_expenses(group_id).await
    }

    // BALANCES & SUMMARIES

    /// Balances and suggested transfers for a group, recomputed from the
    /// current expense list unless a fresh cached report exists.
    pub async fn get_balance_report(&self, group_id: &str) -> Result<BalanceReport, SplitError> {
        if let Some(report) = self.cache.get_balance_report(group_id).await? {
            debug!("Balance report for group {} served from cache", group_id);
            return Ok(report);
        }

        // Read before the snapshot so a concurrent change keeps this report out of the cache.
        let generation = self.cache.generation(group_id).await?;
        let (group, expenses) =
            futures::try_join!(self.fetch_group(group_id), self.storage.get_group_expenses(group_id))?;
        let accounts: Vec<Member> = group.all_members().cloned().collect();

        let balances = engine::calculate_balances(&expenses, &accounts, self.policy)?;
        let settlements = engine::calculate_settlements(&balances)?;

        let member_balances = group
            .members
            .iter()
            .map(|m| (m, true))
            .chain(group.former_members.iter().map(|m| (m, false)))
            .filter_map(|(member, active)| {
                let balance = balances.get(&member.id).copied().unwrap_or(Money::ZERO);
                (active || !balance.is_zero()).then(|| MemberBalance {
                    member_id: member.id.clone(),
                    name: member.name.clone(),
                    balance,
                    active,
                })
            })
            .collect();

        let report = BalanceReport {
            group_id: group_id.to_string(),
            balances: member_balances,
            settlements,
            total_spending: engine::total_spending(&expenses)?,
        };
        if !self
            .cache
            .save_balance_report(group_id, &report, self.cache_ttl, generation)
            .await?
        {
            debug!("Group {} changed while computing its balance report; not cached", group_id);
        }
        info!(
            "Balance report for group {}: {} suggested transfers",
            group_id,
            report.settlements.len()
        );
        Ok(report)
    }

    pub async fn get_member_summary(&self, group_id: &str, member_id: &MemberId) -> Result<MemberSummary, SplitError> {
        let group = self.fetch_group(group_id).await?;
        if !group.all_members().any(|m| m.id == *member_id) {
            return Err(SplitError::MemberNotFound(member_id.to_string()));
        }
        let expenses = self.storage.get_group_expenses(group_id).await?;
        engine::member_summary(&expenses, member_id)
    }

    /// Summaries from a single expense snapshot: every current member, then
    /// former members whose balance is not yet zero, matching the balance report.
    pub async fn get_member_summaries(&self, group_id: &str) -> Result<Vec<MemberSummary>, SplitError> {
        let group = self.fetch_group(group_id).await?;
        let expenses = self.storage.get_group_expenses(group_id).await?;

        let mut summaries = group
            .members
            .iter()
            .map(|m| engine::member_summary(&expenses, &m.id))
            .collect::<Result<Vec<_>, _>>()?;
        for former in &group.former_members {
            let summary = engine::member_summary(&expenses, &former.id)?;
            if !summary.net_balance.is_zero() {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    // SETTLEMENTS

    pub async fn request_settlement(
        &self,
        group_id: &str,
        from: &MemberId,
        to: &MemberId,
        amount: Money,
        remarks: Option<String>,
    ) -> Result<Settlement, SplitError> {
        let group = self.fetch_group(group_id).await?;
        if from == to {
            return Err(SplitError::SelfSettlement);
        }
        for member_id in [from, to] {
            if !group.has_member(member_id) {
                return Err(SplitError::NotGroupMember(member_id.to_string()));
            }
        }
        self.validate_amount_input("amount", amount)?;
        if let Some(ref text) = remarks {
            self.validate_string_input("remarks", text, MAX_DESCRIPTION_LENGTH)?;
        }

        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            from: from.clone(),
            to: to.clone(),
            amount,
            remarks,
            status: SettlementStatus::Requested,
            created_at: Utc::now(),
            marked_at: None,
            approved_at: None,
            payment_expense_id: None,
        };
        self.storage.save_settlement(settlement.clone()).await?;

        self.logging
            .log_action(
                group_id,
                SETTLEMENT_REQUESTED,
                json!({ "settlement_id": settlement.id, "from": from, "to": to, "amount": amount }),
            )
            .await?;
        Ok(settlement)
    }

    pub async fn mark_settlement_paid(&self, settlement_id: &str) -> Result<Settlement, SplitError> {
        let settlement = self
            .storage
            .update_settlement(settlement_id, |settlement| {
                check_transition(settlement, SettlementStatus::MarkedPaid)?;
                settlement.status = SettlementStatus::MarkedPaid;
                settlement.marked_at = Some(Utc::now());
                Ok(settlement.clone())
            })
            .await?;

        self.logging
            .log_action(
                &settlement.group_id,
                SETTLEMENT_MARKED_PAID,
                json!({ "settlement_id": settlement.id, "amount": settlement.amount }),
            )
            .await?;
        Ok(settlement)
    }

    /// Confirms receipt of a settlement and records it as a payment expense,
    /// so the next balance computation reflects it. The status change is a
    /// single storage step, so a settlement is approved at most once.
    pub async fn approve_settlement(&self, settlement_id: &str) -> Result<Settlement, SplitError> {
        let (settlement, payment) = self
            .storage
            .update_settlement(settlement_id, |settlement| {
                check_transition(settlement, SettlementStatus::Approved)?;
                let payment = Expense::payment(
                    &settlement.group_id,
                    settlement.from.clone(),
                    settlement.to.clone(),
                    settlement.amount,
                );
                settlement.status = SettlementStatus::Approved;
                settlement.approved_at = Some(Utc::now());
                settlement.payment_expense_id = Some(payment.id.clone());
                Ok((settlement.clone(), payment))
            })
            .await?;

        self.storage.save_expense(payment.clone()).await?;
        info!(
            "Settlement {} approved: {} paid {} {}",
            settlement.id, settlement.from, settlement.to, settlement.amount
        );

        self.record_change(
            &settlement.group_id,
            SETTLEMENT_APPROVED,
            json!({ "settlement_id": settlement.id, "payment_expense_id": payment.id, "amount": settlement.amount }),
        )
        .await?;
        Ok(settlement)
    }

    pub async fn list_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SplitError> {
        self.fetch_group(group_id).await?;
        self.storage.get_group_settlements(group_id).await
    }

    // ACTIVITY

    pub async fn get_activity(&self, group_id: &str) -> Result<Vec<ActivityEntry>, SplitError> {
        self.fetch_group(group_id).await?;
        self.logging.get_group_activity(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<ActivityEntry>, SplitError> {
        self.logging.get_logs().await
    }
}

fn ensure_open(group: &Group) -> Result<(), SplitError> {
    if group.is_settled {
        return Err(SplitError::GroupSettled(group.id.clone()));
    }
    Ok(())
}

fn check_transition(settlement: &Settlement, next: SettlementStatus) -> Result<(), SplitError> {
    let allowed = matches!(
        (settlement.status, next),
        (SettlementStatus::Requested, SettlementStatus::MarkedPaid)
            | (SettlementStatus::Requested, SettlementStatus::Approved)
            | (SettlementStatus::MarkedPaid, SettlementStatus::Approved)
    );
    if !allowed {
        warn!(
            "Rejected settlement {} transition {} -> {}",
            settlement.id, settlement.status, next
        );
        return Err(SplitError::InvalidSettlementTransition {
            id: settlement.id.clone(),
            from: settlement.status.to_string(),
            to: next.to_string(),
        });
    }
    Ok(())
}
