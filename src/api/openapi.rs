use utoipa::OpenApi;

use crate::{
    api::models::{AddMemberRequest, CreateGroupRequest, ErrorResponse, SettlementRequest},
    core::models::{
        ActivityEntry, BalanceReport, Expense, Group, Member, MemberBalance, MemberSummary, NewExpense, Settlement,
        SettlementStatus, SettlementSuggestion, Split,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::list_groups,
        super::handlers::settle_group,
        super::handlers::add_member,
        super::handlers::remove_member,
        super::handlers::get_member_summary,
        super::handlers::get_member_summaries,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::update_expense,
        super::handlers::delete_expense,
        super::handlers::get_balances,
        super::handlers::request_settlement,
        super::handlers::list_settlements,
        super::handlers::mark_settlement_paid,
        super::handlers::approve_settlement,
        super::handlers::get_activity,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateGroupRequest,
        AddMemberRequest,
        SettlementRequest,
        ErrorResponse,
        Group,
        Member,
        Expense,
        NewExpense,
        Split,
        BalanceReport,
        MemberBalance,
        MemberSummary,
        Settlement,
        SettlementStatus,
        SettlementSuggestion,
        ActivityEntry
    )),
    info(
        title = "Tripsplit API",
        description = "Shared trip expenses, balances and suggested settlements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
