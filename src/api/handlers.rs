use crate::{
    api::models::*,
    core::{
        models::{
            ActivityEntry, BalanceReport, Expense, Group, Member, MemberId, MemberSummary, NewExpense, Settlement,
        },
        services::SplitService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

pub type AppService = SplitService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/settle", post(settle_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/members/{member_id}", delete(remove_member))
        .route("/groups/{group_id}/members/{member_id}/summary", get(get_member_summary))
        .route("/groups/{group_id}/summaries", get(get_member_summaries))
        .route("/groups/{group_id}/expenses", post(add_expense).get(list_expenses))
        .route("/expenses/{expense_id}", put(update_expense).delete(delete_expense))
        .route("/groups/{group_id}/balances", get(get_balances))
        .route(
            "/groups/{group_id}/settlements",
            post(request_settlement).get(list_settlements),
        )
        .route("/settlements/{settlement_id}/pay", post(mark_settlement_paid))
        .route("/settlements/{settlement_id}/approve", post(approve_settlement))
        .route("/groups/{group_id}/activity", get(get_activity))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(req.name, req.member_names).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group retrieved successfully", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "All groups, newest first", body = Vec<Group>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_groups(State(service): State<Arc<AppService>>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/settle",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group settled and archived", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group already settled", body = ErrorResponse)
    )
)]
pub async fn settle_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.settle_group(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Member added", body = Member),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let member = service.add_member(&group_id, req.name).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/members/{member_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("member_id" = String, Path, description = "ID of the member to remove")
    ),
    responses(
        (status = 200, description = "Member removed", body = Member),
        (status = 400, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn remove_member(
    State(service): State<Arc<AppService>>,
    Path((group_id, member_id)): Path<(String, String)>,
) -> Result<Json<Member>, ApiError> {
    let member = service.remove_member(&group_id, &MemberId(member_id)).await?;
    Ok(Json(member))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/members/{member_id}/summary",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("member_id" = String, Path, description = "ID of the member")
    ),
    responses(
        (status = 200, description = "Paid/owed summary", body = MemberSummary),
        (status = 404, description = "Group or member not found", body = ErrorResponse)
    )
)]
pub async fn get_member_summary(
    State(service): State<Arc<AppService>>,
    Path((group_id, member_id)): Path<(String, String)>,
) -> Result<Json<MemberSummary>, ApiError> {
    let summary = service.get_member_summary(&group_id, &MemberId(member_id)).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/summaries",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Summaries of all current members", body = Vec<MemberSummary>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_member_summaries(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<MemberSummary>>, ApiError> {
    Ok(Json(service.get_member_summaries(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    request_body = NewExpense,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Expense added", body = Expense),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = service.add_expense(&group_id, req).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/expenses",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Expenses, newest first", body = Vec<Expense>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_expenses(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    Ok(Json(service.list_expenses(&group_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{expense_id}",
    request_body = NewExpense,
    params(
        ("expense_id" = String, Path, description = "ID of the expense")
    ),
    responses(
        (status = 200, description = "Expense updated", body = Expense),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub async fn update_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
    Json(req): Json<NewExpense>,
) -> Result<Json<Expense>, ApiError> {
    Ok(Json(service.update_expense(&expense_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense")
    ),
    responses(
        (status = 200, description = "Expense deleted", body = Expense),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub async fn delete_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    Ok(Json(service.delete_expense(&expense_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/balances",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Balances and suggested settlements", body = BalanceReport),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 422, description = "Expense data is inconsistent", body = ErrorResponse)
    )
)]
pub async fn get_balances(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<BalanceReport>, ApiError> {
    Ok(Json(service.get_balance_report(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/settlements",
    request_body = SettlementRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Settlement requested", body = Settlement),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn request_settlement(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<SettlementRequest>,
) -> Result<(StatusCode, Json<Settlement>), ApiError> {
    let settlement = service
        .request_settlement(&group_id, &req.from, &req.to, req.amount, req.remarks)
        .await?;
    Ok((StatusCode::CREATED, Json(settlement)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/settlements",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Recorded settlements", body = Vec<Settlement>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_settlements(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    Ok(Json(service.list_settlements(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/settlements/{settlement_id}/pay",
    params(
        ("settlement_id" = String, Path, description = "ID of the settlement")
    ),
    responses(
        (status = 200, description = "Settlement marked as paid", body = Settlement),
        (status = 404, description = "Settlement not found", body = ErrorResponse),
        (status = 409, description = "Settlement is past this state", body = ErrorResponse)
    )
)]
pub async fn mark_settlement_paid(
    State(service): State<Arc<AppService>>,
    Path(settlement_id): Path<String>,
) -> Result<Json<Settlement>, ApiError> {
    Ok(Json(service.mark_settlement_paid(&settlement_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/settlements/{settlement_id}/approve",
    params(
        ("settlement_id" = String, Path, description = "ID of the settlement")
    ),
    responses(
        (status = 200, description = "Settlement approved and recorded as payment", body = Settlement),
        (status = 404, description = "Settlement not found", body = ErrorResponse),
        (status = 409, description = "Settlement already approved", body = ErrorResponse)
    )
)]
pub async fn approve_settlement(
    State(service): State<Arc<AppService>>,
    Path(settlement_id): Path<String>,
) -> Result<Json<Settlement>, ApiError> {
    Ok(Json(service.approve_settlement(&settlement_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/activity",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group activity feed", body = Vec<ActivityEntry>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_activity(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    Ok(Json(service.get_activity(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Activity across all groups", body = Vec<ActivityEntry>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
