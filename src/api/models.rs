use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::SplitError;
use crate::core::models::MemberId;
use crate::core::money::Money;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub member_names: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SettlementRequest {
    pub from: MemberId,
    pub to: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub remarks: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for SplitError to implement IntoResponse
pub struct ApiError(pub SplitError);

impl From<SplitError> for ApiError {
    fn from(err: SplitError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SplitError::InvalidAmount(_)
            | SplitError::AmountOutOfRange(_)
            | SplitError::EmptyParticipants(_)
            | SplitError::InvalidSplit
            | SplitError::SelfSettlement
            | SplitError::NotGroupMember(_)
            | SplitError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            SplitError::GroupNotFound(_)
            | SplitError::MemberNotFound(_)
            | SplitError::ExpenseNotFound(_)
            | SplitError::SettlementNotFound(_) => StatusCode::NOT_FOUND,
            SplitError::InvalidSettlementTransition { .. }
            | SplitError::PaymentExpenseLocked(_)
            | SplitError::GroupSettled(_) => StatusCode::CONFLICT,
            SplitError::UnknownMember { .. } | SplitError::UnbalancedBalances { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SplitError::StorageError(_) | SplitError::LoggingError(_) | SplitError::CacheError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
