use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SplitError {
    /// Amount is zero, negative, or carries more precision than cents
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount does not fit the fixed-point representation
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Expense has nobody to distribute its amount to
    #[error("Expense {0} has no participants")]
    EmptyParticipants(String),

    /// Payer or share holder is not part of the member list
    #[error("Expense {expense_id} references unknown member {member_id}")]
    UnknownMember { expense_id: String, member_id: String },

    /// Balances handed to the settlement reducer do not net to zero
    #[error("Balances do not sum to zero (residual {residual_cents} cents)")]
    UnbalancedBalances { residual_cents: i64 },

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Member {0} not found")]
    MemberNotFound(String),

    #[error("Member {0} is not a group member")]
    NotGroupMember(String),

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    #[error("Settlement {0} not found")]
    SettlementNotFound(String),

    /// Explicit shares don't add up to the expense amount
    #[error("Invalid split amounts")]
    InvalidSplit,

    /// Expense backs an approved settlement and cannot be edited or deleted
    #[error("Expense {0} records a settlement payment and cannot be changed")]
    PaymentExpenseLocked(String),

    /// Group was settled and archived
    #[error("Group {0} is already settled")]
    GroupSettled(String),

    #[error("Cannot create settlement to self")]
    SelfSettlement,

    #[error("Settlement {id} cannot move from {from} to {to}")]
    InvalidSettlementTransition { id: String, from: String, to: String },

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
