//! Domain error model.

use thiserror::Error;

use crate::money::Amount;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (credentials,
/// lookups, funds, uniqueness). Persistence failures belong to the ledger
/// crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown account name or PIN mismatch. The two cases are not
    /// distinguished on purpose.
    #[error("invalid credentials")]
    Authentication,

    /// No account with the given name.
    #[error("account not found: {name}")]
    AccountNotFound { name: String },

    /// No account registered under the given phone number.
    #[error("no account registered for phone number {phone}")]
    PhoneNotFound { phone: String },

    /// A debit would drive the balance negative.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("account name already exists: {0}")]
    DuplicateName(String),

    #[error("phone number already registered: {0}")]
    DuplicatePhone(String),

    /// A value failed validation (e.g. non-positive amount, blank name).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn account_not_found(name: impl Into<String>) -> Self {
        Self::AccountNotFound { name: name.into() }
    }

    pub fn phone_not_found(phone: impl Into<String>) -> Self {
        Self::PhoneNotFound { phone: phone.into() }
    }

    pub fn insufficient_funds(requested: Amount, available: Amount) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// True for the lookup failures (unknown account, unmatched phone).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound { .. } | Self::PhoneNotFound { .. })
    }
}
