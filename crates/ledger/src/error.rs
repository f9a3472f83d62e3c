use thiserror::Error;

use ledgerdesk_core::DomainError;

use crate::sink::SinkError;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failure of a ledger operation.
///
/// Domain failures are deterministic and reported to the caller as-is.
/// Persistence failures mean the snapshot could not be written; the
/// in-memory book is left untouched in that case.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] SinkError),
}

impl LedgerError {
    /// The domain error, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            LedgerError::Domain(e) => Some(e),
            LedgerError::Persistence(_) => None,
        }
    }
}
