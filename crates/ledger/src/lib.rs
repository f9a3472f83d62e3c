//! Bank ledger: accounts, transfers and full-snapshot persistence.
//!
//! - [`LedgerStore`]: the operations (authenticate, balance, deposit, withdraw, create account).
//! - [`AccountBook`]: the insertion-ordered account mapping and its JSON layout.
//! - [`LedgerSink`]: where snapshots go ([`JsonFileSink`], [`InMemorySink`]).

pub mod account;
pub mod error;
pub mod sink;
pub mod store;

pub use account::{Account, AccountBook};
pub use error::{LedgerError, LedgerResult};
pub use sink::{InMemorySink, JsonFileSink, LedgerSink, SinkError};
pub use store::{DynLedgerStore, LedgerStore, TransferOutcome};
