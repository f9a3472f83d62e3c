//! `ledgerdesk-core`: domain building blocks for the bank ledger.
//!
//! This crate contains **pure domain** primitives (no IO).

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{AccountName, PhoneNumber};
pub use money::Amount;
