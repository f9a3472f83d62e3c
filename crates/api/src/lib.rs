//! HTTP API: the bank ledger service and the sports stats proxy.

pub mod app;
pub mod config;
pub mod middleware;
pub mod server;
