//! HTTP application wiring (Axum routers for both services).
//!
//! - `routes/`: handlers, one file per service plus shared system routes
//! - `dto.rs`: request/query DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use ledgerdesk_ledger::DynLedgerStore;
use ledgerdesk_sports::SportsClient;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// The ledger every bank handler shares.
pub type SharedLedger = Arc<DynLedgerStore>;

/// Router of the bank service.
pub fn build_bank_app(ledger: SharedLedger, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::bank::router())
        .layer(Extension(ledger))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(middleware::bank_cors(allowed_origins)),
        )
}

/// Router of the sports proxy.
pub fn build_sports_app(client: Arc<SportsClient>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::sports::router())
        .layer(Extension(client))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(middleware::open_cors()),
        )
}
