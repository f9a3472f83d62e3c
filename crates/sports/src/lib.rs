//! Pass-through client for the upstream football statistics API.

pub mod client;
pub mod config;
pub mod error;
pub mod leagues;

pub use client::{API_KEY_HEADER, SportsClient};
pub use config::SportsConfig;
pub use error::UpstreamError;
pub use leagues::{DEFAULT_LAST_MATCHES, DEFAULT_SEASON, LEAGUES, League};
