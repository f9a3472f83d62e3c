//! HTTP client for the upstream football statistics API.

use std::time::Duration;

use serde_json::Value;

use crate::config::SportsConfig;
use crate::error::UpstreamError;
use crate::leagues;

/// Header carrying the upstream API key.
pub const API_KEY_HEADER: &str = "x-apisports-key";

/// Thin pass-through client: responses are returned as raw JSON.
#[derive(Debug, Clone)]
pub struct SportsClient {
    http: reqwest::Client,
    config: SportsConfig,
}

impl SportsClient {
    pub fn new(config: SportsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SportsConfig {
        &self.config
    }

    /// League table for one season.
    pub async fn standings(&self, league: u32, season: u32) -> Result<Value, UpstreamError> {
        tracing::info!(
            league,
            league_name = leagues::find(league).map(|l| l.name),
            season,
            "fetching standings"
        );
        let query = [("league", league.to_string()), ("season", season.to_string())];
        self.get_json("/standings", &query, self.config.request_timeout)
            .await
    }

    /// The `last` most recent fixtures of a league season.
    pub async fn fixtures(&self, league: u32, season: u32, last: u32) -> Result<Value, UpstreamError> {
        tracing::info!(
            league,
            league_name = leagues::find(league).map(|l| l.name),
            season,
            last,
            "fetching fixtures"
        );
        let query = [
            ("league", league.to_string()),
            ("season", season.to_string()),
            ("last", last.to_string()),
        ];
        self.get_json("/fixtures", &query, self.config.request_timeout)
            .await
    }

    /// Upstream account/status check.
    ///
    /// Any response that arrives is relayed, whatever its status code; only
    /// transport and decoding failures are errors.
    pub async fn status(&self) -> Result<Value, UpstreamError> {
        let res = self.send("/status", &[], self.config.status_timeout).await?;
        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "upstream status check returned error status");
        }
        res.json().await.map_err(UpstreamError::request)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<reqwest::Response, UpstreamError> {
        let url = self.endpoint(path);
        self.http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "upstream request failed");
                UpstreamError::request(e)
            })
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value, UpstreamError> {
        let res = self.send(path, query, timeout).await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(endpoint = path, status = status.as_u16(), %body, "upstream returned error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = res.json().await.map_err(UpstreamError::request)?;
        tracing::info!(
            endpoint = path,
            results = data.get("results").and_then(serde_json::Value::as_u64).unwrap_or(0),
            "upstream response relayed"
        );
        Ok(data)
    }
}
