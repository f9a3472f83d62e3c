use thiserror::Error;

/// Failure talking to the upstream sports API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or decoding failure.
    #[error("upstream request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.to_string())
    }
}
