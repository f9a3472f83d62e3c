use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ledgerdesk_core::DomainError;
use ledgerdesk_ledger::LedgerError;
use ledgerdesk_sports::UpstreamError;

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Domain(e) => domain_error_to_response(e),
        LedgerError::Persistence(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "persistence_error",
            format!("Failed to save ledger: {e}"),
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Authentication => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Invalid credentials")
        }
        DomainError::AccountNotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", "User not found")
        }
        DomainError::PhoneNotFound { .. } => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "Recipient phone number not found",
        ),
        DomainError::InsufficientFunds { .. } => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_funds",
            "Insufficient balance",
        ),
        DomainError::DuplicateName(_) => json_error(
            StatusCode::BAD_REQUEST,
            "duplicate_name",
            "Username already exists",
        ),
        DomainError::DuplicatePhone(_) => json_error(
            StatusCode::BAD_REQUEST,
            "duplicate_phone",
            "Phone number already registered",
        ),
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

pub fn upstream_error_to_response(err: UpstreamError) -> axum::response::Response {
    match err {
        UpstreamError::Status { status, body } => json_error(
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            "upstream_error",
            format!("API-Sports error: {body}"),
        ),
        UpstreamError::Request(msg) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream_unreachable",
            format!("Failed to connect to API-Sports: {msg}"),
        ),
    }
}

/// A ledger task that panicked or was cancelled.
pub fn join_error_to_response(err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!(error = %err, "ledger task failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Ledger operation failed",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    detail: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "detail": detail.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_core::Amount;
    use ledgerdesk_ledger::SinkError;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (DomainError::Authentication, StatusCode::UNAUTHORIZED),
            (DomainError::account_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::phone_not_found("1"), StatusCode::NOT_FOUND),
            (
                DomainError::insufficient_funds(Amount::from_whole(2), Amount::from_whole(1)),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::DuplicateName("a".into()), StatusCode::BAD_REQUEST),
            (DomainError::DuplicatePhone("1".into()), StatusCode::BAD_REQUEST),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn persistence_failure_is_500() {
        let err = LedgerError::Persistence(SinkError::Unavailable("disk gone".into()));
        assert_eq!(
            ledger_error_to_response(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn panicked_ledger_task_is_500() {
        let err = tokio::task::spawn_blocking(|| -> u8 { panic!("boom") }).await.unwrap_err();
        let res = join_error_to_response(err);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_status_is_relayed() {
        let err = UpstreamError::Status {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(
            upstream_error_to_response(err).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        let err = UpstreamError::Request("refused".into());
        assert_eq!(
            upstream_error_to_response(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
