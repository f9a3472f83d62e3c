use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use ledgerdesk_core::DomainError;
use ledgerdesk_ledger::{DynLedgerStore, LedgerError, LedgerResult, TransferOutcome};

use crate::app::{SharedLedger, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/authenticate", get(authenticate))
        .route("/bank_balance", get(bank_balance))
        .route("/deposit", post(deposit))
        .route("/withdrawal", post(withdrawal))
        .route("/create_account", post(create_account))
}

/// Run a ledger operation on the blocking pool.
///
/// Store calls take the book lock and, for mutations, write and fsync the
/// snapshot; neither may happen on a runtime worker.
async fn with_ledger<T, F>(ledger: SharedLedger, op: F) -> Result<LedgerResult<T>, axum::response::Response>
where
    F: FnOnce(&DynLedgerStore) -> LedgerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&ledger))
        .await
        .map_err(errors::join_error_to_response)
}

pub async fn authenticate(
    Extension(ledger): Extension<SharedLedger>,
    Query(q): Query<dto::AuthenticateQuery>,
) -> axum::response::Response {
    let dto::AuthenticateQuery { username, pin } = q;
    let name = username.clone();
    let result = match with_ledger(ledger, move |l| l.authenticate(&name, &pin)).await {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    if let Err(e) = result {
        return errors::ledger_error_to_response(e);
    }
    (
        StatusCode::OK,
        Json(json!({ "message": format!("Authentication successful for {username}") })),
    )
        .into_response()
}

pub async fn bank_balance(
    Extension(ledger): Extension<SharedLedger>,
    Query(q): Query<dto::BalanceQuery>,
) -> axum::response::Response {
    let username = q.username;
    let name = username.clone();
    let result = match with_ledger(ledger, move |l| l.get_balance(&name)).await {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match result {
        Ok(balance) => (
            StatusCode::OK,
            Json(json!({ "username": username, "balance": balance })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(ledger): Extension<SharedLedger>,
    Json(body): Json<dto::DepositRequest>,
) -> axum::response::Response {
    let dto::DepositRequest {
        sender_name,
        sender_pin,
        recipient_phone,
        amount,
    } = body;
    let outcome = match with_ledger(ledger, move |l| {
        l.deposit(&sender_name, &sender_pin, &recipient_phone, amount)
    })
    .await
    {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match outcome {
        Ok(outcome) => {
            let message = outcome.message();
            let body = match outcome {
                TransferOutcome::Completed {
                    sender_balance,
                    recipient_balance,
                    ..
                } => json!({
                    "message": message,
                    "sender_new_balance": sender_balance,
                    "recipient_new_balance": recipient_balance,
                }),
                // Advisory only: nothing moved.
                TransferOutcome::Shortfall { available, .. } => json!({
                    "message": message,
                    "current_balance": available,
                }),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(LedgerError::Domain(DomainError::Authentication)) => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Invalid sender credentials",
        ),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn withdrawal(
    Extension(ledger): Extension<SharedLedger>,
    Json(body): Json<dto::WithdrawalRequest>,
) -> axum::response::Response {
    let dto::WithdrawalRequest {
        username,
        pin,
        amount,
    } = body;
    let name = username.clone();
    let result = match with_ledger(ledger, move |l| l.withdraw(&name, &pin, amount)).await {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match result {
        Ok(new_balance) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Successfully withdrew {} from {username}.", amount.normalize()),
                "new_balance": new_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_account(
    Extension(ledger): Extension<SharedLedger>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    let dto::CreateAccountRequest {
        username,
        pin,
        phone_number,
    } = body;
    let name = username.clone();
    let result = match with_ledger(ledger, move |l| l.create_account(&name, &pin, &phone_number)).await
    {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    if let Err(e) = result {
        return errors::ledger_error_to_response(e);
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": format!(
                "Account for {username} created successfully with an initial balance of 0"
            ),
        })),
    )
        .into_response()
}
