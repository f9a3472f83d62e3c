use rust_decimal::Decimal;
use serde::Deserialize;

use ledgerdesk_sports::{DEFAULT_LAST_MATCHES, DEFAULT_SEASON};

// -------------------------
// Bank
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AuthenticateQuery {
    pub username: String,
    pub pin: String,
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub sender_name: String,
    pub sender_pin: String,
    pub recipient_phone: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawalRequest {
    pub username: String,
    pub pin: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub pin: String,
    pub phone_number: String,
}

// -------------------------
// Sports
// -------------------------

#[derive(Debug, Deserialize)]
pub struct StandingsQuery {
    #[serde(default = "default_season")]
    pub season: u32,
}

#[derive(Debug, Deserialize)]
pub struct MatchesQuery {
    #[serde(default = "default_season")]
    pub season: u32,
    #[serde(default = "default_last")]
    pub last: u32,
}

fn default_season() -> u32 {
    DEFAULT_SEASON
}

fn default_last() -> u32 {
    DEFAULT_LAST_MATCHES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_amount_accepts_json_numbers() {
        let req: DepositRequest = serde_json::from_str(
            r#"{"sender_name":"Ali","sender_pin":"0001","recipient_phone":"4258","amount":20000.5}"#,
        )
        .unwrap();
        assert_eq!(req.amount, Decimal::new(200005, 1));
    }

    #[test]
    fn matches_query_defaults() {
        let q: MatchesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.season, 2023);
        assert_eq!(q.last, 10);
    }
}
