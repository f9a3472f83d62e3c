//! Strongly-typed account identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Account name (unique key of the ledger mapping).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

/// Phone number used as a transfer routing address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Validate and wrap a raw value.
            ///
            /// The value is stored verbatim; only blank input is rejected.
            pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::validation(concat!($name, " must not be blank")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_string_newtype!(AccountName, "account name");
impl_string_newtype!(PhoneNumber, "phone number");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(AccountName::parse("   ").is_err());
        assert!(PhoneNumber::parse("").is_err());
        let err = "".parse::<AccountName>().unwrap_err();
        assert_eq!(err, DomainError::validation("account name must not be blank"));
    }

    #[test]
    fn values_are_kept_verbatim() {
        let name = AccountName::parse("Ali").unwrap();
        assert_eq!(name.as_str(), "Ali");
        assert!(name == *"Ali");
        assert_eq!(String::from(name), "Ali");
    }

    #[test]
    fn serde_round_trips_through_plain_strings() {
        let phone = PhoneNumber::parse("9231").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"9231\"");
        assert_eq!(serde_json::from_str::<PhoneNumber>(&json).unwrap(), phone);
        assert!(serde_json::from_str::<PhoneNumber>("\" \"").is_err());
    }
}
