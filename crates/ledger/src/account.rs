//! Account records and the insertion-ordered account book.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::{self, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use ledgerdesk_core::{AccountName, Amount, DomainError, DomainResult, PhoneNumber};

/// A single bank account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: AccountName,
    /// Plaintext PIN, compared by exact match.
    pub pin: String,
    pub balance: Amount,
    pub phone_number: PhoneNumber,
}

impl Account {
    /// New account with a zero balance.
    pub fn open(name: AccountName, pin: impl Into<String>, phone_number: PhoneNumber) -> Self {
        Self {
            name,
            pin: pin.into(),
            balance: Amount::ZERO,
            phone_number,
        }
    }

    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }
}

/// Persisted value of one account; the name is the map key.
#[derive(Deserialize)]
struct AccountRecord {
    pin: String,
    #[serde(deserialize_with = "deserialize_exact")]
    balance: Amount,
    phone_number: PhoneNumber,
}

#[derive(Serialize)]
struct AccountRecordRef<'a> {
    pin: &'a str,
    #[serde(serialize_with = "serialize_exact")]
    balance: Amount,
    phone_number: &'a PhoneNumber,
}

impl<'a> From<&'a Account> for AccountRecordRef<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            pin: &account.pin,
            balance: account.balance,
            phone_number: &account.phone_number,
        }
    }
}

// Stored balances are written as the exact decimal text of the number, not
// through f64, so a reload yields the same value that was in memory.
fn serialize_exact<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let raw = RawValue::from_string(amount.to_string()).map_err(ser::Error::custom)?;
    raw.serialize(serializer)
}

fn deserialize_exact<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let text = raw.get().trim();
    // Float writers may use exponent notation (e.g. `1e-05`).
    let value = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| de::Error::custom(format!("balance is not a number: {text}")))?;
    Amount::new(value).map_err(de::Error::custom)
}

/// The full account mapping, keyed by name, in creation order.
///
/// Serializes as a single JSON object `{ name: { pin, balance, phone_number } }`
/// whose key order follows the book order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBook {
    accounts: Vec<Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial accounts written when no persisted state exists.
    pub fn seed() -> DomainResult<Self> {
        let seed = [
            ("Ali", "0001", 50_000, "9231"),
            ("Ahsan", "0002", 100_000, "4258"),
            ("Shahid", "0003", 150_000, "5018"),
        ];

        let mut book = Self::new();
        for (name, pin, balance, phone) in seed {
            let mut account = Account::open(AccountName::parse(name)?, pin, PhoneNumber::parse(phone)?);
            account.balance = Amount::from_whole(balance);
            book.insert(account)?;
        }
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == *name)
    }

    /// First account (in book order) registered under `phone`.
    pub fn find_by_phone(&self, phone: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.phone_number == *phone)
    }

    /// Append a new account, enforcing name and phone uniqueness.
    pub fn insert(&mut self, account: Account) -> DomainResult<()> {
        if self.get(account.name.as_str()).is_some() {
            return Err(DomainError::DuplicateName(account.name.into()));
        }
        if self.find_by_phone(account.phone_number.as_str()).is_some() {
            return Err(DomainError::DuplicatePhone(account.phone_number.into()));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Subtract `amount` from the named account and return the new balance.
    pub fn debit(&mut self, name: &str, amount: Amount) -> DomainResult<Amount> {
        let account = self.get_mut(name)?;
        let available = account.balance;
        account.balance = available
            .checked_sub(amount)
            .ok_or_else(|| DomainError::insufficient_funds(amount, available))?;
        Ok(account.balance)
    }

    /// Add `amount` to the named account and return the new balance.
    pub fn credit(&mut self, name: &str, amount: Amount) -> DomainResult<Amount> {
        let account = self.get_mut(name)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("balance overflow"))?;
        Ok(account.balance)
    }

    /// Sum of all balances, `None` on overflow.
    pub fn total_balance(&self) -> Option<Amount> {
        self.accounts
            .iter()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a.balance))
    }

    fn get_mut(&mut self, name: &str) -> DomainResult<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.name == *name)
            .ok_or_else(|| DomainError::account_not_found(name))
    }
}

impl Serialize for AccountBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.accounts.len()))?;
        for account in &self.accounts {
            map.serialize_entry(account.name.as_str(), &AccountRecordRef::from(account))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AccountBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AccountBookVisitor)
    }
}

struct AccountBookVisitor;

impl<'de> Visitor<'de> for AccountBookVisitor {
    type Value = AccountBook;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of account name to {pin, balance, phone_number}")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut book = AccountBook::new();
        // Phone uniqueness is not re-checked here: stored data that already
        // shares a phone keeps working, first account wins on lookup.
        while let Some((name, record)) = access.next_entry::<AccountName, AccountRecord>()? {
            if book.get(name.as_str()).is_some() {
                return Err(de::Error::custom(format!("duplicate account name: {name}")));
            }
            book.accounts.push(Account {
                name,
                pin: record.pin,
                balance: record.balance,
                phone_number: record.phone_number,
            });
        }
        Ok(book)
    }
}
