//! The ledger store: credentials, balances and transfers over one account book.
//!
//! ## Operation Flow
//!
//! ```text
//! lock book
//!   ↓
//! validate (credentials, amounts, uniqueness)
//!   ↓
//! stage mutation on a copy of the book
//!   ↓
//! save staged copy through the sink
//!   ↓
//! commit staged copy into memory
//! ```
//!
//! The lock is held for the whole sequence, so concurrent requests are
//! serialized and a balance cannot be driven negative by interleaving.
//! A failed save leaves the in-memory book as it was.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use ledgerdesk_core::{AccountName, Amount, DomainError, PhoneNumber};

use crate::account::{Account, AccountBook};
use crate::error::LedgerResult;
use crate::sink::LedgerSink;

/// Ledger store over a type-erased sink (what the HTTP layer holds).
pub type DynLedgerStore = LedgerStore<Arc<dyn LedgerSink>>;

/// Result of a deposit (transfer by phone number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Money moved and the new state was persisted.
    Completed {
        sender: AccountName,
        recipient: AccountName,
        amount: Amount,
        sender_balance: Amount,
        recipient_balance: Amount,
    },
    /// Sender cannot cover the amount. Nothing changed; this is advisory,
    /// not an error.
    Shortfall { requested: Amount, available: Amount },
}

impl TransferOutcome {
    pub fn message(&self) -> String {
        match self {
            TransferOutcome::Completed {
                sender,
                recipient,
                amount,
                ..
            } => format!("Successfully transferred {amount} from {sender} to {recipient}."),
            TransferOutcome::Shortfall {
                requested,
                available,
            } => {
                let excess = requested.checked_sub(*available).unwrap_or(Amount::ZERO);
                format!(
                    "Your sending amount is {requested} but your balance is {available}. \
                     You should deduct {excess} and enter {available} to send the max amount."
                )
            }
        }
    }
}

/// In-memory account book with persist-after-mutate semantics.
pub struct LedgerStore<S> {
    book: Mutex<AccountBook>,
    sink: S,
}

impl<S: LedgerSink> LedgerStore<S> {
    /// Load the book from `sink`, or seed and persist it when nothing is stored.
    pub fn open(sink: S) -> LedgerResult<Self> {
        let book = match sink.load()? {
            Some(book) => {
                tracing::info!(accounts = book.len(), "ledger loaded");
                book
            }
            None => {
                let book = AccountBook::seed()?;
                sink.save(&book)?;
                tracing::info!(accounts = book.len(), "no stored ledger; seeded initial accounts");
                book
            }
        };

        Ok(Self {
            book: Mutex::new(book),
            sink,
        })
    }

    /// Succeeds when `name` exists and `pin` matches exactly.
    pub fn authenticate(&self, name: &str, pin: &str) -> LedgerResult<()> {
        let book = self.book.lock();
        authenticated(&book, name, pin)?;
        Ok(())
    }

    pub fn get_balance(&self, name: &str) -> LedgerResult<Amount> {
        let book = self.book.lock();
        let account = book
            .get(name)
            .ok_or_else(|| DomainError::account_not_found(name))?;
        Ok(account.balance)
    }

    /// Transfer `amount` from the sender to whoever owns `recipient_phone`.
    ///
    /// The sender's funds are checked before the recipient is resolved, so a
    /// short sender gets the advisory even for an unknown phone.
    pub fn deposit(
        &self,
        sender_name: &str,
        sender_pin: &str,
        recipient_phone: &str,
        amount: Decimal,
    ) -> LedgerResult<TransferOutcome> {
        let amount = Amount::positive(amount)?;
        let mut book = self.book.lock();

        let sender = authenticated(&book, sender_name, sender_pin)?;
        let available = sender.balance;
        let sender = sender.name.clone();

        if available < amount {
            tracing::info!(%sender, %amount, %available, "transfer exceeds balance; returning advisory");
            return Ok(TransferOutcome::Shortfall {
                requested: amount,
                available,
            });
        }

        let recipient = book
            .find_by_phone(recipient_phone)
            .map(|a| a.name.clone())
            .ok_or_else(|| DomainError::phone_not_found(recipient_phone))?;

        let mut staged = book.clone();
        staged.debit(sender.as_str(), amount)?;
        staged.credit(recipient.as_str(), amount)?;
        // Read back after both legs: a transfer to one's own phone nets out.
        let sender_balance = balance_of(&staged, &sender)?;
        let recipient_balance = balance_of(&staged, &recipient)?;

        self.commit(&mut book, staged)?;
        tracing::info!(%sender, %recipient, %amount, "transfer completed");

        Ok(TransferOutcome::Completed {
            sender,
            recipient,
            amount,
            sender_balance,
            recipient_balance,
        })
    }

    /// Debit `amount` from the account and return the new balance.
    ///
    /// Unlike [`deposit`](Self::deposit), insufficient funds is a hard error.
    pub fn withdraw(&self, name: &str, pin: &str, amount: Decimal) -> LedgerResult<Amount> {
        let amount = Amount::positive(amount)?;
        let mut book = self.book.lock();

        authenticated(&book, name, pin)?;

        let mut staged = book.clone();
        let new_balance = staged.debit(name, amount)?;

        self.commit(&mut book, staged)?;
        tracing::info!(account = name, %amount, "withdrawal completed");
        Ok(new_balance)
    }

    /// Register a new account with a zero balance.
    pub fn create_account(&self, name: &str, pin: &str, phone_number: &str) -> LedgerResult<()> {
        let account = Account::open(
            AccountName::parse(name)?,
            pin,
            PhoneNumber::parse(phone_number)?,
        );
        let mut book = self.book.lock();

        let mut staged = book.clone();
        staged.insert(account)?;

        self.commit(&mut book, staged)?;
        tracing::info!(account = name, "account created");
        Ok(())
    }

    /// Snapshot of all accounts in book order.
    pub fn accounts(&self) -> Vec<Account> {
        self.book.lock().iter().cloned().collect()
    }

    /// Sum of all balances.
    pub fn total_balance(&self) -> Option<Amount> {
        self.book.lock().total_balance()
    }

    /// Re-persist the current book (shutdown hook).
    pub fn flush(&self) -> LedgerResult<()> {
        let book = self.book.lock();
        self.sink.save(&book)?;
        Ok(())
    }

    fn commit(&self, current: &mut AccountBook, staged: AccountBook) -> LedgerResult<()> {
        if let Err(e) = self.sink.save(&staged) {
            tracing::error!(error = %e, "failed to persist ledger; mutation discarded");
            return Err(e.into());
        }
        *current = staged;
        Ok(())
    }
}

fn authenticated<'a>(book: &'a AccountBook, name: &str, pin: &str) -> Result<&'a Account, DomainError> {
    match book.get(name) {
        Some(account) if account.pin_matches(pin) => Ok(account),
        _ => {
            tracing::debug!(account = name, "authentication failed");
            Err(DomainError::Authentication)
        }
    }
}

fn balance_of(book: &AccountBook, name: &AccountName) -> Result<Amount, DomainError> {
    book.get(name.as_str())
        .map(|a| a.balance)
        .ok_or_else(|| DomainError::account_not_found(name.as_str()))
}
