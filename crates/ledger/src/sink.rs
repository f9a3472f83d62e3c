//! Persistence sink for the account book.
//!
//! The ledger keeps its whole state in memory and rewrites the full mapping
//! after every successful mutation. A `LedgerSink` is where that snapshot
//! goes: a JSON file in production, an in-memory slot in tests/dev.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::account::AccountBook;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid ledger json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ledger sink unavailable: {0}")]
    Unavailable(String),
}

/// Full-snapshot persistence for the account book.
pub trait LedgerSink: Send + Sync {
    /// Load the stored book. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<AccountBook>, SinkError>;

    /// Replace the stored book with `book`.
    fn save(&self, book: &AccountBook) -> Result<(), SinkError>;
}

impl<S> LedgerSink for Arc<S>
where
    S: LedgerSink + ?Sized,
{
    fn load(&self) -> Result<Option<AccountBook>, SinkError> {
        (**self).load()
    }

    fn save(&self, book: &AccountBook) -> Result<(), SinkError> {
        (**self).save(book)
    }
}

/// Human-readable JSON file holding the whole mapping.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl LedgerSink for JsonFileSink {
    fn load(&self) -> Result<Option<AccountBook>, SinkError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let book: AccountBook = serde_json::from_slice(&bytes)?;
        Ok(Some(book))
    }

    fn save(&self, book: &AccountBook) -> Result<(), SinkError> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;

        {
            // 4-space indent, as existing users_db.json files use.
            let mut ser =
                serde_json::Serializer::with_formatter(&mut tmp, PrettyFormatter::with_indent(b"    "));
            book.serialize(&mut ser)?;
        }
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| SinkError::Io(e.error))?;
        tracing::debug!(path = %self.path.display(), accounts = book.len(), "ledger snapshot written");
        Ok(())
    }
}

/// In-memory sink for tests/dev.
///
/// Counts saves and can be switched into a failing mode to exercise the
/// persistence error path.
#[derive(Debug, Default)]
pub struct InMemorySink {
    stored: Mutex<Option<AccountBook>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that already holds `book`, as if a previous process had saved it.
    pub fn with_book(book: AccountBook) -> Self {
        Self {
            stored: Mutex::new(Some(book)),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<AccountBook> {
        self.stored.lock().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl LedgerSink for InMemorySink {
    fn load(&self) -> Result<Option<AccountBook>, SinkError> {
        Ok(self.stored.lock().clone())
    }

    fn save(&self, book: &AccountBook) -> Result<(), SinkError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("save rejected (fail_saves enabled)".to_string()));
        }
        *self.stored.lock() = Some(book.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_core::{AccountName, PhoneNumber};

    use crate::account::Account;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("users_db.json"));
        assert!(sink.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_every_account() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("users_db.json"));

        let mut book = AccountBook::seed().unwrap();
        book.insert(Account::open(
            AccountName::parse("Bilal").unwrap(),
            "0004",
            PhoneNumber::parse("6000").unwrap(),
        ))
        .unwrap();

        sink.save(&book).unwrap();
        let loaded = sink.load().unwrap().unwrap();
        assert_eq!(loaded, book);

        let names: Vec<_> = loaded.iter().map(|a| a.name.to_string()).collect();
        assert_eq!(names, ["Ali", "Ahsan", "Shahid", "Bilal"]);
    }

    #[test]
    fn fractional_balances_survive_the_file_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_db.json");
        let sink = JsonFileSink::new(&path);

        let mut book = AccountBook::seed().unwrap();
        let amount = ledgerdesk_core::Amount::positive(rust_decimal_macros::dec!(0.123456789012345)).unwrap();
        let in_memory = book.debit("Ali", amount).unwrap();
        assert_eq!(in_memory.to_string(), "49999.876543210987655");

        sink.save(&book).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"balance\": 49999.876543210987655"), "{text}");

        let loaded = sink.load().unwrap().unwrap();
        assert_eq!(loaded.get("Ali").unwrap().balance.to_string(), "49999.876543210987655");
        assert_eq!(loaded, book);
    }

    #[test]
    fn float_formatted_balances_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_db.json");
        std::fs::write(
            &path,
            r#"{"Ali": {"pin": "0001", "balance": 50000.0, "phone_number": "9231"},
                "Tiny": {"pin": "1", "balance": 1e-05, "phone_number": "2"}}"#,
        )
        .unwrap();

        let book = JsonFileSink::new(&path).load().unwrap().unwrap();
        assert_eq!(book.get("Ali").unwrap().balance, ledgerdesk_core::Amount::from_whole(50_000));
        assert_eq!(
            book.get("Tiny").unwrap().balance.value(),
            rust_decimal_macros::dec!(0.00001)
        );
    }

    #[test]
    fn file_is_pretty_printed_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_db.json");
        let sink = JsonFileSink::new(&path);

        sink.save(&AccountBook::seed().unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"Ali\": {\n        \"pin\": \"0001\""), "{text}");
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("users_db.json"));

        let mut book = AccountBook::seed().unwrap();
        sink.save(&book).unwrap();
        book.debit("Ali", ledgerdesk_core::Amount::from_whole(1_000)).unwrap();
        sink.save(&book).unwrap();

        let loaded = sink.load().unwrap().unwrap();
        assert_eq!(
            loaded.get("Ali").unwrap().balance,
            ledgerdesk_core::Amount::from_whole(49_000)
        );
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileSink::new(&path).load().unwrap_err();
        assert!(matches!(err, SinkError::Json(_)));
    }

    #[test]
    fn in_memory_sink_counts_and_fails_on_demand() {
        let sink = InMemorySink::new();
        let book = AccountBook::seed().unwrap();

        sink.save(&book).unwrap();
        assert_eq!(sink.save_count(), 1);
        assert_eq!(sink.stored(), Some(book.clone()));

        sink.fail_saves(true);
        assert!(matches!(sink.save(&book), Err(SinkError::Unavailable(_))));
        assert_eq!(sink.save_count(), 1);
    }
}
