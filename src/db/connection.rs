use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::seed::{load_accounts_table, load_books_catalog, SeedBook, SeedRecord};

use super::accounts::insert_account;
use super::books::insert_seed_book;

/// Handle on the library's SQLite file. Holding a `Store` never keeps the
/// file open: every operation calls [`Store::connect`] and drops the
/// connection before returning.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Point at a store file. Nothing is opened or created here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file is on disk. Bootstrap uses this as its only
    /// "already initialized" check; the tables inside are not inspected.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Open a read-write connection to an existing store. A missing file is
    /// an error here; only bootstrap creates the store.
    pub fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }
}

/// How many seed rows of one kind made it into the store.
///
/// Every row is attempted exactly once, so `inserted + skipped` always equals
/// the number of rows the seed file held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedTally {
    pub inserted: usize,
    pub skipped: usize,
}

impl SeedTally {
    fn record(&mut self, result: rusqlite::Result<usize>, kind: &str, index: usize) {
        match result {
            Ok(_) => self.inserted += 1,
            Err(err) => {
                warn!(kind, row = index, error = %err, "skipping seed row");
                self.skipped += 1;
            }
        }
    }
}

/// Per-table seed tallies from a first run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub accounts: SeedTally,
    pub books: SeedTally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The store file was already on disk; nothing was touched.
    AlreadyPresent,
    /// The store was created, its tables defined and the seed rows loaded.
    Created(BootstrapReport),
}

/// Create and seed the store on first run.
///
/// Both seed files are read before the store file is created, so a missing or
/// malformed seed leaves nothing behind. Individual rows that violate the
/// table constraints are logged and counted as skipped.
pub fn ensure_store(config: &AppConfig) -> Result<BootstrapOutcome> {
    let store = Store::new(&config.store_path);
    if store.exists() {
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let accounts = load_accounts_table(&config.accounts_seed)?;
    let books = load_books_catalog(&config.books_seed)?;

    info!(path = %store.path().display(), "creating library store");
    let conn = Connection::open(store.path())?;
    create_schema(&conn)?;
    let report = seed_store(&conn, &accounts, &books);
    info!(
        accounts_inserted = report.accounts.inserted,
        accounts_skipped = report.accounts.skipped,
        books_inserted = report.books.inserted,
        books_skipped = report.books.skipped,
        "library store seeded"
    );

    Ok(BootstrapOutcome::Created(report))
}

/// Define the `accounts` and `books` tables. Safe to run more than once.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL CHECK (length(username) > 0),
            password TEXT NOT NULL CHECK (length(password) > 0)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(title) > 0),
            author TEXT NOT NULL CHECK (length(author) > 0),
            publisher TEXT NOT NULL CHECK (length(publisher) > 0),
            year INTEGER NOT NULL CHECK (typeof(year) = 'integer')
        )",
        [],
    )?;

    Ok(())
}

/// Insert every seed row, one statement each, tallying failures instead of
/// aborting.
pub fn seed_store(
    conn: &Connection,
    accounts: &[SeedRecord],
    books: &[SeedBook],
) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    for (index, account) in accounts.iter().enumerate() {
        let result = insert_account(conn, account.get("username"), account.get("password"));
        report.accounts.record(result, "account", index);
    }

    for (index, book) in books.iter().enumerate() {
        report.books.record(insert_seed_book(conn, book), "book", index);
    }

    report
}
