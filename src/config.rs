//! Process-wide settings gathered in one place and handed to bootstrap, the
//! credential gate, and the presenter.

use std::path::{Path, PathBuf};

/// SQLite file created next to the working directory on first run.
pub const DEFAULT_STORE_PATH: &str = "library.db";
/// Header-first CSV with `username,password` columns.
pub const DEFAULT_ACCOUNTS_SEED: &str = "user.csv";
/// JSON array of `{title, author, publisher, year}` objects.
pub const DEFAULT_BOOKS_SEED: &str = "books.json";
/// Login attempts allowed before the session ends.
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The SQLite file. Created and seeded only when it does not exist yet.
    pub store_path: PathBuf,
    /// Account seed, read on first run only.
    pub accounts_seed: PathBuf,
    /// Book catalog seed, read on first run only.
    pub books_seed: PathBuf,
    /// Wrong pairs tolerated by the credential gate before the session ends.
    pub max_login_attempts: u32,
    /// Style menu titles and error lines with ANSI colors.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            accounts_seed: PathBuf::from(DEFAULT_ACCOUNTS_SEED),
            books_seed: PathBuf::from(DEFAULT_BOOKS_SEED),
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            color: false,
        }
    }
}

impl AppConfig {
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_seeds(mut self, accounts: impl Into<PathBuf>, books: impl Into<PathBuf>) -> Self {
        self.accounts_seed = accounts.into();
        self.books_seed = books.into();
        self
    }

    pub fn with_max_login_attempts(mut self, attempts: u32) -> Self {
        self.max_login_attempts = attempts;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Rebase every relative path onto `dir`. Used by tests and by callers
    /// that keep the store and seeds outside the working directory.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        for path in [
            &mut self.store_path,
            &mut self.accounts_seed,
            &mut self.books_seed,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
        self
    }
}
