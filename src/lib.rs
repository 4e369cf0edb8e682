//! Core library surface for the bookshelf manager: a login-gated console
//! for a small SQLite catalog of books.
//!
//! The binary only glues these pieces together, so tests and other tooling
//! can drive a full session through in-memory buffers.
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod seed;
pub mod ui;

/// Store bootstrap and the repository the command loop talks to.
pub use db::{ensure_store, BookRepository, BootstrapOutcome, BootstrapReport, Store};

pub use auth::CredentialGate;
pub use config::AppConfig;
pub use error::{LibraryError, Operation, Result, ValidationError};
pub use models::{Account, Book, BookDraft, NewBook};

/// The interactive session and its console plumbing.
pub use ui::{App, Console, ExitStatus};
