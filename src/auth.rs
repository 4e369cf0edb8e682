//! Bounded-attempt login against the seeded accounts.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::db::{find_account, Store};
use crate::error::{LibraryError, Result, ValidationError};
use crate::models::Account;
use crate::ui::Console;

pub const ACCOUNT_PROMPT: &str = "請輸入帳號：";
pub const PASSWORD_PROMPT: &str = "請輸入密碼：";

/// Gatekeeper that grants a session after a matching account/password pair.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    store: Store,
    max_attempts: u32,
}

impl CredentialGate {
    pub fn new(store: Store, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Prompt for credentials up to `max_attempts` times.
    ///
    /// An empty account or password aborts the whole call with a validation
    /// error; it does not count as an attempt, and a later call starts a
    /// fresh count. Running out of attempts yields `AuthExhausted`, which the
    /// caller must treat as the end of the session.
    pub fn login<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<Account> {
        for attempt in 1..=self.max_attempts {
            let username = console.prompt(ACCOUNT_PROMPT)?;
            let password = console.prompt(PASSWORD_PROMPT)?;
            if username.is_empty() || password.is_empty() {
                return Err(ValidationError::EmptyCredentials.into());
            }

            if let Some(account) = self.verify(&username, &password)? {
                info!(username = %account.username, attempt, "login accepted");
                return Ok(account);
            }
            warn!(username = %username, attempt, "login rejected");
        }

        Err(LibraryError::AuthExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Check one pair against the stored accounts.
    pub fn verify(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let conn = self.store.connect()?;
        Ok(find_account(&conn, username, password)?)
    }
}
