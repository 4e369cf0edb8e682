use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::auth::CredentialGate;
use crate::config::AppConfig;
use crate::db::{BookRepository, Store};
use crate::error::{LibraryError, Result};

use super::console::Console;
use super::forms::{
    ADD_PROMPTS, DELETE_PROMPT, MENU_PROMPT, REVISE_PROMPTS, REVISE_TARGET_PROMPT, SEARCH_PROMPT,
};
use super::screens::{Presenter, INVALID_CHOICE};

/// How a finished session should be reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

/// Session lifecycle. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingLogin,
    MenuActive,
    Terminated(ExitStatus),
}

/// Menu selections. An empty line means exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Revise,
    Search,
    List,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Delete),
            "3" => Some(MenuChoice::Revise),
            "4" => Some(MenuChoice::Search),
            "5" => Some(MenuChoice::List),
            "" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// The interactive session: login first, then the CRUD menu until the
/// operator leaves.
pub struct App<R, W> {
    repository: BookRepository,
    gate: CredentialGate,
    presenter: Presenter,
    console: Console<R, W>,
    state: SessionState,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(config: &AppConfig, console: Console<R, W>) -> Self {
        let store = Store::new(&config.store_path);
        Self {
            repository: BookRepository::new(store.clone()),
            gate: CredentialGate::new(store, config.max_login_attempts),
            presenter: Presenter::new(config.color),
            console,
            state: SessionState::AwaitingLogin,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to completion. Only console I/O failures escape as
    /// errors; everything else is printed and folded into the state machine.
    pub fn run(&mut self) -> Result<ExitStatus> {
        loop {
            if let SessionState::Terminated(status) = self.state {
                return Ok(status);
            }
            self.step()?;
        }
    }

    /// Advance the state machine by one prompt cycle.
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            SessionState::AwaitingLogin => self.step_login(),
            SessionState::MenuActive => self.step_menu(),
            SessionState::Terminated(_) => Ok(()),
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn step_login(&mut self) -> Result<()> {
        match self.gate.login(&mut self.console) {
            Ok(account) => {
                info!(username = %account.username, "session opened");
                self.state = SessionState::MenuActive;
            }
            Err(LibraryError::InputClosed) => {
                self.state = SessionState::Terminated(ExitStatus::Failure);
            }
            Err(LibraryError::Io(err)) => return Err(err.into()),
            Err(err) => {
                self.presenter.error(self.console.output(), &err)?;
                if err.is_fatal() {
                    self.state = SessionState::Terminated(ExitStatus::Failure);
                }
            }
        }
        Ok(())
    }

    fn step_menu(&mut self) -> Result<()> {
        self.presenter.menu(self.console.output())?;
        let selection = match self.console.prompt(MENU_PROMPT) {
            Ok(selection) => selection,
            Err(LibraryError::InputClosed) => {
                self.state = SessionState::Terminated(ExitStatus::Success);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let Some(choice) = MenuChoice::parse(&selection) else {
            self.presenter.error(self.console.output(), &INVALID_CHOICE)?;
            return Ok(());
        };
        debug!(?choice, "menu selection");

        match self.dispatch(choice) {
            Ok(()) => Ok(()),
            Err(LibraryError::InputClosed) => {
                self.state = SessionState::Terminated(ExitStatus::Success);
                Ok(())
            }
            Err(LibraryError::Io(err)) => Err(err.into()),
            Err(err) => Ok(self.presenter.error(self.console.output(), &err)?),
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => {
                let draft = ADD_PROMPTS.read(&mut self.console)?;
                let report = self.repository.add(&draft)?;
                self.presenter.report(self.console.output(), &report)?;
            }
            MenuChoice::Delete => {
                self.show_listing()?;
                let title = self.console.prompt(DELETE_PROMPT)?;
                let report = self.repository.delete(&title)?;
                self.presenter.report(self.console.output(), &report)?;
            }
            MenuChoice::Revise => {
                self.show_listing()?;
                let title = self.console.prompt(REVISE_TARGET_PROMPT)?;
                let draft = REVISE_PROMPTS.read(&mut self.console)?;
                let report = self.repository.revise(&title, &draft)?;
                self.presenter.report(self.console.output(), &report)?;
            }
            MenuChoice::Search => {
                let keyword = self.console.prompt(SEARCH_PROMPT)?;
                let books = self.repository.search(&keyword);
                self.presenter.books(self.console.output(), &books)?;
            }
            MenuChoice::List => self.show_listing()?,
            MenuChoice::Exit => self.state = SessionState::Terminated(ExitStatus::Success),
        }
        Ok(())
    }

    /// Print the whole table. A failed read is shown but does not stop the
    /// operation that asked for the listing.
    fn show_listing(&mut self) -> Result<()> {
        match self.repository.list() {
            Ok(books) => self.presenter.books(self.console.output(), &books)?,
            Err(err) => self.presenter.error(self.console.output(), &err)?,
        }
        Ok(())
    }
}
