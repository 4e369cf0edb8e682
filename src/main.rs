//! Binary entry point: seed the store on first run, then hand the terminal
//! to the login gate and CRUD menu until the operator leaves.
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use bookshelf_manager::logging::init_tracing;
use bookshelf_manager::{ensure_store, App, AppConfig, BootstrapOutcome, Console, ExitStatus};
use tracing::info;

/// Bootstrap failures (missing or malformed seed files, an unwritable store)
/// surface here and end the process before any prompt is shown.
fn main() -> anyhow::Result<ExitCode> {
    init_tracing()?;

    let config = AppConfig::default().with_color(io::stdout().is_terminal());
    match ensure_store(&config).context("failed to prepare the library store")? {
        BootstrapOutcome::Created(report) => info!(?report, "first run, store seeded"),
        BootstrapOutcome::AlreadyPresent => {
            info!(path = %config.store_path.display(), "using existing store")
        }
    }

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut app = App::new(&config, console);
    let status = app.run().context("console session failed")?;

    Ok(match status {
        ExitStatus::Success => ExitCode::SUCCESS,
        ExitStatus::Failure => ExitCode::FAILURE,
    })
}
