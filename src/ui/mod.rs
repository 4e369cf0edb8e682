//! Console front end: line prompts, the presenter, and the command loop.

mod app;
mod console;
mod forms;
mod helpers;
mod screens;

pub use app::{App, ExitStatus, MenuChoice, SessionState};
pub use console::Console;
pub use helpers::FULL_WIDTH_SPACE;
pub use screens::{Presenter, INVALID_CHOICE, NO_DATA};
