pub mod core;
pub mod forms;
pub mod io;
mod menus;
pub mod output;
mod shell;
pub mod shell_context;

pub use self::core::{CliError, CliMode};
pub use shell::run_cli;
