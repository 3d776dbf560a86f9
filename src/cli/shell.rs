use std::io;

use tracing::{info, warn};

use crate::cli::{
    core::{CliError, CliMode},
    io::{InteractivePrompter, Prompter, ScriptPrompter},
    output::{self, ConsoleReporter},
    shell_context::Session,
};
use crate::config::{Config, ConfigManager};
use crate::core::{
    reporter::{MessageKind, Reporter},
    tracker::Tracker,
};
use crate::ledger::SystemClock;
use crate::storage::TextStorage;

/// Loads the ledger, runs the menu loop and saves on the way out.
pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    if mode == CliMode::Script {
        output::set_plain(true);
    }

    let manager = ConfigManager::new();
    let config = match manager.load() {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, path = %manager.path().display(), "unreadable config, using defaults");
            output::print(MessageKind::Error, format!("{err}. Using default settings."));
            Config::default()
        }
    }
    .with_env_overrides();
    info!(config = %manager.path().display(), data = %config.data_file.display(), ?mode, "starting session");

    let storage = TextStorage::new(config.data_file.clone());
    let tracker = Tracker::open(&storage, ConsoleReporter::new(), SystemClock, config);

    match mode {
        CliMode::Interactive => drive(tracker, InteractivePrompter::new(), &storage),
        CliMode::Script => {
            let stdin = io::stdin();
            drive(tracker, ScriptPrompter::new(stdin.lock(), io::stdout()), &storage)
        }
    }
}

fn drive<P: Prompter>(
    tracker: Tracker<ConsoleReporter, SystemClock>,
    prompter: P,
    storage: &TextStorage,
) -> Result<(), CliError> {
    let mut session = Session::new(tracker, prompter);
    let outcome = session.run();

    let mut tracker = session.into_tracker();
    tracker
        .reporter_mut()
        .section("Thank you for using Personal Finance Tracker!");
    tracker.save(storage);
    outcome
}
