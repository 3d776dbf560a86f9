use crate::cli::{
    core::{CliError, LoopControl},
    io::Prompter,
    menus::main_menu,
};
use crate::core::{reporter::Reporter, tracker::Tracker};
use crate::ledger::Clock;

/// Menu session state: the tracker being driven and where answers come from.
pub struct Session<R: Reporter, C: Clock, P: Prompter> {
    pub(crate) tracker: Tracker<R, C>,
    pub(crate) prompter: P,
}

impl<R: Reporter, C: Clock, P: Prompter> Session<R, C, P> {
    pub fn new(tracker: Tracker<R, C>, prompter: P) -> Self {
        Self { tracker, prompter }
    }

    /// Runs the main menu until the user exits or input runs out.
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            match main_menu::run_once(self) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) | Err(CliError::EndOfInput) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }

    pub fn tracker(&self) -> &Tracker<R, C> {
        &self.tracker
    }

    pub fn into_tracker(self) -> Tracker<R, C> {
        self.tracker
    }
}
