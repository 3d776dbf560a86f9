use crate::cli::{
    core::{CliError, LoopControl},
    forms::read_period,
    io::{read_amount, read_int, read_label, Prompter},
    shell_context::Session,
};
use crate::core::reporter::Reporter;
use crate::ledger::Clock;

use super::{
    render,
    transaction_menu::{self, Side},
};

const TITLE: &str = "=== Personal Finance Tracker ===";

const ENTRIES: [&str; 8] = [
    "1. Manage Incomes",
    "2. Manage Expenses",
    "3. Set Budget",
    "4. Check Budget Status",
    "5. Show Summary",
    "6. Show Category Details",
    "7. Show Transactions in Time Period",
    "0. Exit & Save",
];

/// Shows the main menu once and runs the chosen action.
pub(crate) fn run_once<R, C, P>(session: &mut Session<R, C, P>) -> Result<LoopControl, CliError>
where
    R: Reporter,
    C: Clock,
    P: Prompter,
{
    let Session { tracker, prompter } = session;
    render(tracker.reporter_mut(), TITLE, &ENTRIES);

    match read_int(prompter, tracker.reporter_mut(), "Choice", 0, 7)? {
        0 => return Ok(LoopControl::Exit),
        1 => transaction_menu::run(tracker, prompter, Side::Income)?,
        2 => transaction_menu::run(tracker, prompter, Side::Expense)?,
        3 => {
            let category = read_label(prompter, tracker.reporter_mut(), "Category")?;
            let limit = read_amount(prompter, tracker.reporter_mut(), "Limit", 0.0)?;
            tracker.set_budget(&category, limit);
        }
        4 => {
            tracker.check_budgets();
        }
        5 => {
            tracker.summary();
        }
        6 => {
            let category = read_label(prompter, tracker.reporter_mut(), "Category")?;
            tracker.category_detail(&category);
        }
        7 => {
            let (start, end) = read_period(prompter, tracker.reporter_mut())?;
            tracker.report_for_period(start, end);
        }
        _ => {}
    }
    Ok(LoopControl::Continue)
}
