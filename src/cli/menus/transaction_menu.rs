//! Income and expense management sub-menus.

use crate::cli::{
    core::CliError,
    forms::{read_date_time, read_entry_date},
    io::{read_amount, read_index, read_int, read_label, Prompter},
};
use crate::core::{reporter::Reporter, tracker::Tracker};
use crate::ledger::{Clock, UpdateField};
use tracing::warn;

use super::render;

const OVERSPEND_PROMPT: &str = "Do you still want to continue?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Income,
    Expense,
}

impl Side {
    fn title(self) -> &'static str {
        match self {
            Side::Income => "Income Management:",
            Side::Expense => "Expense Management:",
        }
    }

    fn entries(self) -> [&'static str; 5] {
        match self {
            Side::Income => [
                "1. Add Income",
                "2. View Incomes",
                "3. Update Income",
                "4. Delete Income",
                "0. Back",
            ],
            Side::Expense => [
                "1. Add Expense",
                "2. View Expenses",
                "3. Update Expense",
                "4. Delete Expense",
                "0. Back",
            ],
        }
    }

    /// Prompt for the free-text field: the source of an income or the category of an expense.
    fn label(self) -> &'static str {
        match self {
            Side::Income => "Source",
            Side::Expense => "Category",
        }
    }
}

pub(crate) fn run<R, C, P>(
    tracker: &mut Tracker<R, C>,
    prompter: &mut P,
    side: Side,
) -> Result<(), CliError>
where
    R: Reporter,
    C: Clock,
    P: Prompter,
{
    render(tracker.reporter_mut(), side.title(), &side.entries());
    match read_int(prompter, tracker.reporter_mut(), "Choice", 0, 4)? {
        1 => add(tracker, prompter, side)?,
        2 => {
            view(tracker, side);
        }
        3 => update(tracker, prompter, side)?,
        4 => {
            view(tracker, side);
            let index = read_index(prompter, tracker.reporter_mut())?;
            match side {
                Side::Income => tracker.delete_income(index),
                Side::Expense => tracker.delete_expense(index),
            };
        }
        _ => {}
    }
    Ok(())
}

fn view<R: Reporter, C: Clock>(tracker: &mut Tracker<R, C>, side: Side) -> usize {
    match side {
        Side::Income => tracker.view_incomes(),
        Side::Expense => tracker.view_expenses(),
    }
}

fn add<R, C, P>(tracker: &mut Tracker<R, C>, prompter: &mut P, side: Side) -> Result<(), CliError>
where
    R: Reporter,
    C: Clock,
    P: Prompter,
{
    let amount = read_amount(prompter, tracker.reporter_mut(), "Amount", 0.0)?;
    let label = read_label(prompter, tracker.reporter_mut(), side.label())?;
    let date = read_entry_date(prompter, tracker.reporter_mut())?;

    match side {
        Side::Income => {
            tracker.add_income(amount, date, &label);
        }
        Side::Expense => {
            let mut confirm = |_: f64, _: f64| confirm_overspend(prompter);
            tracker.add_expense(amount, date, &label, &mut confirm);
        }
    }
    Ok(())
}

/// Any failure to answer declines the expense. Only exhausted input is silent.
fn confirm_overspend<P: Prompter>(prompter: &mut P) -> bool {
    match prompter.confirm(OVERSPEND_PROMPT) {
        Ok(answer) => answer,
        Err(CliError::EndOfInput) => false,
        Err(err) => {
            warn!(%err, "overspend confirmation failed, declining");
            false
        }
    }
}

fn update<R, C, P>(tracker: &mut Tracker<R, C>, prompter: &mut P, side: Side) -> Result<(), CliError>
where
    R: Reporter,
    C: Clock,
    P: Prompter,
{
    view(tracker, side);
    let index = read_index(prompter, tracker.reporter_mut())?;

    let label_entry = format!("2. {}", side.label());
    render(
        tracker.reporter_mut(),
        "What do you want to update?",
        &["1. Amount", label_entry.as_str(), "3. Date", "4. All"],
    );
    let field = match read_int(prompter, tracker.reporter_mut(), "Choice", 1, 4)? {
        1 => UpdateField::Amount,
        2 => UpdateField::Label,
        3 => UpdateField::Date,
        _ => UpdateField::All,
    };

    let mut amount = 0.0;
    let mut label = String::new();
    let mut date = tracker.now();
    if field.touches_amount() {
        amount = read_amount(prompter, tracker.reporter_mut(), "New Amount", 0.0)?;
    }
    if field.touches_label() {
        let prompt = format!("New {}", side.label());
        label = read_label(prompter, tracker.reporter_mut(), &prompt)?;
    }
    if field.touches_date() {
        date = read_date_time(prompter, tracker.reporter_mut(), "New ")?;
    }

    match side {
        Side::Income => tracker.update_income_fields(index, field, amount, &label, date),
        Side::Expense => tracker.update_expense_fields(index, field, amount, &label, date),
    };
    Ok(())
}
