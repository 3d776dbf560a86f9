use std::fs;
use std::io::{sink, Cursor, Sink};

use finance_tracker::cli::io::ScriptPrompter;
use finance_tracker::cli::shell_context::Session;
use finance_tracker::config::Config;
use finance_tracker::core::{MemoryReporter, Tracker};
use finance_tracker::ledger::{CalendarDateTime, FixedClock, Ledger, TimeOfDay};
use finance_tracker::storage::{StorageBackend, TextStorage};
use tempfile::tempdir;

type ScriptSession = Session<MemoryReporter, FixedClock, ScriptPrompter<Cursor<Vec<u8>>, Sink>>;

fn now() -> CalendarDateTime {
    CalendarDateTime::new(2024, 5, 10, TimeOfDay::new(14, 30, 0))
}

fn session(ledger: Ledger, answers: &[&str]) -> ScriptSession {
    let mut input = answers.join("\n");
    input.push('\n');
    let tracker = Tracker::new(
        ledger,
        MemoryReporter::new(),
        FixedClock(now()),
        Config::default(),
    );
    Session::new(
        tracker,
        ScriptPrompter::new(Cursor::new(input.into_bytes()), sink()),
    )
}

#[test]
fn open_reports_missing_store() {
    let temp = tempdir().unwrap();
    let storage = TextStorage::new(temp.path().join("finance_data.csv"));
    let tracker = Tracker::open(
        &storage,
        MemoryReporter::new(),
        FixedClock(now()),
        Config::default(),
    );
    assert_eq!(
        tracker.reporter().lines(),
        vec!["No save file found—starting fresh."]
    );
    assert!(tracker.ledger().is_empty());
}

#[test]
fn open_reports_skipped_lines_and_counts() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.csv");
    fs::write(
        &path,
        "INCOME,Salary,100,2024-01-01 00:00:00\nEXPENSE,Food,x,2024-01-01 00:00:00\nBUDGET,Food,50\n",
    )
    .unwrap();
    let storage = TextStorage::new(&path);

    let tracker = Tracker::open(
        &storage,
        MemoryReporter::new(),
        FixedClock(now()),
        Config::default(),
    );
    let expected_load = format!(
        "Loaded from {} (1 incomes, 0 expenses, 1 budgets)",
        path.display()
    );
    assert_eq!(
        tracker.reporter().lines(),
        vec![
            "Warning: Invalid amount on line 2, skipping.",
            expected_load.as_str()
        ]
    );
}

#[test]
fn save_reports_destination_and_failure() {
    let temp = tempdir().unwrap();
    let good = TextStorage::new(temp.path().join("out.csv"));
    let bad = TextStorage::new(temp.path());

    let mut tracker = Tracker::new(
        Ledger::new(),
        MemoryReporter::new(),
        FixedClock(now()),
        Config::default(),
    );
    tracker.add_income(10.0, None, "Gift");
    assert!(tracker.save(&good));
    assert!(!tracker.save(&bad));

    let lines = tracker.reporter().lines();
    assert_eq!(lines[1], format!("Data saved to {}", good.path().display()));
    assert_eq!(lines[2], "Error opening file for saving!");
    assert_eq!(tracker.ledger().incomes().len(), 1);
}

#[test]
fn menu_adds_income_with_current_time() {
    let mut session = session(Ledger::new(), &["1", "1", "250", "Salary", "n", "0"]);
    session.run().unwrap();

    let tracker = session.into_tracker();
    let income = &tracker.ledger().incomes()[0];
    assert_eq!(income.amount, 250.0);
    assert_eq!(income.label(), "Salary");
    assert_eq!(income.date, now());
    assert!(tracker.reporter().contains("Income added successfully!"));
}

#[test]
fn menu_adds_expense_with_entered_date_and_declines_overspend() {
    let answers = [
        "2", "1", "40", "Food", "y", "2024", "2", "14", "19", "5", "0", // first expense
        "n", // overspend confirmation
        "0",
    ];
    let mut session = session(Ledger::new(), &answers);
    session.run().unwrap();

    let tracker = session.into_tracker();
    assert!(tracker.ledger().expenses().is_empty());
    assert!(tracker
        .reporter()
        .contains("*** Warning: The current balance (0) is not enough for this expense (40) ***"));
    assert!(tracker.reporter().contains("Expense canceled."));
}

#[test]
fn menu_update_and_delete_use_positions() {
    let mut ledger = Ledger::new();
    ledger
        .add_income(100.0, CalendarDateTime::from_ymd(2024, 1, 1), "Salary")
        .unwrap();
    ledger
        .add_income(20.0, CalendarDateTime::from_ymd(2024, 1, 2), "Gift")
        .unwrap();

    let answers = [
        "1", "3", "1", "2", "Bonus", // rename income 1
        "1", "4", "0", // delete income 0
        "1", "4", "7", // invalid delete
        "0",
    ];
    let mut session = session(ledger, &answers);
    session.run().unwrap();

    let tracker = session.into_tracker();
    assert_eq!(tracker.ledger().incomes().len(), 1);
    assert_eq!(tracker.ledger().incomes()[0].label(), "Bonus");
    assert_eq!(tracker.ledger().incomes()[0].amount, 20.0);
    assert!(tracker.reporter().contains("Income updated successfully!"));
    assert!(tracker.reporter().contains("Income deleted successfully!"));
    assert!(tracker.reporter().contains("Invalid index!"));
}

#[test]
fn menu_budget_summary_and_period_report() {
    let mut ledger = Ledger::new();
    ledger
        .add_income(1000.0, CalendarDateTime::from_ymd(2024, 3, 1), "Salary")
        .unwrap();

    let answers = [
        "3", "Food", "200", // set budget
        "2", "1", "190", "Food", "y", "2024", "3", "15", "12", "0", "0", // expense
        "5", // summary
        "7", "2024", "3", "31", "2024", "3", "1", // reversed period
        "0",
    ];
    let mut session = session(ledger, &answers);
    session.run().unwrap();

    let tracker = session.into_tracker();
    let reporter = tracker.reporter();
    assert!(reporter.contains("New budget created for Food: 200"));
    assert!(reporter.contains("Food: WARNING: 95.0% used (10 remaining)"));
    assert!(reporter.contains("Current Balance: 810.00"));
    assert!(reporter.contains("We will be swapping the dates."));
    assert!(reporter.contains("Transactions from 2024-03-01 23:59:59 to 2024-03-31 00:00:00:"));
    assert!(reporter.contains("Category: Food ,Amount: 190 ,Date: 2024-03-15 12:00:00"));
}

#[test]
fn invalid_menu_input_reprompts() {
    let mut session = session(Ledger::new(), &["9", "abc", "4", "0"]);
    session.run().unwrap();

    let tracker = session.into_tracker();
    let reporter = tracker.reporter();
    assert!(reporter.contains("Please enter a number between 0 and 7."));
    assert!(reporter.contains("Invalid input. Please enter a valid integer."));
    assert!(reporter.contains("No budgets have been set yet."));
}

#[test]
fn exhausted_input_ends_session_cleanly() {
    let mut session = session(Ledger::new(), &["1", "1", "25"]);
    assert!(session.run().is_ok());
    assert!(session.tracker().ledger().is_empty());
}
