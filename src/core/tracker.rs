//! Reporting facade over the [`Ledger`] store.
//!
//! Every operation validates its input, reports the outcome through a
//! [`Reporter`], and never hands an error back to the caller: a rejected call
//! leaves the ledger untouched and returns `false`.

use tracing::{error, warn};

use crate::{
    config::Config,
    core::reporter::Reporter,
    errors::LedgerError,
    ledger::{
        BudgetChange, BudgetStatus, BudgetTier, CalendarDateTime, Clock, Ledger, OverspendConfirmation,
        Summary, Transaction, UpdateField,
    },
    storage::StorageBackend,
};

pub struct Tracker<R: Reporter, C: Clock> {
    ledger: Ledger,
    reporter: R,
    clock: C,
    config: Config,
    /// Cleared when the store exists but could not be read, so a save would
    /// replace records that were never loaded.
    writable: bool,
}

impl<R: Reporter, C: Clock> Tracker<R, C> {
    pub fn new(ledger: Ledger, reporter: R, clock: C, config: Config) -> Self {
        Self {
            ledger,
            reporter,
            clock,
            config,
            writable: true,
        }
    }

    /// Loads the ledger from `storage`, reporting what was read. A read failure
    /// leaves the tracker with an empty ledger and disables [`Tracker::save`].
    pub fn open(storage: &dyn StorageBackend, reporter: R, clock: C, config: Config) -> Self {
        let mut tracker = Self::new(Ledger::new(), reporter, clock, config);
        let path = storage.path().display().to_string();
        match storage.load() {
            Ok(report) if !report.found => {
                tracker.reporter.info("No save file found—starting fresh.");
            }
            Ok(report) => {
                for warning in &report.warnings {
                    tracker.reporter.warning(format!("Warning: {warning}"));
                }
                tracker.ledger = report.ledger;
                let (incomes, expenses, budgets) = tracker.counts();
                tracker.reporter.info(format!(
                    "Loaded from {path} ({incomes} incomes, {expenses} expenses, {budgets} budgets)"
                ));
            }
            Err(err) => {
                error!(%err, path = %path, "failed to read ledger");
                tracker.writable = false;
                tracker.reporter.error(format!(
                    "Error opening {path}: {err}. Starting fresh; changes will not be saved."
                ));
            }
        }
        tracker
    }

    /// Overwrites the store with the current ledger. A failure is reported and
    /// the in-memory ledger is kept as is.
    pub fn save(&mut self, storage: &dyn StorageBackend) -> bool {
        if !self.writable {
            warn!(path = %storage.path().display(), "store was unreadable at startup, not overwriting");
            self.reporter.error(format!(
                "Not saving: {} could not be read at startup.",
                storage.path().display()
            ));
            return false;
        }
        match storage.save(&self.ledger) {
            Ok(()) => {
                self.reporter
                    .info(format!("Data saved to {}", storage.path().display()));
                true
            }
            Err(err) => {
                error!(%err, path = %storage.path().display(), "failed to save ledger");
                self.reporter.error("Error opening file for saving!");
                false
            }
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current time from the configured clock, used when no date is supplied.
    pub fn now(&self) -> CalendarDateTime {
        self.clock.now()
    }

    fn counts(&self) -> (usize, usize, usize) {
        (
            self.ledger.incomes().len(),
            self.ledger.expenses().len(),
            self.ledger.budgets().len(),
        )
    }

    fn fail(&mut self, err: LedgerError) -> bool {
        warn!(%err, "operation rejected");
        self.reporter.error(err);
        false
    }

    fn large_amount_alert(&mut self, noun: &str, amount: f64) {
        if amount > self.config.large_amount_threshold {
            self.reporter
                .warning(format!("Alert: Large {noun} added ({amount})!"));
        }
    }

    pub fn add_income(
        &mut self,
        amount: f64,
        date: Option<CalendarDateTime>,
        source: &str,
    ) -> bool {
        let date = date.unwrap_or_else(|| self.now());
        match self.ledger.add_income(amount, date, source) {
            Ok(_) => {
                self.large_amount_alert("income", amount);
                self.reporter.success("Income added successfully!");
                true
            }
            Err(err) => self.fail(err),
        }
    }

    /// Adds an expense. If it exceeds the current balance a warning is reported
    /// and `confirmation` decides whether to proceed. Budgets are re-checked
    /// after every successful addition.
    pub fn add_expense(
        &mut self,
        amount: f64,
        date: Option<CalendarDateTime>,
        category: &str,
        confirmation: &mut dyn OverspendConfirmation,
    ) -> bool {
        let date = date.unwrap_or_else(|| self.now());
        let reporter = &mut self.reporter;
        let mut ask = |balance: f64, requested: f64| {
            reporter.warning(format!(
                "*** Warning: The current balance ({balance}) is not enough for this expense ({requested}) ***"
            ));
            confirmation.confirm_overspend(balance, requested)
        };

        match self.ledger.add_expense(amount, date, category, &mut ask) {
            Ok(_) => {
                self.large_amount_alert("expense", amount);
                self.reporter.success("Expense added successfully!");
                self.check_budgets();
                true
            }
            Err(LedgerError::Cancelled) => {
                warn!(amount, category, "overspend declined");
                self.reporter.info(LedgerError::Cancelled);
                false
            }
            Err(err) => self.fail(err),
        }
    }

    /// Lists incomes with their positions. Returns how many were listed.
    pub fn view_incomes(&mut self) -> usize {
        let Self {
            ledger, reporter, ..
        } = self;
        list_transactions(reporter, ledger.incomes(), "Incomes", "No incomes.")
    }

    pub fn view_expenses(&mut self) -> usize {
        let Self {
            ledger, reporter, ..
        } = self;
        list_transactions(reporter, ledger.expenses(), "Expenses", "No expenses.")
    }

    pub fn update_income(
        &mut self,
        index: usize,
        amount: f64,
        date: CalendarDateTime,
        source: &str,
    ) -> bool {
        self.update_income_fields(index, UpdateField::All, amount, source, date)
    }

    pub fn update_income_fields(
        &mut self,
        index: usize,
        field: UpdateField,
        amount: f64,
        source: &str,
        date: CalendarDateTime,
    ) -> bool {
        match self
            .ledger
            .update_income_fields(index, field, amount, source, date)
        {
            Ok(()) => {
                self.reporter.success("Income updated successfully!");
                true
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn update_expense(
        &mut self,
        index: usize,
        amount: f64,
        date: CalendarDateTime,
        category: &str,
    ) -> bool {
        self.update_expense_fields(index, UpdateField::All, amount, category, date)
    }

    pub fn update_expense_fields(
        &mut self,
        index: usize,
        field: UpdateField,
        amount: f64,
        category: &str,
        date: CalendarDateTime,
    ) -> bool {
        match self
            .ledger
            .update_expense_fields(index, field, amount, category, date)
        {
            Ok(()) => {
                self.reporter.success("Expense updated successfully!");
                true
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn delete_income(&mut self, index: usize) -> bool {
        match self.ledger.delete_income(index) {
            Ok(_) => {
                self.reporter.success("Income deleted successfully!");
                true
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn delete_expense(&mut self, index: usize) -> bool {
        match self.ledger.delete_expense(index) {
            Ok(_) => {
                self.reporter.success("Expense deleted successfully!");
                true
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn set_budget(&mut self, category: &str, limit: f64) -> bool {
        match self.ledger.set_budget(category, limit) {
            Ok(BudgetChange::Updated) => {
                self.reporter
                    .success(format!("Budget for {category} updated to {limit}"));
                true
            }
            Ok(BudgetChange::Created) => {
                self.reporter
                    .success(format!("New budget created for {category}: {limit}"));
                true
            }
            Err(err) => self.fail(err),
        }
    }

    /// Reports the status of every budget. Nothing is persisted.
    pub fn check_budgets(&mut self) -> Vec<BudgetStatus> {
        let statuses = self.ledger.check_budgets(self.config.warning_ratio);
        if statuses.is_empty() {
            self.reporter.info("No budgets have been set yet.");
            return statuses;
        }
        self.reporter.section("Budget Status:");
        for status in &statuses {
            match status.tier {
                BudgetTier::Exceeded => self.reporter.error(status),
                BudgetTier::Warning => self.reporter.warning(status),
                BudgetTier::Normal => self.reporter.info(status),
            }
        }
        statuses
    }

    pub fn total_income(&self) -> f64 {
        self.ledger.total_income()
    }

    pub fn total_expenses(&self) -> f64 {
        self.ledger.total_expenses()
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn summary(&mut self) -> Summary {
        let summary = self.ledger.summary();
        report_summary(&mut self.reporter, &summary);
        summary
    }

    pub fn category_detail(&mut self, category: &str) -> bool {
        let Self {
            ledger, reporter, ..
        } = self;
        let detail = match ledger.category_detail(category) {
            Ok(detail) => detail,
            Err(err) => {
                warn!(%err, "category detail rejected");
                reporter.error(err);
                return false;
            }
        };

        report_summary(reporter, &detail.summary);
        reporter.info(format!(
            "Your Budget for category : {} is {}",
            detail.category, detail.limit
        ));
        reporter.info(format!("You spent {} on this category", detail.spent));
        reporter.info("Details:");
        if detail.expenses.is_empty() {
            reporter.info("No expenses found in this category.");
        }
        for expense in &detail.expenses {
            reporter.info(expense);
        }
        true
    }

    /// Reports the incomes and expenses dated inside `[start, end]`, swapping
    /// the bounds when they arrive reversed.
    pub fn report_for_period(&mut self, start: CalendarDateTime, end: CalendarDateTime) {
        let Self {
            ledger, reporter, ..
        } = self;
        let report = ledger.report_for_period(start, end);
        if report.swapped {
            reporter.warning(
                "Error: The start date is newer than the end date! We will be swapping the dates.",
            );
        }
        reporter.section(format!(
            "Transactions from {} to {}:",
            report.start, report.end
        ));

        reporter.section("Your Incomes:");
        if report.incomes.is_empty() {
            reporter.info("No incomes in this period.");
        }
        for income in &report.incomes {
            reporter.info(income);
        }

        reporter.section("Your Expenses:");
        if report.expenses.is_empty() {
            reporter.info("No expenses in this period.");
        }
        for expense in &report.expenses {
            reporter.info(expense);
        }
    }
}

fn list_transactions<R: Reporter>(
    reporter: &mut R,
    entries: &[Transaction],
    title: &str,
    empty: &str,
) -> usize {
    if entries.is_empty() {
        reporter.info(empty);
        return 0;
    }
    reporter.section(format!("=== All {title} ==="));
    for (index, entry) in entries.iter().enumerate() {
        reporter.info(format!("{index}: {entry}"));
    }
    entries.len()
}

fn report_summary<R: Reporter>(reporter: &mut R, summary: &Summary) {
    for line in summary.lines() {
        reporter.info(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reporter::{MemoryReporter, MessageKind};
    use crate::ledger::{FixedClock, TimeOfDay};

    fn today() -> CalendarDateTime {
        CalendarDateTime::new(2024, 6, 1, TimeOfDay::new(12, 0, 0))
    }

    fn tracker() -> Tracker<MemoryReporter, FixedClock> {
        Tracker::new(
            Ledger::new(),
            MemoryReporter::new(),
            FixedClock(today()),
            Config::default(),
        )
    }

    fn approve(_: f64, _: f64) -> bool {
        true
    }

    #[test]
    fn add_income_defaults_to_clock_and_alerts_large_amounts() {
        let mut tracker = tracker();
        assert!(tracker.add_income(20000.0, None, "Bonus"));
        assert_eq!(tracker.ledger().incomes()[0].date, today());
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "Alert: Large income added (20000)!",
                "Income added successfully!"
            ]
        );
    }

    #[test]
    fn rejected_income_reports_error() {
        let mut tracker = tracker();
        assert!(!tracker.add_income(-1.0, None, "Bonus"));
        assert!(tracker.ledger().incomes().is_empty());
        assert_eq!(tracker.reporter().lines(), vec!["Error: Negative amount!"]);
        assert_eq!(tracker.reporter().entries()[0].0, MessageKind::Error);
    }

    #[test]
    fn declined_overspend_reports_warning_and_cancel() {
        let mut tracker = tracker();
        tracker.add_income(50.0, None, "Gift");
        tracker.reporter_mut().clear();

        let mut decline = |_: f64, _: f64| false;
        assert!(!tracker.add_expense(80.0, None, "Food", &mut decline));
        assert!(tracker.ledger().expenses().is_empty());
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "*** Warning: The current balance (50) is not enough for this expense (80) ***",
                "Expense canceled."
            ]
        );
    }

    #[test]
    fn successful_expense_runs_budget_check() {
        let mut tracker = tracker();
        tracker.add_income(500.0, None, "Salary");
        tracker.set_budget("Food", 100.0);
        tracker.reporter_mut().clear();

        assert!(tracker.add_expense(95.0, None, "Food", &mut approve));
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "Expense added successfully!",
                "Budget Status:",
                "Food: WARNING: 95.0% used (5 remaining)"
            ]
        );
    }

    #[test]
    fn large_expense_raises_alert_before_success() {
        let mut tracker = tracker();
        tracker.add_income(20000.0, None, "Bonus");
        tracker.reporter_mut().clear();

        assert!(tracker.add_expense(15000.0, None, "Car", &mut approve));
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "Alert: Large expense added (15000)!",
                "Expense added successfully!",
                "No budgets have been set yet."
            ]
        );
        assert_eq!(tracker.reporter().entries()[0].0, MessageKind::Warning);
    }

    #[test]
    fn threshold_amount_itself_is_not_large() {
        let mut tracker = tracker();
        assert!(tracker.add_income(10000.0, None, "Salary"));
        assert!(tracker.add_expense(10000.0, None, "Rent", &mut approve));
        assert!(!tracker.reporter().contains("Alert:"));
    }

    #[test]
    fn configured_thresholds_drive_alerts_and_tiers() {
        let config = Config {
            large_amount_threshold: 500.0,
            warning_ratio: 0.5,
            ..Config::default()
        };
        let mut tracker = Tracker::new(
            Ledger::new(),
            MemoryReporter::new(),
            FixedClock(today()),
            config,
        );
        assert_eq!(tracker.config().warning_ratio, 0.5);

        tracker.add_income(600.0, None, "Freelance");
        assert!(tracker.reporter().contains("Alert: Large income added (600)!"));

        tracker.set_budget("Food", 100.0);
        tracker.reporter_mut().clear();
        assert!(tracker.add_expense(60.0, None, "Food", &mut approve));
        assert_eq!(
            tracker.reporter().entries().last(),
            Some(&(
                MessageKind::Warning,
                "Food: WARNING: 60.0% used (40 remaining)".to_string()
            ))
        );
    }

    #[test]
    fn check_budgets_without_budgets_reports_sentinel() {
        let mut tracker = tracker();
        assert!(tracker.check_budgets().is_empty());
        assert_eq!(
            tracker.reporter().lines(),
            vec!["No budgets have been set yet."]
        );
    }

    #[test]
    fn set_budget_reports_create_then_update() {
        let mut tracker = tracker();
        tracker.set_budget("Food", 100.0);
        tracker.set_budget("Food", 150.5);
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "New budget created for Food: 100",
                "Budget for Food updated to 150.5"
            ]
        );
        assert_eq!(tracker.ledger().budgets().len(), 1);
    }

    #[test]
    fn view_lists_positions_or_sentinel() {
        let mut tracker = tracker();
        assert_eq!(tracker.view_incomes(), 0);
        tracker.add_income(10.0, Some(CalendarDateTime::from_ymd(2024, 1, 5)), "Gift");
        tracker.reporter_mut().clear();
        assert_eq!(tracker.view_incomes(), 1);
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "=== All Incomes ===",
                "0: Source: Gift ,Amount: 10 ,Date: 2024-01-05 00:00:00"
            ]
        );
    }

    #[test]
    fn invalid_delete_is_reported_not_fatal() {
        let mut tracker = tracker();
        assert!(!tracker.delete_expense(0));
        assert_eq!(tracker.reporter().lines(), vec!["Invalid index!"]);
    }

    #[test]
    fn category_detail_reports_summary_and_matches() {
        let mut tracker = tracker();
        tracker.add_income(100.0, None, "Salary");
        tracker.add_expense(
            40.0,
            Some(CalendarDateTime::from_ymd(2024, 5, 1)),
            "Food",
            &mut approve,
        );
        tracker.reporter_mut().clear();

        assert!(tracker.category_detail("Food"));
        let lines = tracker.reporter().lines();
        assert_eq!(lines[0], "=== Financial Summary ===");
        assert_eq!(lines[1], "Total Income: 100.00");
        assert_eq!(lines[3], "Current Balance: 60.00");
        assert!(tracker
            .reporter()
            .contains("Your Budget for category : Food is 0"));
        assert!(tracker.reporter().contains("You spent 40 on this category"));
        assert_eq!(
            *lines.last().unwrap(),
            "Category: Food ,Amount: 40 ,Date: 2024-05-01 00:00:00"
        );

        tracker.reporter_mut().clear();
        assert!(!tracker.category_detail(""));
        assert_eq!(
            tracker.reporter().lines(),
            vec!["Error: Category cannot be empty!"]
        );
    }

    #[test]
    fn reversed_period_reports_swap_notice() {
        let mut tracker = tracker();
        let start = CalendarDateTime::from_ymd(2024, 1, 1);
        let end = CalendarDateTime::new(2024, 1, 31, TimeOfDay::end_of_day());
        tracker.report_for_period(end, start);
        assert_eq!(
            tracker.reporter().lines(),
            vec![
                "Error: The start date is newer than the end date! We will be swapping the dates.",
                "Transactions from 2024-01-01 00:00:00 to 2024-01-31 23:59:59:",
                "Your Incomes:",
                "No incomes in this period.",
                "Your Expenses:",
                "No expenses in this period."
            ]
        );
    }
}
