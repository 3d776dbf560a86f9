use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};

use super::{
    budget::{Budget, BudgetStatus},
    report::{CategoryDetail, PeriodReport, Summary},
    time::CalendarDateTime,
    transaction::{Transaction, UpdateField},
};

/// Fraction of a budget that must be passed before it is flagged.
pub const DEFAULT_WARNING_RATIO: f64 = 0.9;

/// Decides whether an expense larger than the current balance may proceed.
///
/// Receives the current balance and the requested amount.
pub trait OverspendConfirmation {
    fn confirm_overspend(&mut self, balance: f64, amount: f64) -> bool;
}

impl<F> OverspendConfirmation for F
where
    F: FnMut(f64, f64) -> bool,
{
    fn confirm_overspend(&mut self, balance: f64, amount: f64) -> bool {
        self(balance, amount)
    }
}

/// Result of [`Ledger::set_budget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetChange {
    Created,
    Updated,
}

/// In-memory store of incomes, expenses and budgets.
///
/// Collections keep insertion order and are addressed by 0-based position;
/// removing an element shifts every later element down by one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incomes(&self) -> &[Transaction] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty() && self.budgets.is_empty()
    }

    pub fn add_income(
        &mut self,
        amount: f64,
        date: CalendarDateTime,
        source: &str,
    ) -> LedgerResult<usize> {
        validate_amount(amount)?;
        validate_label(source, "Source")?;
        self.incomes.push(Transaction::income(source, amount, date));
        debug!(index = self.incomes.len() - 1, amount, "income added");
        Ok(self.incomes.len() - 1)
    }

    /// Appends an expense. When `amount` exceeds the current balance the
    /// `confirmation` is consulted and a refusal aborts with [`LedgerError::Cancelled`].
    pub fn add_expense(
        &mut self,
        amount: f64,
        date: CalendarDateTime,
        category: &str,
        confirmation: &mut dyn OverspendConfirmation,
    ) -> LedgerResult<usize> {
        validate_amount(amount)?;
        validate_label(category, "Category")?;
        let balance = self.balance();
        if amount > balance && !confirmation.confirm_overspend(balance, amount) {
            return Err(LedgerError::Cancelled);
        }
        self.expenses.push(Transaction::expense(category, amount, date));
        debug!(index = self.expenses.len() - 1, amount, "expense added");
        Ok(self.expenses.len() - 1)
    }

    pub fn update_income(
        &mut self,
        index: usize,
        amount: f64,
        date: CalendarDateTime,
        source: &str,
    ) -> LedgerResult<()> {
        self.update_income_fields(index, UpdateField::All, amount, source, date)
    }

    /// Updates only the fields named by `field`; the other arguments are ignored.
    pub fn update_income_fields(
        &mut self,
        index: usize,
        field: UpdateField,
        amount: f64,
        source: &str,
        date: CalendarDateTime,
    ) -> LedgerResult<()> {
        update_entry(&mut self.incomes, index, field, amount, source, date, "Source")?;
        debug!(index, ?field, "income updated");
        Ok(())
    }

    pub fn update_expense(
        &mut self,
        index: usize,
        amount: f64,
        date: CalendarDateTime,
        category: &str,
    ) -> LedgerResult<()> {
        self.update_expense_fields(index, UpdateField::All, amount, category, date)
    }

    pub fn update_expense_fields(
        &mut self,
        index: usize,
        field: UpdateField,
        amount: f64,
        category: &str,
        date: CalendarDateTime,
    ) -> LedgerResult<()> {
        update_entry(
            &mut self.expenses,
            index,
            field,
            amount,
            category,
            date,
            "Category",
        )?;
        debug!(index, ?field, "expense updated");
        Ok(())
    }

    pub fn delete_income(&mut self, index: usize) -> LedgerResult<Transaction> {
        let removed = remove_entry(&mut self.incomes, index)?;
        debug!(index, "income deleted");
        Ok(removed)
    }

    pub fn delete_expense(&mut self, index: usize) -> LedgerResult<Transaction> {
        let removed = remove_entry(&mut self.expenses, index)?;
        debug!(index, "expense deleted");
        Ok(removed)
    }

    /// Sets the limit for `category`, overwriting an existing budget with the
    /// exact same category name instead of adding a second one.
    pub fn set_budget(&mut self, category: &str, limit: f64) -> LedgerResult<BudgetChange> {
        if limit.is_nan() || limit < 0.0 {
            return Err(LedgerError::negative_limit());
        }
        validate_label(category, "Category")?;
        if let Some(existing) = self.budgets.iter_mut().find(|b| b.category == category) {
            existing.limit = limit;
            debug!(category, limit, "budget updated");
            return Ok(BudgetChange::Updated);
        }
        self.budgets.push(Budget::new(category, limit));
        debug!(category, limit, "budget created");
        Ok(BudgetChange::Created)
    }

    pub fn budget_limit(&self, category: &str) -> f64 {
        self.budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.limit)
            .unwrap_or(0.0)
    }

    /// Evaluates every budget against the expenses recorded in its category.
    pub fn check_budgets(&self, warning_ratio: f64) -> Vec<BudgetStatus> {
        self.budgets
            .iter()
            .map(|budget| {
                BudgetStatus::evaluate(
                    budget,
                    self.spent_in_category(&budget.category),
                    warning_ratio,
                )
            })
            .collect()
    }

    pub fn spent_in_category(&self, category: &str) -> f64 {
        self.expenses
            .iter()
            .filter(|txn| txn.label() == category)
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|txn| txn.amount).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|txn| txn.amount).sum()
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    pub fn summary(&self) -> Summary {
        let total_income = self.total_income();
        let total_expenses = self.total_expenses();
        Summary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn category_detail(&self, category: &str) -> LedgerResult<CategoryDetail<'_>> {
        validate_label(category, "Category")?;
        Ok(CategoryDetail {
            category: category.to_string(),
            summary: self.summary(),
            limit: self.budget_limit(category),
            spent: self.spent_in_category(category),
            expenses: self
                .expenses
                .iter()
                .filter(|txn| txn.label() == category)
                .collect(),
        })
    }

    /// Collects the records dated within `[start, end]`. Reversed bounds are
    /// swapped rather than rejected.
    pub fn report_for_period(
        &self,
        start: CalendarDateTime,
        end: CalendarDateTime,
    ) -> PeriodReport<'_> {
        let swapped = start > end;
        let (start, end) = if swapped { (end, start) } else { (start, end) };
        let within = |txn: &&Transaction| txn.falls_within(&start, &end);
        PeriodReport {
            start,
            end,
            swapped,
            incomes: self.incomes.iter().filter(within).collect(),
            expenses: self.expenses.iter().filter(within).collect(),
        }
    }

    /// Pushes a record read from storage without validation, mirroring what was persisted.
    pub(crate) fn restore_transaction(&mut self, transaction: Transaction) {
        if transaction.is_income() {
            self.incomes.push(transaction);
        } else {
            self.expenses.push(transaction);
        }
    }

    pub(crate) fn restore_budget(&mut self, budget: Budget) {
        self.budgets.push(budget);
    }
}

fn validate_amount(amount: f64) -> LedgerResult<()> {
    if amount.is_nan() || amount < 0.0 {
        return Err(LedgerError::negative_amount());
    }
    Ok(())
}

fn validate_label(value: &str, label: &str) -> LedgerResult<()> {
    if value.is_empty() {
        return Err(LedgerError::empty_label(label));
    }
    Ok(())
}

fn check_index(len: usize, index: usize) -> LedgerResult<()> {
    if index >= len {
        return Err(LedgerError::InvalidIndex { index, len });
    }
    Ok(())
}

fn update_entry(
    entries: &mut [Transaction],
    index: usize,
    field: UpdateField,
    amount: f64,
    label: &str,
    date: CalendarDateTime,
    label_name: &str,
) -> LedgerResult<()> {
    check_index(entries.len(), index)?;
    if field.touches_amount() {
        validate_amount(amount)?;
    }
    if field.touches_label() {
        validate_label(label, label_name)?;
    }

    let entry = &mut entries[index];
    if field.touches_amount() {
        entry.amount = amount;
    }
    if field.touches_label() {
        entry.set_label(label);
    }
    if field.touches_date() {
        entry.date = date;
    }
    Ok(())
}

fn remove_entry(entries: &mut Vec<Transaction>, index: usize) -> LedgerResult<Transaction> {
    check_index(entries.len(), index)?;
    Ok(entries.remove(index))
}
