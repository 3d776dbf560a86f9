//! Read-only report values computed from a [`Ledger`](super::Ledger).

use std::fmt;

use super::{time::CalendarDateTime, transaction::Transaction};

/// Totals across every income and expense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

impl Summary {
    /// Report block lines, amounts fixed to two decimals.
    pub fn lines(&self) -> Vec<String> {
        vec![
            "=== Financial Summary ===".into(),
            format!("Total Income: {:.2}", self.total_income),
            format!("Total Expenses: {:.2}", self.total_expenses),
            format!("Current Balance: {:.2}", self.balance),
            "========================".into(),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Budget, spending and matching expenses for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail<'a> {
    pub category: String,
    pub summary: Summary,
    /// Configured limit, zero when no budget exists.
    pub limit: f64,
    pub spent: f64,
    pub expenses: Vec<&'a Transaction>,
}

/// Incomes and expenses dated inside an inclusive window.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport<'a> {
    pub start: CalendarDateTime,
    pub end: CalendarDateTime,
    /// Whether the caller passed the bounds in reverse order.
    pub swapped: bool,
    pub incomes: Vec<&'a Transaction>,
    pub expenses: Vec<&'a Transaction>,
}
