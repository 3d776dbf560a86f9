use std::fmt;

use serde::{Deserialize, Serialize};

use super::time::CalendarDateTime;

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub date: CalendarDateTime,
    pub kind: TransactionKind,
}

/// Distinguishes incomes from expenses and carries the variant-specific label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income { source: String },
    Expense { category: String },
}

impl Transaction {
    pub fn income(source: impl Into<String>, amount: f64, date: CalendarDateTime) -> Self {
        Self {
            amount,
            date,
            kind: TransactionKind::Income {
                source: source.into(),
            },
        }
    }

    pub fn expense(category: impl Into<String>, amount: f64, date: CalendarDateTime) -> Self {
        Self {
            amount,
            date,
            kind: TransactionKind::Expense {
                category: category.into(),
            },
        }
    }

    /// The source of an income or the category of an expense.
    pub fn label(&self) -> &str {
        match &self.kind {
            TransactionKind::Income { source } => source,
            TransactionKind::Expense { category } => category,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        match &mut self.kind {
            TransactionKind::Income { source } => *source = label.into(),
            TransactionKind::Expense { category } => *category = label.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    pub fn falls_within(&self, start: &CalendarDateTime, end: &CalendarDateTime) -> bool {
        self.date >= *start && self.date <= *end
    }
}

impl TransactionKind {
    /// Name of the label field as shown to users (`Source` or `Category`).
    pub fn label_name(&self) -> &'static str {
        match self {
            TransactionKind::Income { .. } => "Source",
            TransactionKind::Expense { .. } => "Category",
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ,Amount: {} ,Date: {}",
            self.kind.label_name(),
            self.label(),
            self.amount,
            self.date
        )
    }
}

/// Which fields a selective update touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Amount,
    /// The source of an income or the category of an expense.
    Label,
    Date,
    All,
}

impl UpdateField {
    pub fn touches_amount(self) -> bool {
        matches!(self, UpdateField::Amount | UpdateField::All)
    }

    pub fn touches_label(self) -> bool {
        matches!(self, UpdateField::Label | UpdateField::All)
    }

    pub fn touches_date(self) -> bool {
        matches!(self, UpdateField::Date | UpdateField::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_listing_format() {
        let date = CalendarDateTime::from_ymd(2024, 1, 2);
        let income = Transaction::income("Salary", 2500.5, date);
        assert_eq!(
            income.to_string(),
            "Source: Salary ,Amount: 2500.5 ,Date: 2024-01-02 00:00:00"
        );
        let expense = Transaction::expense("Food", 12.0, date);
        assert_eq!(
            expense.to_string(),
            "Category: Food ,Amount: 12 ,Date: 2024-01-02 00:00:00"
        );
    }

    #[test]
    fn set_label_keeps_variant() {
        let mut expense = Transaction::expense("Food", 1.0, CalendarDateTime::default());
        expense.set_label("Rent");
        assert_eq!(expense.label(), "Rent");
        assert!(!expense.is_income());
    }
}
