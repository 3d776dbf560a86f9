use std::fmt;

use serde::{Deserialize, Serialize};

/// A spending guardrail for a specific category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }
}

/// Usage tier of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Normal,
    Warning,
    Exceeded,
}

/// Spending measured against one budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub tier: BudgetTier,
}

impl BudgetStatus {
    /// Classifies `spent` against `limit`; `warning_ratio` is the fraction of the
    /// limit that must be strictly passed before a warning is raised.
    pub fn evaluate(budget: &Budget, spent: f64, warning_ratio: f64) -> Self {
        let tier = if spent > budget.limit {
            BudgetTier::Exceeded
        } else if spent > budget.limit * warning_ratio {
            BudgetTier::Warning
        } else {
            BudgetTier::Normal
        };
        Self {
            category: budget.category.clone(),
            limit: budget.limit,
            spent,
            tier,
        }
    }

    /// Percentage of the limit already spent; zero for a zero limit.
    pub fn percentage(&self) -> f64 {
        if self.limit > 0.0 {
            self.spent / self.limit * 100.0
        } else {
            0.0
        }
    }

    pub fn overage(&self) -> f64 {
        self.spent - self.limit
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            BudgetTier::Exceeded => write!(
                f,
                "{}: EXCEEDED by {} ({:.1}%)",
                self.category,
                self.overage(),
                self.percentage()
            ),
            BudgetTier::Warning => write!(
                f,
                "{}: WARNING: {:.1}% used ({} remaining)",
                self.category,
                self.percentage(),
                self.remaining()
            ),
            BudgetTier::Normal => write!(
                f,
                "{}: {:.1}% used ({} remaining)",
                self.category,
                self.percentage(),
                self.remaining()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(limit: f64) -> Budget {
        Budget::new("Food", limit)
    }

    #[test]
    fn spending_exactly_the_limit_is_not_exceeded() {
        let status = BudgetStatus::evaluate(&food(100.0), 100.0, 0.9);
        assert_eq!(status.tier, BudgetTier::Warning);
        assert_eq!(status.to_string(), "Food: WARNING: 100.0% used (0 remaining)");
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(
            BudgetStatus::evaluate(&food(100.0), 101.0, 0.9).tier,
            BudgetTier::Exceeded
        );
        assert_eq!(
            BudgetStatus::evaluate(&food(100.0), 91.0, 0.9).tier,
            BudgetTier::Warning
        );
        assert_eq!(
            BudgetStatus::evaluate(&food(100.0), 90.0, 0.9).tier,
            BudgetTier::Normal
        );
        assert_eq!(
            BudgetStatus::evaluate(&food(100.0), 50.0, 0.9).tier,
            BudgetTier::Normal
        );
    }

    #[test]
    fn zero_limit_reports_zero_percent() {
        let status = BudgetStatus::evaluate(&food(0.0), 25.0, 0.9);
        assert_eq!(status.tier, BudgetTier::Exceeded);
        assert_eq!(status.percentage(), 0.0);
        assert_eq!(status.to_string(), "Food: EXCEEDED by 25 (0.0%)");
    }
}
