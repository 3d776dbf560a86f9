//! Ledger domain models, report values, and the in-memory record store.

pub mod budget;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod report;
pub mod time;
pub mod transaction;

pub use budget::{Budget, BudgetStatus, BudgetTier};
pub use ledger::{BudgetChange, Ledger, OverspendConfirmation, DEFAULT_WARNING_RATIO};
pub use report::{CategoryDetail, PeriodReport, Summary};
pub use time::{CalendarDateTime, Clock, FixedClock, SystemClock, TimeOfDay};
pub use transaction::{Transaction, TransactionKind, UpdateField};
