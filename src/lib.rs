#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps a single-user ledger of incomes, expenses and
//! per-category budgets, with reports over the whole ledger or a date range.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Tracker tracing initialized.");
    });
}
