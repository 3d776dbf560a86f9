pub mod main_menu;
pub mod transaction_menu;

use crate::core::reporter::Reporter;

/// Prints a menu title followed by its numbered entries.
pub(crate) fn render<R: Reporter>(reporter: &mut R, title: &str, entries: &[&str]) {
    reporter.section(title);
    for entry in entries {
        reporter.info(entry);
    }
}
