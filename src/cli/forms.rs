//! Multi-prompt forms for dates and date ranges.

use crate::cli::{
    core::CliError,
    io::{read_int, Prompter},
};
use crate::core::reporter::Reporter;
use crate::ledger::{CalendarDateTime, TimeOfDay};

const DATE_CHOICE_PROMPT: &str =
    "Do you want to enter date and time or add transaction with current date?";

/// Reads year, month and day. `prefix` is prepended to every prompt.
pub fn read_date<P, R>(
    prompter: &mut P,
    reporter: &mut R,
    prefix: &str,
) -> Result<(i32, i32, i32), CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    let year = read_int(prompter, reporter, &format!("{prefix}Year (1900-9999)"), 1900, 9999)?;
    let month = read_int(prompter, reporter, &format!("{prefix}Month (1-12)"), 1, 12)?;
    let day = read_int(prompter, reporter, &format!("{prefix}Day (1-31)"), 1, 31)?;
    Ok((year, month, day))
}

/// Reads a full timestamp. A day past the end of the month falls back to the 1st.
pub fn read_date_time<P, R>(
    prompter: &mut P,
    reporter: &mut R,
    prefix: &str,
) -> Result<CalendarDateTime, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    let (year, month, day) = read_date(prompter, reporter, prefix)?;
    let hour = read_int(prompter, reporter, &format!("{prefix}Hour (0-23)"), 0, 23)?;
    let minute = read_int(prompter, reporter, &format!("{prefix}Minute (0-59)"), 0, 59)?;
    let second = read_int(prompter, reporter, &format!("{prefix}Second (0-59)"), 0, 59)?;
    Ok(CalendarDateTime::new(
        year,
        month,
        day,
        TimeOfDay::new(hour, minute, second),
    ))
}

/// Asks whether to enter a timestamp. `None` means "use the current time".
pub fn read_entry_date<P, R>(
    prompter: &mut P,
    reporter: &mut R,
) -> Result<Option<CalendarDateTime>, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    if prompter.confirm(DATE_CHOICE_PROMPT)? {
        read_date_time(prompter, reporter, "").map(Some)
    } else {
        Ok(None)
    }
}

/// Reads a start and an end date covering whole days.
pub fn read_period<P, R>(
    prompter: &mut P,
    reporter: &mut R,
) -> Result<(CalendarDateTime, CalendarDateTime), CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    reporter.section("Start Date:");
    let (year, month, day) = read_date(prompter, reporter, "")?;
    let start = CalendarDateTime::new(year, month, day, TimeOfDay::midnight());

    reporter.section("End Date:");
    let (year, month, day) = read_date(prompter, reporter, "")?;
    let end = CalendarDateTime::new(year, month, day, TimeOfDay::end_of_day());
    Ok((start, end))
}
