//! Comma-delimited, line-oriented ledger format.
//!
//! ```text
//! INCOME,<source>,<amount>,<YYYY-MM-DD HH:MM:SS>
//! EXPENSE,<category>,<amount>,<YYYY-MM-DD HH:MM:SS>
//! BUDGET,<category>,<amount>
//! ```
//!
//! Every line is decoded independently: a bad line is skipped and recorded as
//! a warning, the rest of the file still loads.

use std::{
    borrow::Cow,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    errors::{LedgerError, LedgerResult},
    ledger::{Budget, CalendarDateTime, Ledger, Transaction, TransactionKind},
};

use super::StorageBackend;

pub const DEFAULT_DATA_FILE: &str = "finance_data.csv";

const INCOME_TAG: &str = "INCOME";
const EXPENSE_TAG: &str = "EXPENSE";
const BUDGET_TAG: &str = "BUDGET";

/// Outcome of decoding a persisted ledger.
#[derive(Debug)]
pub struct LoadReport {
    pub ledger: Ledger,
    /// Lines that were skipped because a numeric field could not be read.
    pub warnings: Vec<LedgerError>,
    /// `false` when the store did not exist and an empty ledger was produced.
    pub found: bool,
}

impl LoadReport {
    fn missing() -> Self {
        Self {
            ledger: Ledger::new(),
            warnings: Vec::new(),
            found: false,
        }
    }
}

/// File-backed storage using the comma-delimited format.
#[derive(Debug, Clone)]
pub struct TextStorage {
    path: PathBuf,
}

impl TextStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for TextStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl StorageBackend for TextStorage {
    fn load(&self) -> LedgerResult<LoadReport> {
        load_ledger(&self.path)
    }

    fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        save_ledger(ledger, &self.path)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads the store at `path`. A missing file yields an empty ledger, not an error.
/// Bytes that are not valid UTF-8 are replaced line by line rather than failing
/// the whole load.
pub fn load_ledger(path: &Path) -> LedgerResult<LoadReport> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no ledger file found, starting empty");
            return Ok(LoadReport::missing());
        }
        Err(err) => return Err(err.into()),
    };
    let report = decode_ledger_bytes(&data);
    info!(
        path = %path.display(),
        incomes = report.ledger.incomes().len(),
        expenses = report.ledger.expenses().len(),
        budgets = report.ledger.budgets().len(),
        skipped = report.warnings.len(),
        "ledger loaded"
    );
    Ok(report)
}

/// Overwrites `path` with the encoded ledger. Prior contents are not kept.
pub fn save_ledger(ledger: &Ledger, path: &Path) -> LedgerResult<()> {
    write_file(path, &encode_ledger(ledger))?;
    info!(
        path = %path.display(),
        incomes = ledger.incomes().len(),
        expenses = ledger.expenses().len(),
        budgets = ledger.budgets().len(),
        "ledger saved"
    );
    Ok(())
}

/// Incomes first, then expenses, then budgets, each in stored order.
pub fn encode_ledger(ledger: &Ledger) -> String {
    let mut out = String::new();
    for txn in ledger.incomes().iter().chain(ledger.expenses()) {
        out.push_str(&encode_transaction(txn));
        out.push('\n');
    }
    for budget in ledger.budgets() {
        out.push_str(&format!(
            "{},{},{}\n",
            BUDGET_TAG, budget.category, budget.limit
        ));
    }
    out
}

fn encode_transaction(txn: &Transaction) -> String {
    let tag = match txn.kind {
        TransactionKind::Income { .. } => INCOME_TAG,
        TransactionKind::Expense { .. } => EXPENSE_TAG,
    };
    format!("{},{},{},{}", tag, txn.label(), txn.amount, txn.date)
}

pub fn decode_ledger(data: &str) -> LoadReport {
    decode_ledger_bytes(data.as_bytes())
}

pub fn decode_ledger_bytes(data: &[u8]) -> LoadReport {
    let mut ledger = Ledger::new();
    let mut warnings = Vec::new();

    for (offset, raw) in data.split(|byte| *byte == b'\n').enumerate() {
        let line_number = offset + 1;
        let text = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = text {
            warn!(line = line_number, "invalid UTF-8 in ledger line, replacing bytes");
        }
        match decode_line(&text, line_number) {
            Ok(Some(Record::Transaction(txn))) => ledger.restore_transaction(txn),
            Ok(Some(Record::Budget(budget))) => ledger.restore_budget(budget),
            Ok(None) => {}
            Err(err) => {
                warn!(line = line_number, %err, "skipping ledger line");
                warnings.push(err);
            }
        }
    }

    LoadReport {
        ledger,
        warnings,
        found: true,
    }
}

enum Record {
    Transaction(Transaction),
    Budget(Budget),
}

/// Decodes one line. `Ok(None)` means the line is silently ignored.
fn decode_line(raw: &str, line: usize) -> LedgerResult<Option<Record>> {
    let text = raw.strip_suffix('\r').unwrap_or(raw);
    if text.is_empty() {
        return Ok(None);
    }

    let mut fields = text.splitn(4, ',');
    let tag = fields.next().unwrap_or_default();
    let label = fields.next().unwrap_or_default();
    let amount = fields.next().unwrap_or_default();
    let date = fields.next().unwrap_or_default();

    if tag.is_empty() || label.is_empty() {
        return Ok(None);
    }

    let record = match tag {
        BUDGET_TAG => {
            let limit = parse_amount(amount).ok_or(LedgerError::Parse {
                line,
                field: "budget",
            })?;
            Record::Budget(Budget::new(label, limit))
        }
        INCOME_TAG | EXPENSE_TAG => {
            let amount = parse_amount(amount).ok_or(LedgerError::Parse {
                line,
                field: "amount",
            })?;
            let date = CalendarDateTime::parse_lenient(date);
            if tag == INCOME_TAG {
                Record::Transaction(Transaction::income(label, amount, date))
            } else {
                Record::Transaction(Transaction::expense(label, amount, date))
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(record))
}

/// Reads the longest numeric prefix after leading whitespace, so `100abc`
/// is 100. Fails only when no digits lead the field or the value overflows.
fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = leading_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = leading_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = leading_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

fn write_file(path: &Path, data: &str) -> LedgerResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TimeOfDay;
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let date = CalendarDateTime::new(2024, 2, 14, TimeOfDay::new(18, 5, 9));
        ledger.add_income(2500.75, date, "Salary").unwrap();
        ledger
            .add_expense(0.1, date, "Coffee", &mut |_: f64, _: f64| true)
            .unwrap();
        ledger.set_budget("Coffee", 30.0).unwrap();
        ledger
    }

    #[test]
    fn encodes_sections_in_order() {
        let encoded = encode_ledger(&sample_ledger());
        assert_eq!(
            encoded,
            "INCOME,Salary,2500.75,2024-02-14 18:05:09\n\
             EXPENSE,Coffee,0.1,2024-02-14 18:05:09\n\
             BUDGET,Coffee,30\n"
        );
    }

    #[test]
    fn decode_skips_blank_unknown_and_headless_lines() {
        let report = decode_ledger("\nNOTE,hello,1\n,Food,5\nINCOME,,5,2024-01-01 00:00:00\n");
        assert!(report.ledger.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn decode_reports_bad_numbers_with_line_numbers() {
        let report = decode_ledger(
            "BUDGET,Food,notanumber\nEXPENSE,Food,abc,2024-01-01 00:00:00\nBUDGET,Rent,900\n",
        );
        assert_eq!(report.ledger.budgets().len(), 1);
        assert_eq!(report.ledger.budgets()[0].category, "Rent");
        let messages: Vec<String> = report.warnings.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Invalid budget on line 1, skipping.",
                "Invalid amount on line 2, skipping."
            ]
        );
    }

    #[test]
    fn decode_reads_leading_numeric_prefix() {
        let report = decode_ledger(
            "BUDGET,Food,100abc\n\
             INCOME,Salary,  250.5 USD,2024-01-01 00:00:00\n\
             EXPENSE,Rent,3e,2024-01-01 00:00:00\n\
             EXPENSE,Car,1e5x,2024-01-01 00:00:00\n",
        );
        assert!(report.warnings.is_empty());
        assert_eq!(report.ledger.budgets()[0].limit, 100.0);
        assert_eq!(report.ledger.incomes()[0].amount, 250.5);
        assert_eq!(report.ledger.expenses()[0].amount, 3.0);
        assert_eq!(report.ledger.expenses()[1].amount, 100000.0);
    }

    #[test]
    fn parse_amount_needs_digits_and_a_finite_value() {
        assert_eq!(parse_amount("-.5"), Some(-0.5));
        assert_eq!(parse_amount("7."), Some(7.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount(".e3"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1e400"), None);
    }

    #[test]
    fn decode_defaults_broken_dates() {
        let report = decode_ledger("INCOME,Gift,10,soon\nEXPENSE,Food,3\n");
        assert_eq!(report.ledger.incomes()[0].date, CalendarDateTime::default());
        assert_eq!(report.ledger.expenses()[0].date, CalendarDateTime::default());
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let temp = TempDir::new().expect("temp dir");
        let report = load_ledger(&temp.path().join("absent.csv")).expect("load");
        assert!(!report.found);
        assert!(report.ledger.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let storage = TextStorage::new(temp.path().join("ledger.csv"));
        let ledger = sample_ledger();
        storage.save(&ledger).expect("save ledger");
        let loaded = storage.load().expect("load ledger");
        assert!(loaded.found);
        assert_eq!(loaded.ledger, ledger);
    }
}
