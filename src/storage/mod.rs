pub mod text_backend;

use std::path::Path;

use crate::{errors::LedgerResult, ledger::Ledger};

/// Abstraction over persistence backends that read the whole ledger at startup
/// and overwrite it at shutdown.
pub trait StorageBackend {
    fn load(&self) -> LedgerResult<LoadReport>;
    fn save(&self, ledger: &Ledger) -> LedgerResult<()>;
    fn path(&self) -> &Path;
}

pub use text_backend::{
    decode_ledger, decode_ledger_bytes, encode_ledger, load_ledger, save_ledger, LoadReport, TextStorage,
    DEFAULT_DATA_FILE,
};
