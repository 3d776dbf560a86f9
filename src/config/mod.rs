use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir},
    errors::LedgerError,
    ledger::DEFAULT_WARNING_RATIO,
    storage::DEFAULT_DATA_FILE,
};

/// Environment variable that overrides [`Config::data_file`].
pub const DATA_FILE_ENV: &str = "FINANCE_TRACKER_DATA";

pub const DEFAULT_LARGE_AMOUNT_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger store read at startup and overwritten at exit.
    pub data_file: PathBuf,
    /// Amounts strictly above this value trigger an advisory.
    pub large_amount_threshold: f64,
    /// Fraction of a budget limit that must be passed to raise a warning.
    pub warning_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            large_amount_threshold: DEFAULT_LARGE_AMOUNT_THRESHOLD,
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl Config {
    /// Applies `FINANCE_TRACKER_DATA` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env::var_os(DATA_FILE_ENV).filter(|value| !value.is_empty()) {
            self.data_file = PathBuf::from(path);
        }
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: config_file_in(&base),
        }
    }

    /// Reads the configuration file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
