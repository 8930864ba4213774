use chrono::{FixedOffset, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;
use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Offset of local wall-clock time from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Decimal places kept when rounding amounts for display.
    pub amount_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-BD".into(),
            currency: "BDT".into(),
            utc_offset_minutes: 360,
            amount_scale: 2,
        }
    }
}

impl Config {
    pub fn offset(&self) -> Result<FixedOffset, LedgerError> {
        if self.utc_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(LedgerError::Config(format!(
                "utc_offset_minutes {} is outside ±{MAX_OFFSET_MINUTES}",
                self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            LedgerError::Config(format!(
                "utc_offset_minutes {} is not a valid offset",
                self.utc_offset_minutes
            ))
        })
    }

    /// Current local wall-clock time, the `now` every period filter resolves against.
    pub fn now_local(&self) -> Result<NaiveDateTime, LedgerError> {
        Ok(Utc::now().with_timezone(&self.offset()?).naive_local())
    }

    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.amount_scale, RoundingStrategy::MidpointAwayFromZero)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        paths::ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.offset()?;
        tracing::info!(path = %self.path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.offset()?;
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
