//! User settings for the health score engine
//!
//! Settings are resolved in three layers:
//! 1. Embedded defaults (compiled into binary from `config/settings.toml`)
//! 2. Override file (explicit path, or ~/.local/share/nestegg/config/settings.toml)
//! 3. Environment (`NESTEGG_MONTH_START_DAY`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/settings.toml");

/// Environment variable overriding the financial month start day
pub const MONTH_START_DAY_ENV: &str = "NESTEGG_MONTH_START_DAY";

/// Latest day a financial month may start on (every month has a 28th)
pub const MAX_MONTH_START_DAY: u32 = 28;

/// Settings that shape how a month's health score is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSettings {
    /// Day of month (1-28) on which a financial month begins
    pub month_start_day: u32,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self { month_start_day: 1 }
    }
}

impl HealthSettings {
    /// Create settings with a validated month start day
    pub fn with_month_start_day(day: u32) -> Result<Self> {
        validate_start_day(day)?;
        Ok(Self {
            month_start_day: day,
        })
    }

    /// Load settings from the default override location and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings, preferring `override_path` over the default location
    pub fn load_from(override_path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::from_toml(DEFAULT_CONFIG)?;

        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        if let Some(path) = path.filter(|p| p.exists()) {
            debug!(path = %path.display(), "Loading settings override");
            let content = fs::read_to_string(&path)?;
            settings = settings.merge(&content)?;
        }

        if let Ok(raw) = std::env::var(MONTH_START_DAY_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(day) => {
                    validate_start_day(day)?;
                    settings.month_start_day = day;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", MONTH_START_DAY_ENV),
            }
        }

        Ok(settings)
    }

    /// Parse a complete settings document
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::default().merge(content)
    }

    /// Apply the values present in `content` on top of `self`
    fn merge(self, content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)?;
        let mut merged = self;
        if let Some(day) = file.health.and_then(|h| h.month_start_day) {
            validate_start_day(day)?;
            merged.month_start_day = day;
        }
        Ok(merged)
    }
}

/// Default settings override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nestegg").join("config").join("settings.toml"))
}

fn validate_start_day(day: u32) -> Result<()> {
    if (1..=MAX_MONTH_START_DAY).contains(&day) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "month_start_day must be between 1 and {}, got {}",
            MAX_MONTH_START_DAY, day
        )))
    }
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    health: Option<HealthSection>,
}

#[derive(Debug, Deserialize)]
struct HealthSection {
    month_start_day: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_parse() {
        let settings = HealthSettings::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(settings, HealthSettings::default());
    }

    #[test]
    fn test_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[health]\nmonth_start_day = 25").unwrap();

        let settings = HealthSettings::load_from(Some(file.path())).unwrap();
        assert_eq!(settings.month_start_day, 25);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = HealthSettings::from_toml("# nothing here\n").unwrap();
        assert_eq!(settings.month_start_day, 1);
    }

    #[test]
    fn test_rejects_out_of_range_day() {
        assert!(HealthSettings::from_toml("[health]\nmonth_start_day = 31").is_err());
        assert!(HealthSettings::from_toml("[health]\nmonth_start_day = 0").is_err());
        assert!(HealthSettings::with_month_start_day(28).is_ok());
        assert!(HealthSettings::with_month_start_day(29).is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = HealthSettings::from_toml("[health\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
