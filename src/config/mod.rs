//! Persisted display preferences.

use std::{
    collections::BTreeMap,
    env, fmt,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::Deserializer, Deserialize, Serialize};
use tracing::debug;

use crate::currency::{CurrencyCode, DisplayRates, FormatOptions, LocaleConfig};
use crate::errors::{FinboardError, Result};
use crate::list::{SortDirection, SortField, SortSpec};
use crate::schedule::UrgencyThresholds;

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "finboard";
const HOME_ENV: &str = "FINBOARD_HOME";
const TMP_SUFFIX: &str = "tmp";

/// User-configurable list and formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    /// Currency amounts are converted into when sorting mixed lists.
    pub currency: CurrencyCode,
    #[serde(default)]
    pub urgency: UrgencyThresholds,
    #[serde(default = "Config::default_sort_field")]
    pub default_sort: SortField,
    #[serde(default)]
    pub default_direction: SortDirection,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub format: FormatOptions,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub display_rates: BTreeMap<CurrencyCode, f64>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: CurrencyCode::default(),
            urgency: UrgencyThresholds::default(),
            default_sort: Self::default_sort_field(),
            default_direction: SortDirection::default(),
            view_mode: ViewMode::default(),
            format: FormatOptions::default(),
            display_rates: BTreeMap::new(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_sort_field() -> SortField {
        SortField::Date
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_sort(&self) -> SortSpec {
        SortSpec::new(self.default_sort, self.default_direction)
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn display_rates(&self) -> DisplayRates {
        DisplayRates {
            base: self.currency.clone(),
            rates: self.display_rates.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let urgency = &self.urgency;
        if urgency.high_within_days < 0 || urgency.medium_within_days < urgency.high_within_days {
            return Err(FinboardError::Config(format!(
                "urgency thresholds must satisfy 0 <= high ({}) <= medium ({})",
                urgency.high_within_days, urgency.medium_within_days
            )));
        }
        if let Some((code, rate)) = self
            .display_rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(FinboardError::Config(format!(
                "display rate for {code} must be positive, got {rate}"
            )));
        }
        Ok(())
    }
}

/// How list pages lay out their rows.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Card,
    #[default]
    List,
}

impl ViewMode {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "card" | "cards" => ViewMode::Card,
            _ => ViewMode::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewMode::Card => "card",
            ViewMode::List => "list",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|value| ViewMode::from_str(&value))
            .unwrap_or_default())
    }
}

/// Loads and atomically saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Config file inside `base`. The directory is created on first save.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_FILE))
    }

    /// `$FINBOARD_HOME/config.json`, else the platform config directory.
    pub fn default_location() -> Self {
        let base = match env::var_os(HOME_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => dirs::config_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        };
        Self::with_base_dir(base)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored config, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| FinboardError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates, creates missing parent directories, then writes atomically.
    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_view_mode_falls_back_to_list() {
        let config: Config =
            serde_json::from_str(r#"{"locale":"en-US","currency":"USD","view_mode":"grid"}"#)
                .unwrap();
        assert_eq!(config.view_mode, ViewMode::List);
        assert_eq!(config.default_sort, SortField::Date);
        assert!(config.ui_color_enabled);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = Config::default();
        config.urgency.high_within_days = 20;
        assert!(matches!(config.validate(), Err(FinboardError::Config(_))));
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        let mut config = Config::default();
        config
            .display_rates
            .insert(CurrencyCode::parse("EUR").unwrap(), 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn tmp_path_keeps_original_extension() {
        assert_eq!(
            tmp_path(Path::new("/x/config.json")),
            PathBuf::from("/x/config.json.tmp")
        );
    }
}
