use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
    pub station_column: Option<String>,
    pub date_column: Option<String>,
    pub temperature_column: Option<String>,
    pub date_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReportConfig {
    /// Only score the first N distinct stations
    pub station_limit: Option<usize>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LogConfig {
    pub filter: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    pub dataset: Option<DatasetConfig>,
    pub report: Option<ReportConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from WXQ_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WXQ_CONFIG").unwrap_or_else(|_| "wxq.toml".to_string());
        Self::load_from(path)
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    fn dataset(&self) -> Option<&DatasetConfig> {
        self.dataset.as_ref()
    }

    fn dataset_field(&self, field: impl Fn(&DatasetConfig) -> Option<&String>, default: &str) -> String {
        self.dataset()
            .and_then(field)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Default readings file, if configured
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset().and_then(|d| d.path.clone())
    }

    /// Station id column (default "station_id")
    pub fn station_column(&self) -> String {
        self.dataset_field(|d| d.station_column.as_ref(), "station_id")
    }

    /// Date column (default "date")
    pub fn date_column(&self) -> String {
        self.dataset_field(|d| d.date_column.as_ref(), "date")
    }

    /// Temperature column (default "temperature_c")
    pub fn temperature_column(&self) -> String {
        self.dataset_field(|d| d.temperature_column.as_ref(), "temperature_c")
    }

    /// chrono format of the date column (default "%Y-%m-%d")
    pub fn date_format(&self) -> String {
        self.dataset_field(|d| d.date_format.as_ref(), "%Y-%m-%d")
    }

    pub fn station_limit(&self) -> Option<usize> {
        self.report.as_ref().and_then(|r| r.station_limit)
    }

    pub fn report_json(&self) -> bool {
        self.report.as_ref().and_then(|r| r.json).unwrap_or(false)
    }

    /// Log filter (default "info,wxq=debug"); RUST_LOG still wins at init
    pub fn log_filter(&self) -> String {
        self.log
            .as_ref()
            .and_then(|l| l.filter.clone())
            .unwrap_or_else(|| "info,wxq=debug".to_string())
    }

    pub fn log_json(&self) -> bool {
        self.log.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}
