use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use holocron_core::{Endpoints, DEFAULT_API_BASE};
use holocron_engine::FetchSettings;
use holocron_logging::{LogDestination, UnknownDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;

const DEFAULT_CONFIG_FILE: &str = "holocron.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid api_base '{value}': {message}")]
    InvalidApiBase { value: String, message: String },
    #[error(transparent)]
    InvalidLogDestination(#[from] UnknownDestination),
    #[error("invalid log_level '{0}'")]
    InvalidLogLevel(String),
}

/// On-disk configuration. Every field has a default, so an empty file (or no
/// file at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub debounce_ms: u64,
    pub output_dir: PathBuf,
    pub log_destination: String,
    pub log_level: String,
    pub log_file: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce_ms: 350,
            output_dir: PathBuf::from("output"),
            log_destination: "file".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("holocron.log"),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: None,
            max_response_bytes: fetch.max_bytes,
        }
    }
}

/// Validated settings the rest of the app runs on.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub quiet_window: Duration,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub fetch: FetchSettings,
}

impl AppConfig {
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the explicit `--config` file, else `./holocron.ron` if it
    /// exists, else defaults. Command-line flags win over file values.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::read(path)?,
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::read(&implicit)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_cli(cli);
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(api_base) = &cli.api_base {
            self.api_base = api_base.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.debounce_ms = debounce_ms;
        }
        if let Some(destination) = cli.log {
            self.log_destination = match destination {
                LogDestination::File => "file",
                LogDestination::Terminal => "terminal",
                LogDestination::Both => "both",
            }
            .to_string();
        }
    }

    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let endpoints =
            Endpoints::new(&self.api_base).map_err(|err| ConfigError::InvalidApiBase {
                value: self.api_base.clone(),
                message: err.to_string(),
            })?;
        let log_destination = LogDestination::from_str(&self.log_destination)?;
        let log_level = LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;

        let fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::default()
        };

        Ok(Settings {
            endpoints,
            quiet_window: Duration::from_millis(self.debounce_ms),
            output_dir: self.output_dir.clone(),
            log_destination,
            log_level,
            log_file: self.log_file.clone(),
            fetch,
        })
    }
}
