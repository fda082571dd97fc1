//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::http::DEFAULT_TIMEOUT_SECS;
use crate::infrastructure::image::DEFAULT_CACHE_SIZE;
use crate::infrastructure::picsum::{DEFAULT_PAGE_LIMIT, PICSUM_API_BASE};

pub(crate) const APP_NAME: &str = "photogrid";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

const FAVOURITES_FILE_NAME: &str = "favourites.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` and CLI overrides.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Photo API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image cache configuration.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Favourites persistence configuration.
    #[serde(default)]
    pub favourites: FavouritesConfig,
}

/// Photo API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the photo list endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of photos requested per list call.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Image cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Maximum number of decoded images kept in memory.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Favourites persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavouritesConfig {
    /// Favourites file; the data directory is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    PICSUM_API_BASE.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_SIZE
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.api_base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(capacity) = args.image_cache_capacity {
            self.images.cache_capacity = capacity;
        }
        if let Some(path) = &args.favourites_path {
            self.favourites.path = Some(path.clone());
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("photogrid.log"))
    }

    /// Returns default favourites file path.
    #[must_use]
    pub fn default_favourites_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(FAVOURITES_FILE_NAME))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective favourites path.
    #[must_use]
    pub fn effective_favourites_path(&self) -> Option<PathBuf> {
        self.favourites
            .path
            .clone()
            .or_else(Self::default_favourites_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            images: ImagesConfig::default(),
            favourites: FavouritesConfig::default(),
        }
    }
}
