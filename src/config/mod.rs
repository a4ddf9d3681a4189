//! Configuration management.
//!
//! Settings are layered in this order, later sources winning:
//!
//! 1. built-in defaults (the API key defaults to `OPENAI_API_KEY`)
//! 2. a TOML configuration file
//! 3. `BOOK_ORGANIZER_*` environment variables
//!
//! # Configuration File Format
//!
//! ```toml
//! api_key = "sk-..."
//! model = "gpt-3.5-turbo"
//! base_url = "https://api.openai.com/v1"
//! response_format = "json_object"
//! temperature = 0.0
//! timeout_secs = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use config::ConfigError;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "book-organizer.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "BOOK_ORGANIZER";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// How the completion service is asked to shape its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Any JSON object; the schema is conveyed through the instruction only
    #[default]
    JsonObject,
    /// Strict schema-constrained output
    JsonSchema,
}

/// Application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// API credential for the completion service
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Completion model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (without the `/chat/completions` suffix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Output shaping requested from the service
    #[serde(default)]
    pub response_format: ResponseFormat,

    /// Sampling temperature, left to the service default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds, no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            model: default_model(),
            base_url: default_base_url(),
            response_format: ResponseFormat::default(),
            temperature: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("response_format", &self.response_format)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults
pub fn get_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the default locations.
///
/// Checks `./book-organizer.toml`, then `<config dir>/book-organizer/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("book-organizer").join("config.toml"))
        .filter(|path| path.is_file())
}
