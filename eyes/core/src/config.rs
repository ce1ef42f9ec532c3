//! TOML Configuration File Support
//!
//! Engine settings can come from a TOML file at
//! `$XDG_CONFIG_HOME/robot-eyes/eyes.toml`, from environment variables, or
//! from defaults.
//!
//! # Configuration Priority
//!
//! Highest first:
//! 1. CLI arguments (applied by the caller)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [display]
//! base_module = 0
//!
//! [blink]
//! auto = true
//! min_interval_ms = 5000
//! jitter_ms = 3000
//!
//! [text]
//! scroll_delay_ms = 40
//!
//! [random]
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blink::{DEFAULT_BLINK_JITTER_MS, DEFAULT_BLINK_MIN_MS};
use crate::text::DEFAULT_SCROLL_DELAY_MS;

/// Environment variable overriding the base module
pub const ENV_BASE_MODULE: &str = "ROBOT_EYES_BASE_MODULE";
/// Environment variable overriding auto-blink
pub const ENV_AUTO_BLINK: &str = "ROBOT_EYES_AUTO_BLINK";
/// Environment variable overriding the blink minimum
pub const ENV_BLINK_MIN_MS: &str = "ROBOT_EYES_BLINK_MIN_MS";
/// Environment variable overriding the blink jitter
pub const ENV_BLINK_JITTER_MS: &str = "ROBOT_EYES_BLINK_JITTER_MS";
/// Environment variable overriding the scroll delay
pub const ENV_SCROLL_DELAY_MS: &str = "ROBOT_EYES_SCROLL_DELAY_MS";
/// Environment variable fixing the random seed
pub const ENV_SEED: &str = "ROBOT_EYES_SEED";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Module index of the right eye
    pub base_module: Option<u8>,
}

/// Blink section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkToml {
    /// Whether idle blinking is on
    pub auto: Option<bool>,

    /// Minimum idle time before a blink in milliseconds
    pub min_interval_ms: Option<u16>,

    /// Upper bound of the random extra delay in milliseconds
    pub jitter_ms: Option<u16>,
}

/// Text section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextToml {
    /// Delay between scroll steps in milliseconds
    pub scroll_delay_ms: Option<u16>,
}

/// Random section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomToml {
    /// Fixed seed for blink jitter
    pub seed: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EyesToml {
    /// Display configuration section
    pub display: DisplayToml,

    /// Blink configuration section
    pub blink: BlinkToml,

    /// Text configuration section
    pub text: TextToml,

    /// Random configuration section
    pub random: RandomToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Settings for an [`AnimationEngine`](crate::AnimationEngine)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EyesConfig {
    /// Module index of the right eye; the left eye is the next module
    pub base_module: u8,

    /// Whether the eyes blink on their own while idle
    pub auto_blink: bool,

    /// Minimum idle time before a blink
    pub blink_min_interval_ms: u16,

    /// Upper bound of the random extra delay before a blink
    pub blink_jitter_ms: u16,

    /// Delay between text scroll steps
    pub scroll_delay_ms: u16,

    /// Fixed seed for blink jitter; entropy when `None`
    pub seed: Option<u64>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for EyesConfig {
    fn default() -> Self {
        Self {
            base_module: 0,
            auto_blink: true,
            blink_min_interval_ms: DEFAULT_BLINK_MIN_MS,
            blink_jitter_ms: DEFAULT_BLINK_JITTER_MS,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            seed: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl EyesConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that the types alone cannot rule out
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the left eye module would
    /// fall past the last addressable module.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_module == u8::MAX {
            return Err(ConfigError::ValidationError(format!(
                "base_module {} leaves no room for the left eye module",
                self.base_module
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/robot-eyes/eyes.toml` or
/// `~/.config/robot-eyes/eyes.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("robot-eyes").join("eyes.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// merged values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<EyesConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if the merged values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<EyesConfig, ConfigError> {
    let mut config = EyesConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_config = read_toml(config_path)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

fn read_toml(path: &Path) -> Result<EyesToml, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut EyesConfig, toml: &EyesToml) {
    if let Some(base) = toml.display.base_module {
        config.base_module = base;
    }
    if let Some(auto) = toml.blink.auto {
        config.auto_blink = auto;
    }
    if let Some(min) = toml.blink.min_interval_ms {
        config.blink_min_interval_ms = min;
    }
    if let Some(jitter) = toml.blink.jitter_ms {
        config.blink_jitter_ms = jitter;
    }
    if let Some(delay) = toml.text.scroll_delay_ms {
        config.scroll_delay_ms = delay;
    }
    if let Some(seed) = toml.random.seed {
        config.seed = Some(seed);
    }
}

/// Apply environment overrides, reading variables through `lookup`
///
/// Unparseable values are logged and ignored.
fn apply_env_config<F>(config: &mut EyesConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut touched = false;

    if let Some(v) = parse_env(&lookup, ENV_BASE_MODULE) {
        config.base_module = v;
        touched = true;
    }
    if let Some(v) = lookup(ENV_AUTO_BLINK).and_then(|raw| parse_bool(&raw)) {
        config.auto_blink = v;
        touched = true;
    }
    if let Some(v) = parse_env(&lookup, ENV_BLINK_MIN_MS) {
        config.blink_min_interval_ms = v;
        touched = true;
    }
    if let Some(v) = parse_env(&lookup, ENV_BLINK_JITTER_MS) {
        config.blink_jitter_ms = v;
        touched = true;
    }
    if let Some(v) = parse_env(&lookup, ENV_SCROLL_DELAY_MS) {
        config.scroll_delay_ms = v;
        touched = true;
    }
    if let Some(v) = parse_env(&lookup, ENV_SEED) {
        config.seed = Some(v);
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
    }
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(value = %raw, "Ignoring unparseable boolean override");
            None
        }
    }
}
