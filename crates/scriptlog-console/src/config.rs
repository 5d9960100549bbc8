//! Logger configuration.
//!
//! `LoggerConfig` can be built programmatically, parsed from TOML, or read
//! from the environment. [`LoggerConfig::load`] combines the user config file
//! with environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use scriptlog_core::logging::targets;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "[scriptlog] ";

/// Configuration for a [`crate::Logger`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Include the `[MM/DD HH:MM]` segment.
    pub show_date_time: bool,
    /// Emit `debug` entries.
    pub debug_enabled: bool,
    /// Tag written at the start of every line.
    pub prefix: String,
    /// Colour override for the stderr sink (None = auto-detect)
    pub colors: Option<bool>,
    /// Append a backtrace to `trace` entries.
    pub backtraces: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            show_date_time: true,
            debug_enabled: false,
            prefix: DEFAULT_PREFIX.to_string(),
            colors: None,
            backtraces: true,
        }
    }
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `SCRIPTLOG_DATETIME` | 0/false | Hide the timestamp |
    /// | `SCRIPTLOG_DEBUG` | (set, not 0/false) | Enable debug entries |
    /// | `SCRIPTLOG_PREFIX` | text | Line prefix |
    /// | `SCRIPTLOG_FORCE_COLOR` | (set) | Force colours |
    /// | `SCRIPTLOG_PLAIN` | (set) | Disable colours |
    /// | `NO_COLOR` | (set) | Disable colours (standard) |
    /// | `SCRIPTLOG_BACKTRACE` | 0/false | No backtrace on `trace` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of this config.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_off = |v: &str| v == "0" || v.eq_ignore_ascii_case("false");

        if lookup("SCRIPTLOG_DATETIME").is_some_and(|v| is_off(&v)) {
            self.show_date_time = false;
        }
        if let Some(v) = lookup("SCRIPTLOG_DEBUG") {
            self.debug_enabled = !is_off(&v);
        }
        if let Some(prefix) = lookup("SCRIPTLOG_PREFIX") {
            self.prefix = prefix;
        }
        if lookup("SCRIPTLOG_FORCE_COLOR").is_some() {
            self.colors = Some(true);
        } else if lookup("SCRIPTLOG_PLAIN").is_some() || lookup("NO_COLOR").is_some() {
            self.colors = Some(false);
        }
        if lookup("SCRIPTLOG_BACKTRACE").is_some_and(|v| is_off(&v)) {
            self.backtraces = false;
        }
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// `<config dir>/scriptlog/config.toml`, if a config dir exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scriptlog").join("config.toml"))
    }

    /// The user config file (when present and valid) plus environment
    /// overrides. A broken file is reported and ignored.
    #[must_use]
    pub fn load() -> Self {
        let base = match Self::default_path() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(config) => {
                    log::debug!(target: targets::CONSOLE, "Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!(target: targets::CONSOLE, "Ignoring {}: {err}", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        base.with_env()
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn show_date_time(mut self, show: bool) -> Self {
        self.show_date_time = show;
        self
    }

    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Force colour output on or off
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn backtraces(mut self, enabled: bool) -> Self {
        self.backtraces = enabled;
        self
    }

    /// Whether the stderr sink should colour its output.
    #[must_use]
    pub fn resolve_colors(&self) -> bool {
        self.colors
            .unwrap_or_else(crate::detection::should_enable_color)
    }
}

/// Errors reading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Toml(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err)
    }
}
