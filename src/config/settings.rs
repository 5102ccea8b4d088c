//! Settings file structures.
//!
//! Every field has a default, so an empty object (or no file at all) is a
//! valid settings file.

use serde::Deserialize;

use crate::error::ConfigError;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Contents of `config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Editor schema hint, not interpreted.
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Free-form note, not interpreted.
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Drawing style of generated footprints.
    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks that style values are usable and the log level is known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad
    /// setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("style.line_width", self.style.line_width),
            ("style.text_size", self.style.text_size),
            ("style.text_thickness", self.style.text_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be a positive number, got {value}"),
                });
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "unknown log level '{}', expected one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Line and text style of generated footprints, in millimetres.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Width of silkscreen, fab and courtyard lines.
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Text height and width.
    #[serde(default = "default_text_size")]
    pub text_size: f64,

    /// Text stroke thickness.
    #[serde(default = "default_text_thickness")]
    pub text_thickness: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            text_size: default_text_size(),
            text_thickness: default_text_thickness(),
        }
    }
}

const fn default_line_width() -> f64 {
    0.15
}

const fn default_text_size() -> f64 {
    1.0
}

const fn default_text_thickness() -> f64 {
    0.15
}

/// Log verbosity used when no `-v`/`-q` flag is given.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn` or `error`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
