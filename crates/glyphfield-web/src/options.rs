#![forbid(unsafe_code)]

//! Options accepted by `init(canvas, options)`.
//!
//! The options object is the engine config with two presentation extras; any
//! field may be omitted:
//!
//! ```json
//! {
//!   "cell_size": 24,
//!   "hover_color": "#ff3366",
//!   "settle_duration": 800,
//!   "font_family": "'JetBrains Mono', monospace"
//! }
//! ```

use core::fmt;

use glyphfield_engine::config::{ConfigError, EngineConfig};
use serde::Deserialize;

/// Font stack used when none is given.
pub const DEFAULT_FONT_FAMILY: &str = "ui-monospace, Menlo, Consolas, monospace";

/// Parsed host options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebOptions {
    /// Engine tunables, flattened into the top-level object.
    #[serde(flatten)]
    pub engine: EngineConfig,
    /// CSS font family for glyphs.
    pub font_family: String,
    /// Glyph size as a fraction of the cell edge.
    pub font_scale: f32,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_scale: 0.8,
        }
    }
}

impl WebOptions {
    /// Parse and validate a JSON options string.
    ///
    /// Blank input, `null`, and `undefined` mean "all defaults".
    pub fn from_json(json: &str) -> Result<Self, WebError> {
        let trimmed = json.trim();
        let options = if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            Self::default()
        } else {
            serde_json::from_str(trimmed).map_err(|err| WebError::InvalidOptions(err.to_string()))?
        };
        options.validate()?;
        Ok(options)
    }

    /// Check engine values and presentation extras.
    pub fn validate(&self) -> Result<(), WebError> {
        self.engine.validate().map_err(WebError::Config)?;
        if !self.font_scale.is_finite() || self.font_scale <= 0.0 {
            return Err(WebError::InvalidOptions(format!(
                "font_scale must be a positive number, got {}",
                self.font_scale
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(WebError::InvalidOptions("font_family is empty".to_string()));
        }
        Ok(())
    }

    /// Glyph size in logical pixels, at least 1.
    pub fn font_px(&self) -> u32 {
        let px = (f32::from(self.engine.cell_size) * self.font_scale).round();
        (px as u32).max(1)
    }

    /// CSS `font` shorthand for the 2D context.
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_px(), self.font_family.trim())
    }
}

/// Web host failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// The canvas has no 2D rendering context.
    MissingContext,
    /// The options value is not valid JSON or has out-of-range extras.
    InvalidOptions(String),
    /// The engine rejected the configuration.
    Config(ConfigError),
    /// A method that needs `init` was called first.
    NotInitialized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext => write!(f, "canvas has no 2d context"),
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::Config(err) => write!(f, "invalid engine config: {err}"),
            Self::NotInitialized => write!(f, "glyphfield is not initialized"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for WebError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
