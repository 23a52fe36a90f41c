//! Export configuration
//!
//! Options controlling SVG output. Configurations can be built in code with
//! the `with_*` setters or loaded from a TOML file; every key is optional.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Size;

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Whether styling goes into CSS classes instead of inline attributes
    pub use_css: bool,

    /// Whether to format output with newlines and indentation
    pub pretty_print: bool,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Number of fractional digits written for coordinates and offsets
    pub precision: usize,

    /// Prefix for generated CSS class names (e.g., "s" for "s0")
    pub class_prefix: String,

    /// Comment written right after the XML declaration
    pub comment: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            use_css: true,
            pretty_print: true,
            standalone: true,
            precision: 4,
            class_prefix: "s".to_string(),
            comment: None,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether styles are written as CSS classes
    pub fn with_css(mut self, use_css: bool) -> Self {
        self.use_css = use_css;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set the number of fractional digits
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Set the generator comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Configuration for one export session
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Canvas size written as the root `width`/`height`
    pub canvas: Option<Size>,
}

impl ExportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the SVG output configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, size: Size) -> Self {
        self.canvas = Some(size);
        self
    }
}
