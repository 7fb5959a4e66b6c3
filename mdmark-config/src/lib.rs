//! Shared configuration loader for the mdmark tools.
//!
//! `defaults/mdmark.default.toml` is embedded into every binary so the
//! documented defaults and runtime behavior cannot drift. Applications layer
//! user files on top of those defaults via [`Loader`] before deserializing
//! into [`MdmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdmark_engine::{HighlightColor, IdGenerator, RenderOptions, SequentialIds, UuidIds};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdmark.default.toml");

/// Top-level configuration consumed by mdmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdmarkConfig {
    pub render: RenderConfig,
    pub highlight: HighlightConfig,
}

/// Markdown extensions enabled when rendering the live view.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions::from(&config)
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            tables: config.tables,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub default_color: String,
    pub ids: IdScheme,
}

impl HighlightConfig {
    /// The configured color, normalized like any other highlight color
    pub fn default_color(&self) -> HighlightColor {
        HighlightColor::from_css(&self.default_color)
    }
}

/// How highlight ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IdScheme {
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "sequential")]
    Sequential,
}

impl IdScheme {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdScheme::Uuid => Box::new(UuidIds),
            IdScheme::Sequential => Box::new(SequentialIds::new()),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MdmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdmarkConfig, ConfigError> {
    Loader::new().build()
}
