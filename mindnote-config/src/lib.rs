//! Shared configuration loader for the mindnote toolchain.
//!
//! `defaults/mindnote.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`MindnoteConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mindnote_babel::asciidoc::OutlineOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mindnote.default.toml");

/// Project-local configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "mindnote.toml";

/// Top-level configuration consumed by mindnote applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MindnoteConfig {
    pub outline: OutlineConfig,
    pub document: DocumentConfig,
    pub logging: LoggingConfig,
}

/// Knobs of the outline walk.
#[derive(Debug, Clone, Deserialize)]
pub struct OutlineConfig {
    pub periodic_max_heading_depth: usize,
    pub simple_max_heading_depth: usize,
    pub image_extensions: Vec<String>,
    pub max_tree_depth: usize,
}

impl OutlineConfig {
    /// Options for weekly digests.
    pub fn periodic_options(&self) -> OutlineOptions {
        self.options(self.periodic_max_heading_depth)
    }

    /// Options for single-document exports.
    pub fn simple_options(&self) -> OutlineOptions {
        self.options(self.simple_max_heading_depth)
    }

    fn options(&self, max_heading_depth: usize) -> OutlineOptions {
        OutlineOptions::with_heading_depth(max_heading_depth)
            .with_image_extensions(self.image_extensions.clone())
            .with_max_tree_depth(self.max_tree_depth)
    }
}

/// Header values of generated documents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub author: String,
    pub prefix: String,
    pub images_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MindnoteConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MindnoteConfig, ConfigError> {
    Loader::new().build()
}
