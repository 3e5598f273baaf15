//! Reader configuration

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Default number of bytes requested per underlying read
    pub const CHUNK_SIZE: usize = 1024;
}

/// Line reader configuration
///
/// Fixed for the lifetime of a [`LineReader`](crate::LineReader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) chunk_size: usize, // in bytes
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Bytes requested per underlying read
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Parse a configuration from TOML text.
    ///
    /// ```toml
    /// [reader]
    /// chunk_size = 4096
    /// ```
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        let mut builder = Config::builder();
        if let Some(size) = file.reader.chunk_size {
            builder = builder.chunk_size(size);
        }
        builder.build()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Configuration(
                "chunk_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    chunk_size: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read chunk size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }

        config.validate()?;
        Ok(config)
    }
}

/// On-disk configuration layout
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    reader: ReaderSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReaderSection {
    chunk_size: Option<usize>,
}
