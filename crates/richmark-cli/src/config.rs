//! Configuration loader for the richmark binary.
//!
//! `defaults/richmark.default.toml` is embedded into the binary. A user file
//! and command-line overrides are layered on top via [`Loader`] before the
//! result is deserialized into [`RichmarkConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use richmark::MarkdownOptions;
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/richmark.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RichmarkConfig {
    pub markdown: MarkdownConfig,
    pub logging: LoggingConfig,
}

/// Mirrors the knobs exposed by [`MarkdownOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_list_marker: char,
    pub ordered_list_marker: String,
    pub em_delimiter: char,
    pub strong_delimiter: String,
    pub fence: String,
    pub escape_text: bool,
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            bullet_list_marker: config.bullet_list_marker,
            ordered_list_marker: config.ordered_list_marker,
            em_delimiter: config.em_delimiter,
            strong_delimiter: config.strong_delimiter,
            fence: config.fence,
            escape_text: config.escape_text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
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

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RichmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_converter_defaults() {
        let config = Loader::new().build().expect("defaults to deserialize");
        let options: MarkdownOptions = config.markdown.into();
        assert_eq!(options, MarkdownOptions::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("markdown.escape_text", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.markdown.escape_text);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[markdown]\nbullet_list_marker = \"*\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.markdown.bullet_list_marker, '*');
        assert_eq!(config.markdown.fence, "```");
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/richmark.toml")
            .build();
        assert!(result.is_err());
    }
}
