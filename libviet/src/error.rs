use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the configuration artifact.
///
/// None of these ever reach the keystroke path: the engine logs them and
/// falls back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no user configuration directory could be determined")]
    NoConfigDir,
    #[error("config path {0} has no parent directory")]
    NoParent(PathBuf),
    #[error("config record has {found} fields, expected 4")]
    FieldCount { found: usize },
    #[error("config record tag is empty")]
    EmptyTag,
    #[error("invalid {field} delay '{value}'")]
    InvalidDelay { field: &'static str, value: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("could not serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
