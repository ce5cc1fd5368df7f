use thiserror::Error;

/// Failures while reading or validating `autocheck.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Malformed config: {0}")]
    InvalidFormat(String),

    /// Rejected by validation; `field` is the dotted key, e.g. `scan.max_text_length`.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A `${VAR}` reference names a variable that is not set.
    #[error("Environment variable {0} referenced in config is not set")]
    EnvVarNotSet(String),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
