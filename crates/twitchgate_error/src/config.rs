//! Configuration error types.

use derive_getters::Getters;

/// Ways configuration can fail to load.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged.
    #[display("Failed to read configuration: {}", _0)]
    Read(String),
    /// The merged sources did not deserialize.
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A value parsed but is outside its usable range.
    #[display("Invalid configuration value for {}: {}", field, reason)]
    Invalid {
        /// Dotted key of the offending value
        field: String,
        /// What the value must satisfy
        reason: String,
    },
    /// A required setting was not supplied.
    #[display("Missing setting: {}", _0)]
    Missing(String),
}

/// Configuration error with source location tracking.
///
/// # Examples
///
/// ```
/// use twitchgate_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid {
///     field: "chat.window_secs".into(),
///     reason: "must be at least 1".into(),
/// });
/// assert!(err.to_string().contains("chat.window_secs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl ConfigError {
    /// Source file where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ConfigErrorKind::Invalid`].
    #[track_caller]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid {
            field: field.into(),
            reason: reason.into(),
        })
    }
}

impl From<ConfigErrorKind> for ConfigError {
    #[track_caller]
    fn from(kind: ConfigErrorKind) -> Self {
        Self::new(kind)
    }
}
