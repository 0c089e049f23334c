//! Error types for WAV output.

use std::io;

/// Result type alias for wavpipe operations
pub type WavResult<T> = Result<T, WavError>;

/// Main error type for WAV output operations
///
/// Errors are `Clone` so a writer can keep the first failure and hand the
/// same value back on every later call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WavError {
    /// The byte sink refused part or all of a write
    #[error("Sink write failed ({kind:?}): {message}")]
    Sink {
        /// Kind reported by the underlying I/O error
        kind: io::ErrorKind,
        /// Error message from the sink
        message: String,
    },

    /// Creating or opening an output file failed
    #[error("File I/O error: {message}")]
    File {
        /// Error message describing the file operation failure
        message: String,
    },

    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// The other end of a sample channel is gone
    #[error("Sample channel error: {message}")]
    Channel {
        /// Error message describing the channel failure
        message: String,
    },
}

impl WavError {
    /// Create a new sink error
    #[must_use]
    pub fn sink<S: Into<String>>(kind: io::ErrorKind, message: S) -> Self {
        Self::Sink {
            kind,
            message: message.into(),
        }
    }

    /// Create a new file error
    #[must_use]
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::File {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new channel error
    #[must_use]
    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::Configuration { .. }
        )
    }

    /// Get the error category for logging
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Sink { .. } => "sink",
            Self::File { .. } => "file",
            Self::InvalidInput { .. } => "input",
            Self::Configuration { .. } => "configuration",
            Self::Channel { .. } => "channel",
        }
    }
}

impl From<io::Error> for WavError {
    fn from(err: io::Error) -> Self {
        Self::sink(err.kind(), err.to_string())
    }
}

impl From<toml::de::Error> for WavError {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WavError::invalid_input("empty file name");
        assert_eq!(err.to_string(), "Invalid input: empty file name");

        let err = WavError::sink(io::ErrorKind::BrokenPipe, "pipe closed");
        assert_eq!(err.to_string(), "Sink write failed (BrokenPipe): pipe closed");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(WavError::sink(io::ErrorKind::Other, "test").category(), "sink");
        assert_eq!(WavError::file("test").category(), "file");
        assert_eq!(WavError::invalid_input("test").category(), "input");
        assert_eq!(WavError::configuration("test").category(), "configuration");
        assert_eq!(WavError::channel("test").category(), "channel");
    }

    #[test]
    fn test_user_errors() {
        assert!(WavError::invalid_input("test").is_user_error());
        assert!(WavError::configuration("test").is_user_error());
        assert!(!WavError::sink(io::ErrorKind::Other, "test").is_user_error());
        assert!(!WavError::file("test").is_user_error());
        assert!(!WavError::channel("test").is_user_error());
    }

    #[test]
    fn test_from_io_error_keeps_kind() {
        let io_err = io::Error::new(io::ErrorKind::WriteZero, "disk full");
        let err = WavError::from(io_err);
        assert_eq!(
            err,
            WavError::Sink {
                kind: io::ErrorKind::WriteZero,
                message: "disk full".to_string(),
            }
        );
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("sample_rate = = 1").unwrap_err();
        let err = WavError::from(toml_err);
        assert!(matches!(err, WavError::Configuration { .. }));
    }

    #[test]
    fn test_error_clone() {
        let err1 = WavError::sink(io::ErrorKind::BrokenPipe, "gone");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
