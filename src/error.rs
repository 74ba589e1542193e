//! Error types for mlwcli.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mlwcli operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mlwcli.
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The jq expression could not be parsed or compiled.
    #[error("jq parse error: {0}")]
    QuerySyntax(String),

    /// The jq expression raised an error while running.
    #[error("jq error: {0}")]
    QueryEvaluation(String),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(#[source] std::io::Error),

    /// Reading or writing the config file failed.
    #[error("Config error ({}): {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// No home directory to place the config file in.
    #[error("Could not determine home directory; pass --config")]
    NoConfigDir,

    /// The command needs a service that has no stored credentials.
    #[error("{0} is not configured. Run: mlwcli auth login {0}")]
    NotConfigured(String),

    /// The service name is not one of the supported services.
    #[error("invalid service: {0} (must be 'miniflux', 'linkding' or 'wallabag')")]
    UnknownService(String),

    /// A required argument is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Remote failures
            Error::Network(_) | Error::Api { .. } => 1,
            // Usage errors
            Error::UnknownService(_) | Error::InvalidArgument(_) | Error::NotConfigured(_) => 2,
            // Config errors
            Error::ConfigIo { .. } | Error::ConfigParse { .. } | Error::NoConfigDir => 3,
            // Query errors
            Error::QuerySyntax(_) | Error::QueryEvaluation(_) => 4,
            // Output errors
            Error::Serialization(_) | Error::Output(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Network("down".into()).exit_code(), 1);
        assert_eq!(Error::UnknownService("rss".into()).exit_code(), 2);
        assert_eq!(Error::NoConfigDir.exit_code(), 3);
        assert_eq!(Error::QuerySyntax("test".into()).exit_code(), 4);
        assert_eq!(Error::QueryEvaluation("test".into()).exit_code(), 4);
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotConfigured("linkding".into());
        assert_eq!(
            err.to_string(),
            "linkding is not configured. Run: mlwcli auth login linkding"
        );

        let err = Error::Api {
            status: 401,
            message: "Invalid token".into(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid token");
    }

    #[test]
    fn test_config_io_display_includes_path() {
        let err = Error::ConfigIo {
            path: PathBuf::from("/tmp/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Config error (/tmp/config.toml): denied");
    }
}
