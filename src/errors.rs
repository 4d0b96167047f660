//! Error types for the envios driver client
//!
//! Errors are grouped by the component that raises them. None of them are
//! retried automatically; each is terminal for the operation that raised it.

use std::path::PathBuf;
use thiserror::Error;

/// Credential storage errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable credentials are stored
    #[error("No stored credentials. Run 'envios login' first")]
    MissingCredentials,

    /// File I/O error during credential storage
    #[error("Failed to access credential file {path}")]
    CredentialStorage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential file exists but cannot be parsed
    #[error("Credential file {path} is corrupted")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Credentials could not be serialized for storage
    #[error("Failed to serialize credentials")]
    Serialize(#[from] toml::ser::Error),

    /// No directory is available to hold the credential file
    #[error("Could not determine a directory for local storage. Set ENVIOS_HOME")]
    NoStorageDir,
}

/// Backend API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network unreachable, timeout, TLS failure
    #[error("Network error talking to the shipments backend")]
    Transport(#[from] reqwest::Error),

    /// Backend answered outside the 2xx range
    #[error("Error {status}: {body}")]
    Remote { status: u16, body: String },

    /// Response body was not a valid shipment list
    #[error("Malformed shipment list from backend")]
    Decode(#[from] serde_json::Error),

    /// Base URL cannot be turned into an endpoint URL
    #[error("Invalid base URL: {url} - {error}")]
    InvalidBaseUrl { url: String, error: String },
}

impl ApiError {
    /// HTTP status code carried by a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Backend API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is transient, i.e. worth the user trying again
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Api(ApiError::Transport(_)) => true,
            AppError::Api(ApiError::Remote { status, .. }) => *status >= 500,
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "authentication",
            AppError::Api(_) => "api",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// API result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
