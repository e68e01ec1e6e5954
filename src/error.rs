//! Error types for cibuild-etl
//!
//! Every job step returns `Result<T, Error>`. Nothing is retried: the first
//! error ends the run and the binary exits with [`Error::exit_code`].

use thiserror::Error;

/// The main error type for both jobs
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // CI Provider Errors
    // ============================================================================
    #[error("CI provider returned HTTP {status} for {url}: {body}")]
    UpstreamFetch {
        status: u16,
        url: String,
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Failed to write to table '{table}': {message}")]
    StoreWrite { table: String, message: String },

    #[error("Failed to query table '{table}': {message}")]
    StoreQuery { table: String, message: String },

    // ============================================================================
    // Object Store Errors
    // ============================================================================
    #[error("Failed to upload to {destination}: {message}")]
    Upload {
        destination: String,
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an upstream fetch error
    pub fn upstream(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a store write error
    pub fn store_write(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreWrite {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a store query error
    pub fn store_query(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreQuery {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create an upload error
    pub fn upload(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upload {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for cibuild-etl
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
