//! Error types for beanc.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors fall into six categories:
//! - **Network**: transport failures, timeouts, connection errors
//! - **Provider**: provider-reported API errors (non-2xx) and unparseable responses
//! - **Storage**: failures reading or writing the local connection store
//! - **Input**: missing required input (e.g., no authorization code in a callback)
//! - **Configuration**: config file parsing, validation, or missing values
//! - **Internal**: unexpected errors, bugs, or unclassified issues
//!
//! Per-property fetch errors never reach the user through this type: the
//! aggregation pipeline converts them to zero-valued entries. Errors that do
//! propagate here are terminal for the command that raised them. No call is
//! ever retried.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network issues (timeout, connection refused, transport).
    Network,
    /// Provider-specific issues (API errors, unparseable responses).
    Provider,
    /// Local connection store issues.
    Storage,
    /// Missing required input.
    Input,
    /// Configuration issues (parse errors, invalid values, missing files).
    Configuration,
    /// Internal errors (bugs, unexpected state, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network error",
            Self::Provider => "Provider error",
            Self::Storage => "Storage error",
            Self::Input => "Input error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Parse/format errors, invalid configuration, missing input
    ParseError = 3,
    /// Timeout
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for beanc operations.
#[derive(Error, Debug)]
pub enum BeancError {
    // ==========================================================================
    // Network errors (Category: Network)
    // ==========================================================================
    /// Request timed out after the specified duration.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// Generic network/transport error.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Provider errors (Category: Provider)
    // ==========================================================================
    /// Provider API returned an error response.
    #[error("provider {provider} API error: {message}")]
    ProviderApi {
        provider: String,
        status_code: Option<u16>,
        message: String,
    },

    /// Failed to parse a provider response.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    /// OAuth code exchange failed for a provider.
    #[error("OAuth exchange failed for {provider}: {reason}")]
    OAuthExchange { provider: String, reason: String },

    // ==========================================================================
    // Storage errors (Category: Storage)
    // ==========================================================================
    /// Connection store read/write failed.
    #[error("connection store error: {0}")]
    Store(String),

    /// No stored connection matches the given account.
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    // ==========================================================================
    // Input errors (Category: Input)
    // ==========================================================================
    /// Callback was invoked without an authorization code.
    #[error("no authorization code in callback")]
    MissingCode,

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file not found at expected path.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid or missing value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    // ==========================================================================
    // I/O errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ==========================================================================
    // Generic wrapper (Category: Internal)
    // ==========================================================================
    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeancError {
    /// Map error to exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Timeout(_) => ExitCode::Timeout,

            Self::ParseResponse(_)
            | Self::MissingCode
            | Self::Config(_)
            | Self::ConfigNotFound { .. }
            | Self::ConfigInvalid { .. }
            | Self::ConnectionNotFound(_) => ExitCode::ParseError,

            Self::Network(_)
            | Self::ProviderApi { .. }
            | Self::OAuthExchange { .. }
            | Self::Store(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout(_) | Self::Network(_) => ErrorCategory::Network,

            Self::ProviderApi { .. } | Self::ParseResponse(_) | Self::OAuthExchange { .. } => {
                ErrorCategory::Provider
            }

            Self::Store(_) | Self::ConnectionNotFound(_) => ErrorCategory::Storage,

            Self::MissingCode => ErrorCategory::Input,

            Self::Config(_) | Self::ConfigNotFound { .. } | Self::ConfigInvalid { .. } => {
                ErrorCategory::Configuration
            }

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the provider name if this error is provider-specific.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::ProviderApi { provider, .. } | Self::OAuthExchange { provider, .. } => {
                Some(provider)
            }
            _ => None,
        }
    }
}

/// Result type alias for beanc operations.
pub type Result<T> = std::result::Result<T, BeancError>;
