//! Error handling for typo-forge

use thiserror::Error;

/// Main error type for typo-forge
#[derive(Error, Debug, Clone)]
pub enum TypoForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The registrar answered with a non-success status.
    #[error("Availability service error ({status_code}): {message}")]
    ExternalService { status_code: u16, message: String },

    #[error("Malformed cache file '{path}': {message}")]
    MalformedCache { path: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TypoForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an external service error from a registrar status and body
    pub fn external_service(status_code: u16, message: impl Into<String>) -> Self {
        Self::ExternalService {
            status_code,
            message: message.into(),
        }
    }

    /// Create a malformed cache error
    pub fn malformed_cache(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedCache {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Status code reported by the registrar or transport, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ExternalService { status_code, .. } => Some(*status_code),
            Self::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or GODADDY_* variables", message)
            }
            Self::ExternalService { status_code, message } => {
                let hint = match status_code {
                    401 | 403 => "Verify your GoDaddy API key and secret",
                    429 => "The registrar is rate limiting requests, wait before retrying",
                    _ => "Results printed so far are still valid",
                };
                format!("❌ Registrar returned {}: {}\n💡 {}", status_code, message, hint)
            }
            Self::MalformedCache { path, message } => {
                format!("❌ Cache file {} is not valid JSON: {}\n💡 Run with --clear-cache to reset it", path, message)
            }
            Self::InvalidInput { message } => {
                format!("❌ Invalid input: {}\n💡 Check your input format", message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 This might be a temporary issue, try again", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for TypoForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for TypoForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TypoForgeError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::TypoForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::TypoForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! invalid_input {
    ($msg:expr) => {
        $crate::error::TypoForgeError::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::TypoForgeError::invalid_input(format!($fmt, $($arg)*))
    };
}
