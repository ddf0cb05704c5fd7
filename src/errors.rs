//! Error types for cognibank operations.
//!
//! Three layers, from innermost to outermost:
//!
//! - [`CalculatorError`]: input-domain violations raised by the loan calculator
//!   when it runs under [`InputPolicy::Reject`](crate::calculator::InputPolicy).
//! - [`ApiError`]: failures talking to the CogniBank backend.
//! - [`CogniError`]: the crate-wide error, wrapping the two above together with
//!   configuration, input parsing and I/O failures.
//!
//! Every [`CogniError`] carries a stable [`ErrorCode`] and a classification
//! (`is_retryable`, `is_user_fixable`) used by the CLI to pick its message.
//!
//! # Error Codes
//!
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Backend (network) errors
//! - E020-E029: Configuration errors
//! - E030-E039: Calculator errors
//! - E040-E049: Input parsing errors
//!
//! # Example
//!
//! ```rust
//! use cognibank::errors::{ApiError, CogniError, ErrorCode};
//!
//! let err: CogniError = ApiError::Connection("refused".into()).into();
//! assert_eq!(err.code(), ErrorCode::API_CONNECTION);
//! assert!(err.is_retryable());
//! ```

use crate::calculator::InputField;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - file not found
    pub const IO_FILE_NOT_FOUND: ErrorCode = ErrorCode("E001");
    /// I/O error - file already exists
    pub const IO_ALREADY_EXISTS: ErrorCode = ErrorCode("E002");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Backend error - connection refused or reset
    pub const API_CONNECTION: ErrorCode = ErrorCode("E010");
    /// Backend error - request timed out
    pub const API_TIMEOUT: ErrorCode = ErrorCode("E011");
    /// Backend error - non-success HTTP status
    pub const API_STATUS: ErrorCode = ErrorCode("E012");
    /// Backend error - response body did not match the contract
    pub const API_DECODE: ErrorCode = ErrorCode("E013");
    /// Backend error - base URL or path could not be turned into a URI
    pub const API_INVALID_URL: ErrorCode = ErrorCode("E014");

    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - unparsable file
    pub const CONFIG_PARSE: ErrorCode = ErrorCode("E021");

    /// Calculator error - input outside its documented range
    pub const CALC_OUT_OF_RANGE: ErrorCode = ErrorCode("E030");

    /// Input error - unparsable amount, loan type or message
    pub const INPUT_INVALID: ErrorCode = ErrorCode("E040");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised by the calculator when input falls outside its documented range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("{field} {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: InputField,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Failure talking to the CogniBank backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, reset, or the body stream broke mid-read
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-2xx status
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Transient failures worth another attempt: network trouble and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::InvalidUrl(_) => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Connection(_) => ErrorCode::API_CONNECTION,
            Self::Timeout(_) => ErrorCode::API_TIMEOUT,
            Self::Status { .. } => ErrorCode::API_STATUS,
            Self::Decode { .. } => ErrorCode::API_DECODE,
            Self::InvalidUrl(_) => ErrorCode::API_INVALID_URL,
        }
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum CogniError {
    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        path: Option<PathBuf>,
    },

    #[error("invalid input: {0}")]
    Input(String),

    #[error("I/O error: {message}")]
    Io {
        code: ErrorCode,
        message: String,
        path: Option<PathBuf>,
    },
}

impl CogniError {
    /// Create a configuration validation error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_INVALID,
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration parse error tied to a file.
    pub fn config_parse(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_PARSE,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Create an I/O error, deriving the code from the underlying error kind.
    pub fn io(error: &std::io::Error, path: Option<PathBuf>) -> Self {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::IO_FILE_NOT_FOUND,
            std::io::ErrorKind::AlreadyExists => ErrorCode::IO_ALREADY_EXISTS,
            _ => ErrorCode::IO_GENERIC,
        };
        Self::Io {
            code,
            message: error.to_string(),
            path,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Calculator(_) => ErrorCode::CALC_OUT_OF_RANGE,
            Self::Api(e) => e.code(),
            Self::Config { code, .. } | Self::Io { code, .. } => *code,
            Self::Input(_) => ErrorCode::INPUT_INVALID,
        }
    }

    /// Whether repeating the same operation later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Whether the user can fix the cause by changing their input or config.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        match self {
            Self::Calculator(_) | Self::Config { .. } | Self::Input(_) => true,
            Self::Api(ApiError::InvalidUrl(_)) => true,
            Self::Api(ApiError::Status { status, .. }) => (400..500).contains(status),
            Self::Api(_) | Self::Io { .. } => false,
        }
    }
}

impl From<std::io::Error> for CogniError {
    fn from(error: std::io::Error) -> Self {
        Self::io(&error, None)
    }
}

pub type Result<T> = std::result::Result<T, CogniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ApiError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = ApiError::Status {
            status: 400,
            body: "Invalid loan type".into(),
        };
        assert!(!err.is_retryable());
        assert!(CogniError::from(err).is_user_fixable());
    }

    #[test]
    fn test_timeout_code() {
        let err: CogniError = ApiError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(err.code(), ErrorCode::API_TIMEOUT);
        assert!(err.is_retryable());
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_out_of_range_message_names_the_field() {
        let err = CalculatorError::OutOfRange {
            field: InputField::CreditScore,
            value: 950,
            min: 300,
            max: 900,
        };
        assert_eq!(
            err.to_string(),
            "credit score 950 is outside the allowed range [300, 900]"
        );
        assert_eq!(CogniError::from(err).code().as_str(), "E030");
    }

    #[test]
    fn test_io_error_code_from_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CogniError::io(&io, Some(PathBuf::from(".cognibank.toml")));
        assert_eq!(err.code(), ErrorCode::IO_FILE_NOT_FOUND);
    }
}
