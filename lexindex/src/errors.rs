use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Error kinds for lexindex operations.
///
/// Each kind maps to one category of the index-core failure taxonomy:
/// configuration problems are surfaced at schema or condition build time,
/// type and value problems per column at write or query time.
///
/// # Examples
///
/// ```rust,ignore
/// use lexindex::errors::{LexError, ErrorKind, LexResult};
///
/// fn example() -> LexResult<()> {
///     Err(LexError::new("digit budget must be positive", ErrorKind::ConfigError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Malformed schema/condition configuration or invalid parameter combination
    ConfigError,
    /// A mapper was invoked against a column kind or host type it does not support
    UnsupportedType,
    /// Malformed input value for a given encoder (bad hex, bad UUID, bad date string)
    FormatError,
    /// Numeric value exceeding the configured digit/precision budget
    RangeError,
    /// Semantic validation failure (e.g. interval end before start)
    ValidationError,
    /// Operation not supported by the resolved mapper (e.g. sorting analyzed text)
    UnsupportedOperation,
    /// Malformed JSON document for a schema or condition
    ParseError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConfigError => write!(f, "Configuration error"),
            ErrorKind::UnsupportedType => write!(f, "Unsupported type"),
            ErrorKind::FormatError => write!(f, "Format error"),
            ErrorKind::RangeError => write!(f, "Range error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::UnsupportedOperation => write!(f, "Unsupported operation"),
            ErrorKind::ParseError => write!(f, "Parse error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom lexindex error type.
///
/// `LexError` carries the error message, kind, and an optional cause chain,
/// plus a backtrace captured at construction time for debugging.
///
/// All errors are reported synchronously to the caller as part of the
/// schema-build, write, or query call that triggered them; nothing is
/// retried internally.
#[derive(Clone)]
pub struct LexError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<LexError>>,
    backtrace: Backtrace,
}

impl LexError {
    /// Creates a new `LexError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        LexError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `LexError` with a cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: LexError) -> Self {
        LexError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&LexError> {
        self.cause.as_deref()
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for LexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for lexindex operations.
///
/// `LexResult<T>` is shorthand for `Result<T, LexError>` and is used by
/// every fallible operation in the crate.
pub type LexResult<T> = Result<T, LexError>;

// From trait implementations for automatic error conversion
impl From<serde_json::Error> for LexError {
    fn from(err: serde_json::Error) -> Self {
        LexError::new(&format!("JSON error: {}", err), ErrorKind::ParseError)
    }
}

impl From<std::num::ParseIntError> for LexError {
    fn from(err: std::num::ParseIntError) -> Self {
        LexError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::FormatError,
        )
    }
}

impl From<std::num::ParseFloatError> for LexError {
    fn from(err: std::num::ParseFloatError) -> Self {
        LexError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::FormatError,
        )
    }
}

impl From<std::net::AddrParseError> for LexError {
    fn from(err: std::net::AddrParseError) -> Self {
        LexError::new(
            &format!("IP address parsing error: {}", err),
            ErrorKind::FormatError,
        )
    }
}

impl From<String> for LexError {
    fn from(msg: String) -> Self {
        LexError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for LexError {
    fn from(msg: &str) -> Self {
        LexError::new(msg, ErrorKind::InternalError)
    }
}
