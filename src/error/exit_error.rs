//! An error bound to an exit code.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::Sentinel;
use crate::code::{Category, ExitCode};

/// Boxed, thread-safe error used as the cause of an [`ExitError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error carrying the exit code the process should terminate with.
///
/// When an `ExitError` appears anywhere in an error chain, the resolver
/// returns its code verbatim. That makes it the override point for callers
/// that already know how a failure should be classified.
#[derive(Debug)]
pub struct ExitError {
    code: ExitCode,
    message: String,
    cause: Option<BoxError>,
    // Cause is a sentinel attached only for tag matching.
    marker: bool,
}

impl ExitError {
    /// Creates an error with a code and a message. The message may be empty.
    pub fn new(code: ExitCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
            marker: false,
        }
    }

    /// Attaches an underlying cause.
    ///
    /// The cause is always reported in the structured record, sentinels included.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self.marker = false;
        self
    }

    /// Attaches `sentinel` as a marker for resolution. Unlike
    /// [`ExitError::with_cause`], the marker is left out of the record.
    pub(crate) fn with_marker(mut self, sentinel: Sentinel) -> Self {
        self.cause = Some(Box::new(sentinel));
        self.marker = true;
        self
    }

    /// Binds an existing error to `code`.
    ///
    /// The error's text becomes the message and the error itself becomes the
    /// cause, so anything matching on the chain still finds it.
    pub fn with_code(err: impl Into<BoxError>, code: ExitCode) -> Self {
        let cause = err.into();
        Self {
            code,
            message: cause.to_string(),
            cause: Some(cause),
            marker: false,
        }
    }

    /// Like [`ExitError::with_code`], but passes `None` through untouched.
    pub fn wrap<E: Into<BoxError>>(cause: Option<E>, code: ExitCode) -> Option<Self> {
        cause.map(|err| Self::with_code(err, code))
    }

    /// The bound exit code.
    pub fn code(&self) -> ExitCode {
        self.code
    }

    /// The message exactly as supplied, possibly empty.
    ///
    /// Use `to_string()` for the rendered text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The sentinel this error was built around, if its cause is a bare sentinel.
    pub fn sentinel(&self) -> Option<Sentinel> {
        self.cause()
            .and_then(|cause| cause.downcast_ref::<Sentinel>())
            .copied()
    }

    /// Category of the bound code.
    pub fn category(&self) -> Category {
        self.code.category()
    }

    /// Whether the bound code is retriable.
    pub fn is_retriable(&self) -> bool {
        self.code.is_retriable()
    }

    /// Whether the bound code reports a user mistake.
    pub fn is_user_error(&self) -> bool {
        self.code.is_user_error()
    }

    /// Builds the structured record used for logging and transport.
    ///
    /// Sentinels attached by the factory functions and by `From<Sentinel>`
    /// are markers, not descriptions of what went wrong, so they are left
    /// out of the `cause` field.
    pub fn record(&self) -> ExitErrorRecord {
        let cause = self
            .cause()
            .filter(|_| !self.marker)
            .map(|cause| cause.to_string());

        ExitErrorRecord {
            code: self.code.as_i32(),
            name: self.code.describe(),
            category: self.code.category(),
            message: self.to_string(),
            cause,
        }
    }

    /// Renders the structured record as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.record())
    }
}

/// Renders the most specific text available: the message, then the cause,
/// then the registry description of the code.
impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            return f.write_str(&self.message);
        }
        match &self.cause {
            Some(cause) => write!(f, "{}", cause),
            None => f.write_str(&self.code.describe()),
        }
    }
}

impl StdError for ExitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl Serialize for ExitError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

impl From<Sentinel> for ExitError {
    /// Builds an error whose code is the one the resolver assigns to `sentinel`.
    fn from(sentinel: Sentinel) -> Self {
        let code = crate::resolve::sentinel_code(sentinel);
        Self::new(code, sentinel.to_string()).with_marker(sentinel)
    }
}

impl From<&ExitError> for std::process::ExitCode {
    fn from(err: &ExitError) -> Self {
        err.code.into()
    }
}

/// The structured form of an [`ExitError`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitErrorRecord {
    /// Numeric exit code.
    pub code: i32,
    /// Registry description of the code.
    pub name: String,
    /// Category tag of the code.
    pub category: Category,
    /// Rendered error text.
    pub message: String,
    /// Text of the cause, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Extension for binding the error side of a `Result` to an exit code.
pub trait ResultExt<T> {
    /// Wraps an `Err` with [`ExitError::with_code`]; `Ok` passes through.
    fn exit_code(self, code: ExitCode) -> Result<T, ExitError>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    fn exit_code(self, code: ExitCode) -> Result<T, ExitError> {
        self.map_err(|err| ExitError::with_code(err, code))
    }
}

/// Creates an [`ExitError`] with a formatted message.
///
/// ```
/// use exitwise::{exit_error, ExitCode};
///
/// let err = exit_error!(ExitCode::VALIDATION, "invalid field {}", "email");
/// assert_eq!(err.to_string(), "invalid field email");
/// ```
#[macro_export]
macro_rules! exit_error {
    ($code:expr, $($arg:tt)*) => {
        $crate::ExitError::new($code, format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct RootCause;

    impl fmt::Display for RootCause {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "root cause")
        }
    }

    impl StdError for RootCause {}

    #[test]
    fn test_display_prefers_message() {
        let err = ExitError::new(ExitCode::IO_ERROR, "disk full").with_cause(RootCause);
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_display_falls_back_to_cause() {
        let err = ExitError::new(ExitCode::IO_ERROR, "").with_cause(RootCause);
        assert_eq!(err.to_string(), "root cause");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_falls_back_to_description() {
        let err = ExitError::new(ExitCode::CONFIG, "");
        assert_eq!(err.to_string(), "Configuration error");
        assert!(err.source().is_none());

        let unknown = ExitError::new(ExitCode::new(120), "");
        assert_eq!(unknown.to_string(), "Unknown exit code: 120");
    }

    #[test]
    fn test_with_code_preserves_cause() {
        let err = ExitError::with_code(RootCause, ExitCode::CONFIG);
        assert_eq!(err.code(), ExitCode::CONFIG);
        assert_eq!(err.message(), "root cause");
        let source = err.source().expect("cause should be kept");
        assert!(source.is::<RootCause>());
    }

    #[test]
    fn test_wrap_none_is_none() {
        assert!(ExitError::wrap(None::<RootCause>, ExitCode::CONFIG).is_none());

        let wrapped = ExitError::wrap(Some(RootCause), ExitCode::CONFIG).unwrap();
        assert_eq!(wrapped.code(), ExitCode::CONFIG);
    }

    #[test]
    fn test_result_ext() {
        let ok: Result<u8, RootCause> = Ok(3);
        assert_eq!(ok.exit_code(ExitCode::IO_ERROR).unwrap(), 3);

        let failed: Result<u8, RootCause> = Err(RootCause);
        let err = failed.exit_code(ExitCode::IO_ERROR).unwrap_err();
        assert_eq!(err.code(), ExitCode::IO_ERROR);
        assert_eq!(err.to_string(), "root cause");
    }

    #[test]
    fn test_exit_error_macro() {
        let err = exit_error!(ExitCode::VALIDATION, "invalid field {}", "email");
        assert_eq!(err.code(), ExitCode::VALIDATION);
        assert_eq!(err.to_string(), "invalid field email");
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_record_with_cause() {
        let err = ExitError::new(ExitCode::VALIDATION, "invalid input").with_cause("root cause");
        let record = err.record();
        assert_eq!(record.code, 85);
        assert_eq!(record.name, "Validation error");
        assert_eq!(record.category, Category::CliExtended);
        assert_eq!(record.message, "invalid input");
        assert_eq!(record.cause.as_deref(), Some("root cause"));
    }

    #[test]
    fn test_record_omits_sentinel_cause() {
        let err = ExitError::from(Sentinel::Validation);
        assert_eq!(err.code(), ExitCode::VALIDATION);
        assert_eq!(err.sentinel(), Some(Sentinel::Validation));
        assert!(err.record().cause.is_none());
    }

    #[test]
    fn test_record_keeps_explicit_sentinel_cause() {
        let err = ExitError::with_code(Sentinel::Io, ExitCode::IO_ERROR);
        assert_eq!(err.record().cause.as_deref(), Some("I/O error"));

        let err = ExitError::new(ExitCode::UNAVAILABLE, "backend down")
            .with_cause(Sentinel::Unavailable);
        assert_eq!(err.record().cause.as_deref(), Some("service unavailable"));
    }

    #[test]
    fn test_json_field_set() {
        let err = ExitError::new(ExitCode::NOT_FOUND, "").with_cause("missing row");
        let value: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["category", "cause", "code", "message", "name"]);
        assert_eq!(object["message"], "missing row");
        assert_eq!(object["category"], "cli_extended");
    }
}
