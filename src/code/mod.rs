//! The exit-code registry.
//!
//! Codes follow POSIX and BSD `sysexits.h` conventions and are grouped into
//! contiguous ranges:
//! - `0`: success
//! - `1-63`: general errors
//! - `64-79`: user errors (sysexits)
//! - `80-99`: extended CLI errors
//! - `128+`: termination by signal
//!
//! Anything else is unknown. The registry is a set of associated constants on
//! [`ExitCode`], so it needs no initialization and is safe to read from any thread.

pub mod classification;
pub mod http;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub use classification::{category, is_retriable, is_user_error, Category};
pub use http::{from_http_status, to_http_status};

/// A semantic program exit code.
///
/// The type keeps whatever value it was built from, so codes outside the
/// process domain (negative values, or values above 255) can still be
/// classified. Conversion to [`std::process::ExitCode`] is where the value gets
/// narrowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ExitCode(i32);

impl ExitCode {
    // ===== Success =====

    /// Successful program completion.
    pub const SUCCESS: ExitCode = ExitCode(0);

    // ===== General errors (1-63) =====

    /// General internal error.
    pub const ERROR_INTERNAL: ExitCode = ExitCode(1);
    /// Alias of [`ExitCode::ERROR_INTERNAL`].
    pub const ERROR: ExitCode = Self::ERROR_INTERNAL;
    /// Incorrect command or argument usage.
    pub const INVALID_ARGUMENT: ExitCode = ExitCode(2);
    /// Alias of [`ExitCode::INVALID_ARGUMENT`].
    pub const USAGE_ERROR: ExitCode = Self::INVALID_ARGUMENT;

    // ===== User errors (64-79), sysexits.h =====

    /// Incorrect command usage (arguments, flags, syntax).
    pub const CMD_USAGE: ExitCode = ExitCode(64);
    /// Incorrect user input data.
    pub const DATA_ERROR: ExitCode = ExitCode(65);
    /// Input file does not exist or is not readable.
    pub const NO_INPUT: ExitCode = ExitCode(66);
    /// The specified user does not exist.
    pub const NO_USER: ExitCode = ExitCode(67);
    /// The specified host does not exist.
    pub const NO_HOST: ExitCode = ExitCode(68);
    /// A required service is unavailable.
    pub const UNAVAILABLE: ExitCode = ExitCode(69);
    /// Internal software error.
    pub const SOFTWARE: ExitCode = ExitCode(70);
    /// Operating system error (cannot fork, cannot create pipe, ...).
    pub const OS_ERROR: ExitCode = ExitCode(71);
    /// A system file is missing or corrupted.
    pub const OS_FILE: ExitCode = ExitCode(72);
    /// A user-specified output file cannot be created.
    pub const CANT_CREATE: ExitCode = ExitCode(73);
    /// Input/output error.
    pub const IO_ERROR: ExitCode = ExitCode(74);
    /// Temporary failure; the operation may succeed if retried later.
    pub const TEMP_FAIL: ExitCode = ExitCode(75);
    /// The remote side violated the protocol.
    pub const PROTOCOL: ExitCode = ExitCode(76);
    /// Insufficient permission to perform the operation.
    pub const NO_PERMISSION: ExitCode = ExitCode(77);
    /// Something is unconfigured or misconfigured.
    pub const CONFIG: ExitCode = ExitCode(78);

    // ===== Extended CLI errors (80-99) =====

    /// Authentication required.
    pub const AUTH_REQUIRED: ExitCode = ExitCode(80);
    /// Authentication failed.
    pub const AUTH_FAILED: ExitCode = ExitCode(81);
    /// Authenticated but not authorized.
    pub const FORBIDDEN: ExitCode = ExitCode(82);
    /// Resource not found.
    pub const NOT_FOUND: ExitCode = ExitCode(83);
    /// Resource conflict.
    pub const CONFLICT: ExitCode = ExitCode(84);
    /// Data validation failed.
    pub const VALIDATION: ExitCode = ExitCode(85);
    /// Request rate limit exceeded.
    pub const RATE_LIMIT: ExitCode = ExitCode(86);
    /// Quota exceeded.
    pub const QUOTA_EXCEEDED: ExitCode = ExitCode(87);

    // ===== Signals (128+) =====

    /// Interrupted by the user (SIGINT, Ctrl+C).
    pub const INTERRUPTED: ExitCode = ExitCode(130);
    /// Terminated by the system (SIGTERM).
    pub const TERMINATED: ExitCode = ExitCode(143);

    /// Every canonical named code, one per numeric value, in ascending order.
    pub const NAMED: [ExitCode; 28] = [
        Self::SUCCESS,
        Self::ERROR_INTERNAL,
        Self::INVALID_ARGUMENT,
        Self::CMD_USAGE,
        Self::DATA_ERROR,
        Self::NO_INPUT,
        Self::NO_USER,
        Self::NO_HOST,
        Self::UNAVAILABLE,
        Self::SOFTWARE,
        Self::OS_ERROR,
        Self::OS_FILE,
        Self::CANT_CREATE,
        Self::IO_ERROR,
        Self::TEMP_FAIL,
        Self::PROTOCOL,
        Self::NO_PERMISSION,
        Self::CONFIG,
        Self::AUTH_REQUIRED,
        Self::AUTH_FAILED,
        Self::FORBIDDEN,
        Self::NOT_FOUND,
        Self::CONFLICT,
        Self::VALIDATION,
        Self::RATE_LIMIT,
        Self::QUOTA_EXCEEDED,
        Self::INTERRUPTED,
        Self::TERMINATED,
    ];

    /// Creates an exit code from a raw value.
    pub const fn new(value: i32) -> Self {
        ExitCode(value)
    }

    /// Returns the raw numeric value.
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns true for [`ExitCode::SUCCESS`].
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the value matches one of the named constants.
    pub fn is_named(self) -> bool {
        self.name().is_some()
    }

    /// Returns the registry description for named codes, `None` otherwise.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SUCCESS => "Success",
            Self::ERROR_INTERNAL => "Internal error",
            Self::INVALID_ARGUMENT => "Invalid argument",
            Self::CMD_USAGE => "Command usage error",
            Self::DATA_ERROR => "Data format error",
            Self::NO_INPUT => "Input file not found",
            Self::NO_USER => "User not found",
            Self::NO_HOST => "Host not found",
            Self::UNAVAILABLE => "Service unavailable",
            Self::SOFTWARE => "Internal software error",
            Self::OS_ERROR => "Operating system error",
            Self::OS_FILE => "System file error",
            Self::CANT_CREATE => "Cannot create output file",
            Self::IO_ERROR => "I/O error",
            Self::TEMP_FAIL => "Temporary failure",
            Self::PROTOCOL => "Protocol error",
            Self::NO_PERMISSION => "Permission denied",
            Self::CONFIG => "Configuration error",
            Self::AUTH_REQUIRED => "Authentication required",
            Self::AUTH_FAILED => "Authentication failed",
            Self::FORBIDDEN => "Forbidden",
            Self::NOT_FOUND => "Not found",
            Self::CONFLICT => "Conflict",
            Self::VALIDATION => "Validation error",
            Self::RATE_LIMIT => "Rate limit exceeded",
            Self::QUOTA_EXCEEDED => "Quota exceeded",
            Self::INTERRUPTED => "Interrupted by user",
            Self::TERMINATED => "Terminated by system",
            _ => return None,
        };
        Some(name)
    }

    /// Returns a human-readable description of the code.
    ///
    /// Never fails: codes outside the registry are described as
    /// `"Unknown exit code: <n>"`.
    pub fn describe(self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => format!("Unknown exit code: {}", self.0),
        }
    }

    /// Returns the category derived from the code's numeric range.
    pub fn category(self) -> Category {
        classification::category(self)
    }

    /// Returns true if the failure is worth retrying later.
    pub fn is_retriable(self) -> bool {
        classification::is_retriable(self)
    }

    /// Returns true if the failure was caused by the user's input or environment.
    pub fn is_user_error(self) -> bool {
        classification::is_user_error(self)
    }

    /// Returns the recommended HTTP status for this code.
    pub fn to_http_status(self) -> u16 {
        http::to_http_status(self)
    }

    /// Returns the exit code matching an HTTP status.
    pub fn from_http_status(status: u16) -> Self {
        http::from_http_status(status)
    }
}

/// Returns a human-readable description of `code`.
pub fn describe(code: ExitCode) -> String {
    code.describe()
}

impl From<i32> for ExitCode {
    fn from(value: i32) -> Self {
        ExitCode(value)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<ExitCode> for std::process::ExitCode {
    /// Values outside `0..=255` become `1`; the OS would otherwise truncate
    /// them, and 256 must not read as success.
    fn from(code: ExitCode) -> Self {
        let value = u8::try_from(code.0).unwrap_or(1);
        std::process::ExitCode::from(value)
    }
}

/// The text form is the decimal value, with no padding.
impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when text cannot be parsed as an exit code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid exit code text: {text:?}")]
pub struct ParseExitCodeError {
    text: String,
}

impl ParseExitCodeError {
    /// The trimmed text that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FromStr for ExitCode {
    type Err = ParseExitCodeError;

    /// Surrounding whitespace is ignored and blank text parses as
    /// [`ExitCode::SUCCESS`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::SUCCESS);
        }
        trimmed
            .parse::<i32>()
            .map(ExitCode)
            .map_err(|_| ParseExitCodeError {
                text: trimmed.to_string(),
            })
    }
}

impl Serialize for ExitCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for ExitCode {
    /// Accepts either an integer or the text form.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExitCodeVisitor;

        impl Visitor<'_> for ExitCodeVisitor {
            type Value = ExitCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer exit code or its decimal text")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ExitCode, E> {
                i32::try_from(v)
                    .map(ExitCode)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ExitCode, E> {
                i32::try_from(v)
                    .map(ExitCode)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ExitCode, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ExitCodeVisitor)
    }
}
