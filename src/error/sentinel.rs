//! Marker causes matched by tag during exit-code resolution.

use thiserror::Error;

/// A fixed marker error.
///
/// Sentinels carry no payload and no code of their own; the resolver owns the
/// sentinel-to-code table. They are compared by variant, so a sentinel found
/// anywhere in an error chain is recognised regardless of how deeply it was
/// wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Sentinel {
    /// General internal error.
    #[error("internal error")]
    Internal,
    /// Invalid argument passed.
    #[error("invalid argument")]
    Invalid,
    /// Command usage error.
    #[error("usage error")]
    Usage,
    /// Input data is malformed.
    #[error("data format error")]
    DataFormat,
    /// A resource does not exist.
    #[error("not found")]
    NotFound,
    /// Insufficient permissions.
    #[error("permission denied")]
    NoPermission,
    /// Configuration error.
    #[error("configuration error")]
    Config,
    /// Authentication error.
    #[error("authentication error")]
    Auth,
    /// Operation forbidden.
    #[error("forbidden")]
    Forbidden,
    /// Validation error.
    #[error("validation error")]
    Validation,
    /// Input/output error.
    #[error("I/O error")]
    Io,
    /// Service unavailable.
    #[error("service unavailable")]
    Unavailable,
    /// Temporary failure.
    #[error("temporary failure")]
    TempFail,
    /// The operation was canceled before it finished.
    #[error("operation canceled")]
    Canceled,
    /// The operation ran past its deadline.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl Sentinel {
    /// Every sentinel, in declaration order.
    pub const ALL: [Sentinel; 15] = [
        Sentinel::Internal,
        Sentinel::Invalid,
        Sentinel::Usage,
        Sentinel::DataFormat,
        Sentinel::NotFound,
        Sentinel::NoPermission,
        Sentinel::Config,
        Sentinel::Auth,
        Sentinel::Forbidden,
        Sentinel::Validation,
        Sentinel::Io,
        Sentinel::Unavailable,
        Sentinel::TempFail,
        Sentinel::Canceled,
        Sentinel::DeadlineExceeded,
    ];
}
