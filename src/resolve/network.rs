//! Network-failure capability and the probes that discover it.
//!
//! A `dyn Error` cannot be downcast to a trait object, so the resolver finds
//! network failures through probes: plain functions that look at one link of
//! an error chain and, if they recognise its concrete type, hand it back as a
//! [`NetworkError`].

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Capability of errors that describe a failed network operation.
pub trait NetworkError {
    /// True if the operation timed out.
    fn is_timeout(&self) -> bool;

    /// True if the condition is expected to clear on its own.
    fn is_temporary(&self) -> bool {
        false
    }
}

/// Inspects one link of an error chain for the network capability.
pub type NetworkProbe =
    for<'a> fn(&'a (dyn StdError + 'static)) -> Option<&'a dyn NetworkError>;

/// A network failure described by flags rather than by a concrete client error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetFailure {
    message: String,
    timeout: bool,
    temporary: bool,
}

impl NetFailure {
    /// Creates a failure with explicit flags.
    pub fn new(message: impl Into<String>, timeout: bool, temporary: bool) -> Self {
        Self {
            message: message.into(),
            timeout,
            temporary,
        }
    }

    /// The operation timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(message, true, false)
    }

    /// A transient condition, such as a full socket buffer.
    pub fn temporary(message: impl Into<String>) -> Self {
        Self::new(message, false, true)
    }

    /// The peer could not be reached at all.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(message, false, false)
    }
}

impl NetworkError for NetFailure {
    fn is_timeout(&self) -> bool {
        self.timeout
    }

    fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl NetworkError for io::Error {
    fn is_timeout(&self) -> bool {
        self.kind() == io::ErrorKind::TimedOut
    }

    fn is_temporary(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
        )
    }
}

/// Returns true for I/O error kinds that only sockets raise.
///
/// `BrokenPipe`, `Interrupted` and `WouldBlock` also come from pipes and
/// local files, so they are not treated as network failures.
pub fn is_network_kind(kind: io::ErrorKind) -> bool {
    use io::ErrorKind::*;

    matches!(
        kind,
        TimedOut
            | ConnectionRefused
            | ConnectionReset
            | ConnectionAborted
            | NotConnected
            | AddrInUse
            | AddrNotAvailable
    )
}

/// Probe matching any error of concrete type `E`.
pub fn downcast_probe<'a, E>(err: &'a (dyn StdError + 'static)) -> Option<&'a dyn NetworkError>
where
    E: StdError + NetworkError + 'static,
{
    err.downcast_ref::<E>().map(|net| net as &dyn NetworkError)
}

/// Probe matching `std::io::Error`s with a socket-related kind.
pub fn io_probe<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a dyn NetworkError> {
    err.downcast_ref::<io::Error>()
        .filter(|io_err| is_network_kind(io_err.kind()))
        .map(|io_err| io_err as &dyn NetworkError)
}

/// Probes every [`Resolver`](super::Resolver) starts with.
pub fn default_probes() -> Vec<NetworkProbe> {
    vec![downcast_probe::<NetFailure> as NetworkProbe, io_probe]
}
