//! Exit-code resolution for arbitrary error chains.
//!
//! The resolver walks an error and everything it wraps, applying a fixed list
//! of checks in priority order. The first check that matches decides the code.
//! Resolution is infallible: an error nothing recognises resolves to
//! [`ExitCode::ERROR_INTERNAL`].

pub mod network;

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::code::ExitCode;
use crate::error::{ExitError, Sentinel};

pub use network::{
    default_probes, downcast_probe, io_probe, is_network_kind, NetFailure, NetworkError,
    NetworkProbe,
};

/// The check that decided a resolution, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// There was no error.
    NoError,
    /// An [`ExitError`] in the chain supplied its code.
    ExitError,
    /// The chain contains [`Sentinel::Canceled`].
    Canceled,
    /// The chain contains [`Sentinel::DeadlineExceeded`].
    DeadlineExceeded,
    /// An I/O error reported a missing file or resource.
    NotFound,
    /// An I/O error reported denied permission.
    PermissionDenied,
    /// A probe recognised a network failure.
    Network,
    /// The chain contains another sentinel.
    Sentinel,
    /// Nothing matched.
    Fallback,
}

impl Rule {
    /// Short name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::NoError => "no_error",
            Rule::ExitError => "exit_error",
            Rule::Canceled => "canceled",
            Rule::DeadlineExceeded => "deadline_exceeded",
            Rule::NotFound => "not_found",
            Rule::PermissionDenied => "permission_denied",
            Rule::Network => "network",
            Rule::Sentinel => "sentinel",
            Rule::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved exit code together with the rule that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved code.
    pub code: ExitCode,
    /// The rule that matched.
    pub rule: Rule,
}

impl Resolution {
    fn new(code: ExitCode, rule: Rule) -> Self {
        Self { code, rule }
    }
}

/// Returns the code the resolver assigns to a sentinel cause.
pub fn sentinel_code(sentinel: Sentinel) -> ExitCode {
    match sentinel {
        Sentinel::Internal => ExitCode::ERROR_INTERNAL,
        Sentinel::Invalid => ExitCode::INVALID_ARGUMENT,
        Sentinel::Usage => ExitCode::USAGE_ERROR,
        Sentinel::DataFormat => ExitCode::DATA_ERROR,
        Sentinel::NotFound => ExitCode::NOT_FOUND,
        Sentinel::NoPermission => ExitCode::NO_PERMISSION,
        Sentinel::Config => ExitCode::CONFIG,
        Sentinel::Auth => ExitCode::AUTH_FAILED,
        Sentinel::Forbidden => ExitCode::FORBIDDEN,
        Sentinel::Validation => ExitCode::VALIDATION,
        Sentinel::Io => ExitCode::IO_ERROR,
        Sentinel::Unavailable => ExitCode::UNAVAILABLE,
        Sentinel::TempFail => ExitCode::TEMP_FAIL,
        Sentinel::Canceled => ExitCode::INTERRUPTED,
        Sentinel::DeadlineExceeded => ExitCode::TEMP_FAIL,
    }
}

/// Iterates over an error and everything it wraps.
///
/// An `io::Error` holding a custom error yields that error next. Its own
/// `source()` would skip straight to the inner error's source.
pub fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |current| next_link(*current))
}

fn next_link<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    if let Some(inner) = err
        .downcast_ref::<io::Error>()
        .and_then(|io_err| io_err.get_ref())
    {
        return Some(inner as &(dyn StdError + 'static));
    }
    err.source()
}

fn contains_sentinel(err: &(dyn StdError + 'static), sentinel: Sentinel) -> bool {
    chain(err).any(|link| link.downcast_ref::<Sentinel>() == Some(&sentinel))
}

fn contains_io_kind(err: &(dyn StdError + 'static), kind: io::ErrorKind) -> bool {
    chain(err).any(|link| {
        link.downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == kind)
    })
}

/// Maps error chains to exit codes.
///
/// Network failures are recognised through [`NetworkProbe`]s. A new resolver
/// carries probes for [`NetFailure`] and socket-related `io::Error`s; more can
/// be added for client libraries with their own error types.
#[derive(Clone)]
pub struct Resolver {
    /// Probes tried against each link of the chain, in order.
    probes: Vec<NetworkProbe>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("probes", &self.probes.len())
            .finish()
    }
}

impl Resolver {
    /// Creates a resolver with the default network probes.
    pub fn new() -> Self {
        Self {
            probes: default_probes(),
        }
    }

    /// Creates a resolver with no network probes.
    pub fn empty() -> Self {
        Self { probes: Vec::new() }
    }

    /// Adds a probe, builder style.
    pub fn with_probe(mut self, probe: NetworkProbe) -> Self {
        self.add_probe(probe);
        self
    }

    /// Recognises errors of type `E` as network failures.
    pub fn with_network_type<E>(self) -> Self
    where
        E: StdError + NetworkError + 'static,
    {
        self.with_probe(downcast_probe::<E>)
    }

    /// Adds a probe.
    pub fn add_probe(&mut self, probe: NetworkProbe) {
        self.probes.push(probe);
    }

    /// Returns the number of configured probes.
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Resolves an optional error to an exit code.
    pub fn resolve(&self, err: Option<&(dyn StdError + 'static)>) -> ExitCode {
        self.explain(err).code
    }

    /// Resolves an optional error and reports which rule decided it.
    pub fn explain(&self, err: Option<&(dyn StdError + 'static)>) -> Resolution {
        let Some(err) = err else {
            debug!(code = 0, rule = Rule::NoError.as_str(), "resolved exit code");
            return Resolution::new(ExitCode::SUCCESS, Rule::NoError);
        };

        let resolution = self.classify(err);
        if resolution.rule == Rule::Fallback {
            trace!(
                depth = chain(err).count(),
                error = %err,
                "no rule matched error chain"
            );
        }
        debug!(
            code = resolution.code.as_i32(),
            rule = resolution.rule.as_str(),
            error = %err,
            "resolved exit code"
        );
        resolution
    }

    fn classify(&self, err: &(dyn StdError + 'static)) -> Resolution {
        if let Some(exit_err) = chain(err).find_map(|link| link.downcast_ref::<ExitError>()) {
            return Resolution::new(exit_err.code(), Rule::ExitError);
        }

        if contains_sentinel(err, Sentinel::Canceled) {
            return Resolution::new(ExitCode::INTERRUPTED, Rule::Canceled);
        }
        if contains_sentinel(err, Sentinel::DeadlineExceeded) {
            return Resolution::new(ExitCode::TEMP_FAIL, Rule::DeadlineExceeded);
        }

        if contains_io_kind(err, io::ErrorKind::NotFound) {
            return Resolution::new(ExitCode::NO_INPUT, Rule::NotFound);
        }
        if contains_io_kind(err, io::ErrorKind::PermissionDenied) {
            return Resolution::new(ExitCode::NO_PERMISSION, Rule::PermissionDenied);
        }

        if let Some(code) = self.network_code(err) {
            return Resolution::new(code, Rule::Network);
        }

        if let Some(sentinel) = chain(err).find_map(|link| link.downcast_ref::<Sentinel>().copied())
        {
            return Resolution::new(sentinel_code(sentinel), Rule::Sentinel);
        }

        Resolution::new(ExitCode::ERROR_INTERNAL, Rule::Fallback)
    }

    fn network_code(&self, err: &(dyn StdError + 'static)) -> Option<ExitCode> {
        chain(err).find_map(|link| {
            self.probes.iter().find_map(|probe| {
                probe(link).map(|net| {
                    // Timeouts and temporary conditions are both worth a retry.
                    if net.is_timeout() || net.is_temporary() {
                        ExitCode::TEMP_FAIL
                    } else {
                        ExitCode::UNAVAILABLE
                    }
                })
            })
        })
    }
}

fn default_resolver() -> &'static Resolver {
    static DEFAULT: OnceLock<Resolver> = OnceLock::new();
    DEFAULT.get_or_init(Resolver::new)
}

/// Resolves an optional error with the default resolver.
pub fn resolve(err: Option<&(dyn StdError + 'static)>) -> ExitCode {
    default_resolver().resolve(err)
}

/// Resolves an error with the default resolver.
pub fn exit_code_of(err: &(dyn StdError + 'static)) -> ExitCode {
    default_resolver().resolve(Some(err))
}

/// Resolves the outcome of a fallible operation; `Ok` is success.
pub fn resolve_result<T, E>(result: &Result<T, E>) -> ExitCode
where
    E: StdError + 'static,
{
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => exit_code_of(err),
    }
}

/// Resolves an optional error to the integer passed to `std::process::exit`.
pub fn os_exit_code(err: Option<&(dyn StdError + 'static)>) -> i32 {
    resolve(err).as_i32()
}
