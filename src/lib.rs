//! exitwise - semantic exit codes for command-line programs
//!
//! Maps application errors onto a small, standardized set of process exit
//! codes aligned with POSIX and BSD `sysexits.h`, and labels each code with a
//! category, retryability and whether the user caused the failure.
//!
//! ```
//! use exitwise::{not_found_error, resolve, ExitCode};
//!
//! let err = not_found_error("config file");
//! let code = resolve(Some(&err));
//! assert_eq!(code, ExitCode::NOT_FOUND);
//! assert!(code.is_user_error());
//! assert_eq!(code.to_http_status(), 404);
//! ```

pub mod code;
pub mod error;
pub mod resolve;

// Re-export main types for convenient access
pub use code::{
    category, describe, from_http_status, is_retriable, is_user_error, to_http_status, Category,
    ExitCode, ParseExitCodeError,
};
pub use error::{
    auth_error, config_error, not_found_error, permission_error, temp_fail_error, usage_error,
    validation_error, BoxError, ExitError, ExitErrorRecord, ResultExt, Sentinel,
};
pub use resolve::{
    exit_code_of, os_exit_code, resolve, resolve_result, NetFailure, NetworkError, NetworkProbe,
    Resolution, Resolver, Rule,
};
