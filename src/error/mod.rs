//! Exit-code-bearing errors and the marker causes used to classify them.
//!
//! [`ExitError`] binds a code to a message and an optional cause. The
//! [`Sentinel`] markers tag well-known failure kinds, and the factory
//! functions standardize the phrasing of the common ones.

pub mod exit_error;
pub mod factories;
pub mod sentinel;

// Re-export main types for convenient access
pub use exit_error::{BoxError, ExitError, ExitErrorRecord, ResultExt};
pub use factories::{
    auth_error, config_error, not_found_error, permission_error, temp_fail_error, usage_error,
    validation_error,
};
pub use sentinel::Sentinel;
