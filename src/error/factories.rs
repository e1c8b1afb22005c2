//! Constructors for common failures with standard phrasing.
//!
//! Each returns an [`ExitError`] bound to a fixed code, with the matching
//! [`Sentinel`] as its cause.

use super::{ExitError, Sentinel};
use crate::code::ExitCode;

/// Incorrect command usage.
pub fn usage_error(message: impl Into<String>) -> ExitError {
    ExitError::new(ExitCode::USAGE_ERROR, message).with_marker(Sentinel::Usage)
}

/// Input failed validation.
pub fn validation_error(message: impl Into<String>) -> ExitError {
    ExitError::new(ExitCode::VALIDATION, message).with_marker(Sentinel::Validation)
}

/// Missing or broken configuration.
pub fn config_error(message: impl Into<String>) -> ExitError {
    ExitError::new(ExitCode::CONFIG, message).with_marker(Sentinel::Config)
}

/// `"<resource> not found"`.
pub fn not_found_error(resource: &str) -> ExitError {
    ExitError::new(ExitCode::NOT_FOUND, format!("{} not found", resource))
        .with_marker(Sentinel::NotFound)
}

/// `"permission denied: <action>"`.
pub fn permission_error(action: &str) -> ExitError {
    ExitError::new(ExitCode::NO_PERMISSION, format!("permission denied: {}", action))
        .with_marker(Sentinel::NoPermission)
}

/// Authentication failed.
pub fn auth_error(message: impl Into<String>) -> ExitError {
    ExitError::new(ExitCode::AUTH_FAILED, message).with_marker(Sentinel::Auth)
}

/// Temporary failure; callers may retry.
pub fn temp_fail_error(message: impl Into<String>) -> ExitError {
    ExitError::new(ExitCode::TEMP_FAIL, message).with_marker(Sentinel::TempFail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn test_usage_error() {
        let err = usage_error("invalid command");
        assert_eq!(err.code(), ExitCode::USAGE_ERROR);
        assert_eq!(err.to_string(), "invalid command");
        assert_eq!(err.sentinel(), Some(Sentinel::Usage));
    }

    #[test]
    fn test_validation_error() {
        let err = validation_error("invalid data");
        assert_eq!(err.code(), ExitCode::VALIDATION);
        assert_eq!(err.category(), Category::CliExtended);
    }

    #[test]
    fn test_config_error() {
        let err = config_error("missing [server] section");
        assert_eq!(err.code(), ExitCode::CONFIG);
        assert!(err.is_user_error());
    }

    #[test]
    fn test_not_found_error_message() {
        let err = not_found_error("config file");
        assert_eq!(err.to_string(), "config file not found");
        assert_eq!(err.code(), ExitCode::NOT_FOUND);
    }

    #[test]
    fn test_permission_error_message() {
        let err = permission_error("write file");
        assert_eq!(err.to_string(), "permission denied: write file");
        assert_eq!(err.code(), ExitCode::NO_PERMISSION);
    }

    #[test]
    fn test_auth_error() {
        let err = auth_error("invalid token");
        assert_eq!(err.code(), ExitCode::AUTH_FAILED);
        assert_eq!(err.sentinel(), Some(Sentinel::Auth));
    }

    #[test]
    fn test_temp_fail_error_is_retriable() {
        let err = temp_fail_error("network timeout");
        assert_eq!(err.code(), ExitCode::TEMP_FAIL);
        assert!(err.is_retriable());
    }

    #[test]
    fn test_empty_message_uses_sentinel_text() {
        assert_eq!(usage_error("").to_string(), "usage error");
    }
}
