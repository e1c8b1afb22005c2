//! Mapping between exit codes and HTTP status codes.
//!
//! The mapping is lossy in both directions. It only guarantees that a status
//! produced by [`to_http_status`] never maps back to
//! [`ExitCode::ERROR_INTERNAL`].

use super::ExitCode;

/// Returns the recommended HTTP status for `code`. Unlisted codes map to 500.
pub fn to_http_status(code: ExitCode) -> u16 {
    match code {
        ExitCode::SUCCESS => 200,
        ExitCode::INVALID_ARGUMENT
        | ExitCode::CMD_USAGE
        | ExitCode::DATA_ERROR
        | ExitCode::VALIDATION => 400,
        ExitCode::AUTH_REQUIRED | ExitCode::AUTH_FAILED => 401,
        ExitCode::FORBIDDEN | ExitCode::NO_PERMISSION => 403,
        ExitCode::NOT_FOUND | ExitCode::NO_INPUT => 404,
        ExitCode::CONFLICT => 409,
        ExitCode::RATE_LIMIT | ExitCode::QUOTA_EXCEEDED => 429,
        ExitCode::UNAVAILABLE | ExitCode::TEMP_FAIL => 503,
        ExitCode::SOFTWARE | ExitCode::OS_ERROR | ExitCode::IO_ERROR | ExitCode::ERROR_INTERNAL => {
            500
        }
        _ => 500,
    }
}

/// Returns the exit code matching an HTTP status.
pub fn from_http_status(status: u16) -> ExitCode {
    match status {
        200 | 201 | 202 | 204 => ExitCode::SUCCESS,
        400 => ExitCode::DATA_ERROR,
        401 => ExitCode::AUTH_FAILED,
        403 | 423 => ExitCode::FORBIDDEN,
        404 => ExitCode::NOT_FOUND,
        409 => ExitCode::CONFLICT,
        412 | 422 => ExitCode::VALIDATION,
        429 => ExitCode::RATE_LIMIT,
        500 => ExitCode::SOFTWARE,
        501..=504 => ExitCode::UNAVAILABLE,
        200..=299 => ExitCode::SUCCESS,
        400..=499 => ExitCode::DATA_ERROR,
        500.. => ExitCode::UNAVAILABLE,
        _ => ExitCode::ERROR_INTERNAL,
    }
}
