//! Range-based classification of exit codes.
//!
//! Category, retryability and user-fault status are always derived from the
//! numeric value; nothing here is stored on the code itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ExitCode;

/// Coarse bucket an exit code falls into, derived from its numeric range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Code 0.
    Success,
    /// Codes 1-63.
    General,
    /// Codes 64-79 (sysexits.h).
    UserError,
    /// Codes 80-99.
    CliExtended,
    /// Codes 128 and above.
    SystemSignal,
    /// Everything else: 100-127 and negative values.
    Unknown,
}

impl Category {
    /// Returns the category tag, e.g. `"user_error"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::General => "general",
            Category::UserError => "user_error",
            Category::CliExtended => "cli_extended",
            Category::SystemSignal => "system_signal",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the category of `code`.
///
/// Every value of 128 or more is a signal code, named or not.
pub fn category(code: ExitCode) -> Category {
    match code.as_i32() {
        0 => Category::Success,
        1..=63 => Category::General,
        64..=79 => Category::UserError,
        80..=99 => Category::CliExtended,
        128.. => Category::SystemSignal,
        _ => Category::Unknown,
    }
}

/// Returns true if the operation that failed with `code` may succeed on retry.
pub fn is_retriable(code: ExitCode) -> bool {
    matches!(
        code,
        ExitCode::TEMP_FAIL | ExitCode::UNAVAILABLE | ExitCode::IO_ERROR | ExitCode::RATE_LIMIT
    )
}

/// Returns true if `code` reports a mistake by the user rather than the program.
pub fn is_user_error(code: ExitCode) -> bool {
    matches!(
        code,
        ExitCode::INVALID_ARGUMENT
            | ExitCode::CMD_USAGE
            | ExitCode::DATA_ERROR
            | ExitCode::NO_INPUT
            | ExitCode::NO_USER
            | ExitCode::NO_HOST
            | ExitCode::NO_PERMISSION
            | ExitCode::CONFIG
            | ExitCode::NOT_FOUND
            | ExitCode::VALIDATION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ranges() {
        let cases = [
            (0, Category::Success),
            (1, Category::General),
            (2, Category::General),
            (63, Category::General),
            (64, Category::UserError),
            (78, Category::UserError),
            (79, Category::UserError),
            (80, Category::CliExtended),
            (87, Category::CliExtended),
            (99, Category::CliExtended),
            (100, Category::Unknown),
            (127, Category::Unknown),
            (128, Category::SystemSignal),
            (130, Category::SystemSignal),
            (143, Category::SystemSignal),
            (255, Category::SystemSignal),
            (999, Category::SystemSignal),
            (-1, Category::Unknown),
        ];

        for (value, expected) in cases {
            assert_eq!(category(ExitCode::new(value)), expected, "code {}", value);
        }
    }

    #[test]
    fn test_category_method_matches_function() {
        for code in ExitCode::NAMED {
            assert_eq!(code.category(), category(code));
        }
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(Category::UserError.to_string(), "user_error");
        assert_eq!(Category::CliExtended.as_str(), "cli_extended");
        assert_eq!(
            serde_json::to_string(&Category::SystemSignal).unwrap(),
            "\"system_signal\""
        );
        let parsed: Category = serde_json::from_str("\"general\"").unwrap();
        assert_eq!(parsed, Category::General);
    }

    #[test]
    fn test_is_retriable() {
        let retriable = [69, 74, 75, 86];
        for value in [0, 1, 2, 64, 65, 69, 70, 74, 75, 76, 83, 85, 86, 87, 130, 143] {
            assert_eq!(
                is_retriable(ExitCode::new(value)),
                retriable.contains(&value),
                "code {}",
                value
            );
        }
    }

    #[test]
    fn test_is_user_error() {
        let user = [2, 64, 65, 66, 67, 68, 77, 78, 83, 85];
        for value in 0..=150 {
            assert_eq!(
                is_user_error(ExitCode::new(value)),
                user.contains(&value),
                "code {}",
                value
            );
        }
        assert!(ExitCode::USAGE_ERROR.is_user_error());
    }
}
