//! 중앙화된 에러 처리 모듈.

use std::process::ExitCode;

use thiserror::Error;

/// Application-wide error type.
///
/// All errors in the application should be converted to this type
/// for consistent error handling and reporting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid command line or configuration value (exit 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed XYZ input (exit 2)
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache backend error
    #[error("Cache error: {0}")]
    Cache(String),

    /// MessagePack encoding error
    #[error("Encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a parse error for the given 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Returns true when the error was caused by user input rather than the runtime.
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Parse { .. })
    }

    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_usage_error() {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = AppError::InvalidArgument("min > max".to_string());
        assert_eq!(error.to_string(), "Invalid argument: min > max");
    }

    #[test]
    fn test_parse_error_display() {
        let error = AppError::parse(7, "expected 4 fields, found 3");
        assert_eq!(
            error.to_string(),
            "Parse error on line 7: expected 4 fields, found 3"
        );
    }

    #[test]
    fn test_cache_error_display() {
        let error = AppError::Cache("root is not a directory".to_string());
        assert_eq!(error.to_string(), "Cache error: root is not a directory");
    }

    #[test]
    fn test_error_debug_format() {
        let error = AppError::InvalidArgument("test".to_string());
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("InvalidArgument"));
        assert!(debug_str.contains("test"));
    }

    // ============ From 트레이트 테스트 ============

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xyz");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("missing.xyz"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_decode_error_from() {
        let decode_err = rmp_serde::from_slice::<String>(&[0xc1]).unwrap_err();
        let app_err: AppError = decode_err.into();
        assert!(matches!(app_err, AppError::Decode(_)));
    }

    // ============ exit code 테스트 ============

    #[test]
    fn test_usage_errors() {
        assert!(AppError::InvalidArgument("x".to_string()).is_usage_error());
        assert!(AppError::parse(1, "x").is_usage_error());
        assert!(!AppError::Cache("x".to_string()).is_usage_error());
    }

    #[test]
    fn test_exit_codes_distinct() {
        let usage = AppError::parse(3, "bad").exit_code();
        let runtime = AppError::Cache("bad".to_string()).exit_code();
        assert_eq!(usage, ExitCode::from(2));
        assert_eq!(runtime, ExitCode::FAILURE);
        assert_ne!(usage, runtime);
    }

    #[test]
    fn test_error_result_chain() {
        fn may_fail(fail: bool) -> AppResult<i32> {
            if fail {
                Err(AppError::Cache("failed".to_string()))
            } else {
                Ok(42)
            }
        }

        assert!(may_fail(false).is_ok());
        assert!(may_fail(true).is_err());
    }
}
