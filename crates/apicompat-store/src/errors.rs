//! Error handling for apicompat-store
//!
//! Wraps apicompat-core ExError with store-specific helpers

use std::path::Path;

use apicompat_core::errors::{ApiCompatError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a baseline-not-found error
pub fn baseline_not_found(path: &Path) -> ExError {
    ExError::from(ApiCompatError::BaselineNotFound {
        path: path.display().to_string(),
    })
    .with_op("load_baseline")
}

/// Create a remap-file-not-found error
pub fn remap_file_not_found(path: &Path) -> ExError {
    ExError::from(ApiCompatError::RemapFileNotFound {
        path: path.display().to_string(),
    })
    .with_op("load_remap_file")
}

/// Create an invalid surface error
pub fn invalid_surface(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidSurface)
        .with_op("load_surface")
        .with_path(path.display().to_string())
        .with_message(reason)
}

/// Create an invalid configuration error
pub fn invalid_config(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_path(path.display().to_string())
        .with_message(reason)
}

/// Attach a file path to a domain parse failure
pub fn parse_failure(operation: &str, path: &Path, err: ApiCompatError) -> ExError {
    ExError::from(err)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_are_configuration_errors() {
        let path = Path::new("missing.txt");
        assert!(baseline_not_found(path).is_configuration_error());
        assert!(remap_file_not_found(path).is_configuration_error());
        assert_eq!(baseline_not_found(path).code(), "ERR_BASELINE_NOT_FOUND");
        assert_eq!(remap_file_not_found(path).path(), Some("missing.txt"));
    }

    #[test]
    fn test_io_error_keeps_context() {
        let err = io_error(
            "read_surface",
            Path::new("a.yaml"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("read_surface"));
    }
}
