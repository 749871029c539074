//! Configuration errors

use super::ReclaimError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> ReclaimError {
    ReclaimError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> ReclaimError {
    ReclaimError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an invalid argument error
pub fn invalid_argument(message: impl Into<String>) -> ReclaimError {
    ReclaimError::InvalidArgument {
        message: message.into(),
    }
}

/// Creates a filesystem unresolved error
pub fn filesystem_unresolved(reason: impl Into<String>) -> ReclaimError {
    ReclaimError::FilesystemUnresolved {
        reason: reason.into(),
    }
}
