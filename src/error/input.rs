//! Verification report and exclusion file errors

use super::ReclaimError;

pub fn report_not_found(path: impl Into<String>) -> ReclaimError {
    ReclaimError::ReportNotFound { path: path.into() }
}

pub fn report_not_a_file(path: impl Into<String>) -> ReclaimError {
    ReclaimError::ReportNotAFile { path: path.into() }
}

pub fn report_read_failed(path: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::ReportReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn exclusions_read_failed(path: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::ExclusionFileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}
