//! Target management API errors

use super::ReclaimError;

/// Creates a connection failed error
pub fn connection_failed(endpoint: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::ConnectionFailed {
        endpoint: endpoint.into(),
        reason: reason.into(),
    }
}

/// Creates a migration lookup failed error
pub fn migration_lookup_failed(id: impl Into<String>, status: u16) -> ReclaimError {
    ReclaimError::MigrationLookupFailed {
        id: id.into(),
        status,
    }
}

/// Creates a migration decode failed error
pub fn migration_decode_failed(id: impl Into<String>, reason: impl Into<String>) -> ReclaimError {
    ReclaimError::MigrationDecodeFailed {
        id: id.into(),
        reason: reason.into(),
    }
}
