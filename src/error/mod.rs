//! Error types and handling for reclaim
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and argument errors
//! - [`input`]: Verification report and exclusion file errors
//! - [`api`]: Target management API errors

pub mod api;
pub mod config;
pub mod input;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for reclaim operations
#[derive(Error, Diagnostic, Debug)]
pub enum ReclaimError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(reclaim::config::not_found),
        help("Pass a JSON file with api_endpoint, username and password via --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(reclaim::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(reclaim::config::parse_failed),
        help(
            r#"Expected format: {{"api_endpoint": "http://localhost:18080", "username": "foo", "password": "bar"}}"#
        )
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(reclaim::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(reclaim::cli::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Target filesystem name could not be determined: {reason}")]
    #[diagnostic(
        code(reclaim::config::filesystem_unresolved),
        help(
            "Pass --filesystem_name, or use a verification directory named <migration-id>-<timestamp>"
        )
    )]
    FilesystemUnresolved { reason: String },

    // Input errors
    #[error("Verification report not found: {path}")]
    #[diagnostic(code(reclaim::input::report_not_found))]
    ReportNotFound { path: String },

    #[error("Verification report is not a file: {path}")]
    #[diagnostic(code(reclaim::input::report_not_a_file))]
    ReportNotAFile { path: String },

    #[error("Failed to read verification report: {path}: {reason}")]
    #[diagnostic(code(reclaim::input::report_read_failed))]
    ReportReadFailed { path: String, reason: String },

    #[error("Failed to read exclusion file: {path}: {reason}")]
    #[diagnostic(code(reclaim::input::exclusions_read_failed))]
    ExclusionFileReadFailed { path: String, reason: String },

    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(reclaim::input::invalid_pattern),
        help("Patterns use shell glob syntax: *, ?, [abc] and [!abc]")
    )]
    InvalidPattern { pattern: String, reason: String },

    // API errors
    #[error("Failed to connect to {endpoint}: {reason}")]
    #[diagnostic(
        code(reclaim::api::connection_failed),
        help("Check that api_endpoint is correct and the management API is reachable")
    )]
    ConnectionFailed { endpoint: String, reason: String },

    #[error("Failed to get migration with id {id}: HTTP {status}")]
    #[diagnostic(code(reclaim::api::migration_lookup_failed))]
    MigrationLookupFailed { id: String, status: u16 },

    #[error("Failed to decode migration {id}: {reason}")]
    #[diagnostic(code(reclaim::api::migration_decode_failed))]
    MigrationDecodeFailed { id: String, reason: String },

    #[error("Failed to initialize logging: {message}")]
    #[diagnostic(code(reclaim::logging::init_failed))]
    LoggingInitFailed { message: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ReclaimError>;
