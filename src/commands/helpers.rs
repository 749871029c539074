//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::Result;
use crate::error::config::invalid_argument;
use crate::report::report_in_directory;

/// Check that every path argument names the right kind of filesystem entry
pub fn validate_paths(cli: &Cli) -> Result<()> {
    if let Some(file) = &cli.verification_file {
        if !file.is_file() {
            return Err(invalid_argument(format!(
                "--verification-file option '{}' must be a file",
                file.display()
            )));
        }
    }

    if let Some(dir) = &cli.verification_directory {
        if !dir.is_dir() {
            return Err(invalid_argument(format!(
                "--verification-directory option '{}' must be a directory",
                dir.display()
            )));
        }
    }

    if let Some(file) = &cli.exclusion_file {
        if !file.is_file() {
            return Err(invalid_argument(format!(
                "--exclusion-file option '{}' must be a file",
                file.display()
            )));
        }
    }

    Ok(())
}

/// The report file to read, from either verification option
pub fn report_path(cli: &Cli) -> Result<PathBuf> {
    match (&cli.verification_file, &cli.verification_directory) {
        (Some(file), None) => Ok(file.clone()),
        (None, Some(dir)) => Ok(report_in_directory(dir)),
        (Some(_), Some(_)) => Err(invalid_argument(
            "--verification-file and --verification-directory can not both be set",
        )),
        (None, None) => Err(invalid_argument(
            "either --verification-file or --verification-directory must be set",
        )),
    }
}

/// Verification directory, when running in directory mode
pub fn verification_dir(cli: &Cli) -> Option<&Path> {
    cli.verification_directory.as_deref()
}
