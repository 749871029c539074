//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgGroup, Parser};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// reclaim - delete target content that is missing on the source
///
/// Reads a verification report, plans the smallest set of recursive deletes
/// that removes every path reported missing on the source, and issues them
/// against the target filesystem.
#[derive(Parser, Debug)]
#[command(
    name = "reclaim",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Process a verification report to delete extraneous content on a migration target",
    group(
        ArgGroup::new("verification")
            .required(true)
            .args(["verification_file", "verification_directory"])
    ),
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  reclaim -c config.json -d ./0b7f3a2e-...-1700000000000 --dry-run\n   \
                  reclaim -c config.json -f report.jsonl.gz --filesystem_name target-fs\n   \
                  reclaim -c config.json -d ./results -e exclusions.txt\n"
)]
pub struct Cli {
    /// Configuration file: {"api_endpoint": "http://localhost:18080", "username": "foo", "password": "bar"}
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// The verification report JSONL file (optionally .gz)
    #[arg(long, short = 'f', value_name = "FILE")]
    pub verification_file: Option<PathBuf>,

    /// The directory holding the verification results
    #[arg(long, short = 'd', value_name = "DIR")]
    pub verification_directory: Option<PathBuf>,

    /// File of glob patterns, one per line, for paths that must not be deleted
    #[arg(long, short = 'e', value_name = "FILE")]
    pub exclusion_file: Option<PathBuf>,

    /// The target filesystem name; looked up from the migration id in the
    /// verification directory name when omitted
    #[arg(long = "filesystem_name", visible_alias = "filesystem-name", value_name = "NAME")]
    pub filesystem_name: Option<String>,

    /// List the paths that would be deleted on the target but do not delete them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Number of delete requests in flight at once
    #[arg(long, default_value = "1", value_name = "N")]
    pub workers: NonZeroUsize,
}
