//! reclaim - storage reclamation for migration targets
//!
//! Reads a verification report, finds the content present on the target but
//! missing on the source, and deletes it through the target management API
//! while honouring user-supplied exclusion patterns.

use clap::Parser;

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod exclusions;
mod executor;
mod filesystem;
mod logging;
mod planner;
mod report;

use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            // Printing help or usage can only fail on a closed stream
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = logging::init(cli.debug) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = commands::delete::run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
