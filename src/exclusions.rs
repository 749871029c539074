//! Exclusion pattern file loading
//!
//! One glob pattern per line. Surrounding whitespace is trimmed and blank
//! lines are ignored.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::error::input::exclusions_read_failed;

/// Read exclusion patterns from `path`, keeping file order
pub fn read_exclusions(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| exclusions_read_failed(path.display().to_string(), e.to_string()))?;

    let patterns = parse_exclusions(&content);
    for pattern in &patterns {
        info!("Exclusion pattern: '{}'", pattern);
    }

    Ok(patterns)
}

/// Load patterns when a file was given; no file means no exclusions
pub fn load_exclusions(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(path) => read_exclusions(path),
        None => Ok(Vec::new()),
    }
}

fn parse_exclusions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
