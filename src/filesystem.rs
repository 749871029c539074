//! Target filesystem name resolution
//!
//! An explicit `--filesystem_name` always wins. Otherwise the name comes
//! from the migration that produced the verification directory, whose name
//! is `<36-character migration id>-<timestamp>`.

use std::path::Path;

use tracing::info;

use crate::api::TargetApi;
use crate::error::Result;
use crate::error::config::filesystem_unresolved;

/// Length of a migration id (a UUID in text form)
pub const MIGRATION_ID_LEN: usize = 36;

/// Migration id embedded in a verification directory name
pub fn migration_id_from_dir(dir: &Path) -> Result<String> {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if name.chars().count() <= MIGRATION_ID_LEN + 1 {
        return Err(filesystem_unresolved(format!(
            "verification directory {} does not match expected format migration_id-timestamp",
            dir.display()
        )));
    }

    Ok(name.chars().take(MIGRATION_ID_LEN).collect())
}

/// Decide which target filesystem to delete from
pub fn resolve_filesystem<A: TargetApi + ?Sized>(
    override_name: Option<&str>,
    verification_dir: Option<&Path>,
    api: &A,
) -> Result<String> {
    if let Some(name) = override_name {
        info!("Using provided target filesystem {}", name);
        return Ok(name.to_string());
    }

    let Some(dir) = verification_dir else {
        return Err(filesystem_unresolved(
            "--filesystem_name is required with --verification-file",
        ));
    };

    let migration_id = migration_id_from_dir(dir)?;
    info!("Migration Id: {}", migration_id);

    let migration = api.migration(&migration_id)?;
    info!(
        path = ?migration.path,
        state = ?migration.state,
        id = ?migration.migration_id,
        "Using target filesystem {}",
        migration.target
    );

    Ok(migration.target)
}
