//! Delete command
//!
//! Reads the verification report and exclusion patterns, plans the deletes,
//! and either lists them (dry run) or issues them against the target.

use tracing::{info, warn};

use crate::api::{HttpTargetApi, TargetApi};
use crate::cli::Cli;
use crate::commands::helpers::{report_path, validate_paths, verification_dir};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::exclusions::load_exclusions;
use crate::executor::{DeleteSummary, Executor};
use crate::filesystem::resolve_filesystem;
use crate::planner::{self, Plan};
use crate::report::{VerificationReport, read_report};

/// Run the delete command
pub fn run(cli: &Cli) -> Result<()> {
    let config = ApiConfig::load(&cli.config)?;
    validate_paths(cli)?;

    let plan = build_plan(cli)?;

    // Building the client does no network I/O, so dry runs stay offline
    let api = HttpTargetApi::new(&config)?;
    if let Some(summary) = execute(cli, &plan, &api)? {
        log_delete_summary(&summary);
    }

    Ok(())
}

/// Read inputs and compute the deletion plan
pub fn build_plan(cli: &Cli) -> Result<Plan> {
    let patterns = load_exclusions(cli.exclusion_file.as_deref())?;
    let report = read_report(&report_path(cli)?)?;

    let plan = planner::plan(&report.candidates, &patterns)?;
    log_plan_summary(&report, &plan);

    Ok(plan)
}

/// Issue the planned deletes, or only list them on a dry run
///
/// Returns `None` on a dry run; `api` is not called at all in that case.
pub fn execute<A: TargetApi + ?Sized>(
    cli: &Cli,
    plan: &Plan,
    api: &A,
) -> Result<Option<DeleteSummary>> {
    if cli.dry_run {
        info!("Dry run, paths that would be deleted:");
        for path in &plan.paths {
            info!("{}", path);
        }
        return Ok(None);
    }

    let filesystem = resolve_filesystem(
        cli.filesystem_name.as_deref(),
        verification_dir(cli),
        api,
    )?;

    Executor::new(api, &filesystem)
        .with_workers(cli.workers)
        .run(&plan.paths)
        .map(Some)
}

fn log_plan_summary(report: &VerificationReport, plan: &Plan) {
    if report.stats.skipped > 0 {
        warn!(
            "Skipped report lines:           {:>8}",
            report.stats.skipped
        );
    }
    info!(
        "Report lines read:               {:>8}",
        report.stats.lines
    );
    info!(
        "Missing on source records:       {:>8}",
        report.stats.missing_on_source
    );
    info!(
        "Paths missing on source:         {:>8}",
        report.candidates.len()
    );
    info!(
        "Explicitly Excluded:             {:>8}",
        plan.exclusions.explicit_count()
    );
    info!(
        "Implicitly Excluded:             {:>8}",
        plan.exclusions.implicit_count()
    );
    info!(
        "Covered by a parent delete:      {:>8}",
        plan.covered.len()
    );
    info!("Paths to delete:                 {:>8}", plan.len());
    if plan.is_empty() {
        info!("Nothing to delete");
    }
}

fn log_delete_summary(summary: &DeleteSummary) {
    info!("Deleted Count:           {:>8}", summary.deleted);
    info!("Missing on Target:       {:>8}", summary.already_absent);
    if summary.failed > 0 {
        warn!("Failed to Delete:        {:>8}", summary.failed);
    } else {
        info!("Failed to Delete:        {:>8}", summary.failed);
    }
}
