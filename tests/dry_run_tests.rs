//! Dry-run tests: the plan is printed and the target is never contacted

mod common;

use common::{StubServer, TestWorkspace, UNREACHABLE_ENDPOINT, reclaim_cmd};
use predicates::prelude::*;

#[test]
fn test_dry_run_lists_plan() {
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(UNREACHABLE_ENDPOINT);
    let report = workspace.write_report(
        "report.jsonl",
        &["/data/a", "/data/a/b", "/data/a/b/c", "/other/x"],
    );

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&report)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("/data/a"))
        .stdout(predicate::str::contains("/other/x"))
        .stdout(predicate::str::contains("/data/a/b/c").not())
        .stdout(predicate::str::contains("/matched").not());
}

#[test]
fn test_dry_run_applies_exclusions() {
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(UNREACHABLE_ENDPOINT);
    let report = workspace.write_report(
        "report.jsonl",
        &["/data", "/data/keep", "/data/keep/file", "/data/drop"],
    );
    let exclusions = workspace.write_exclusions(&["/data/keep"]);

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&report)
        .arg("-e")
        .arg(&exclusions)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exclusion pattern: '/data/keep'"))
        .stdout(predicate::str::contains("/data/drop"))
        .stdout(predicate::str::contains("/data/keep/file").not())
        .stdout(predicate::str::is_match(r"Explicitly Excluded:\s+1").unwrap());
}

#[test]
fn test_dry_run_reads_gzip_report_from_directory() {
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(UNREACHABLE_ENDPOINT);
    let dir = workspace.create_verification_dir(&["/warehouse/t1", "/warehouse/t1/part-0"]);

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-d")
        .arg(&dir)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("/warehouse/t1"))
        .stdout(predicate::str::contains("part-0").not());
}

#[test]
fn test_dry_run_with_unreachable_endpoint_succeeds() {
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(UNREACHABLE_ENDPOINT);
    let report = workspace.write_report("report.jsonl", &["/a"]);

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&report)
        .arg("--dry-run")
        .assert()
        .success();
}

#[test]
fn test_dry_run_sends_no_requests() {
    let server = StubServer::start(|_, _| (200, "{}".to_string()));
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(&server.endpoint);
    let dir = workspace.create_verification_dir(&["/a", "/b"]);

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-d")
        .arg(&dir)
        .arg("--dry-run")
        .assert()
        .success();

    assert!(server.requests().is_empty());
}

#[test]
fn test_debug_logs_exclusion_decisions() {
    let workspace = TestWorkspace::new();
    let config = workspace.write_config(UNREACHABLE_ENDPOINT);
    let report = workspace.write_report("report.jsonl", &["/a", "/a/b", "/a/c"]);
    let exclusions = workspace.write_exclusions(&["/a/b"]);

    reclaim_cmd()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&report)
        .arg("-e")
        .arg(&exclusions)
        .arg("--dry-run")
        .arg("--debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPLICITLY_EXCLUDED"))
        .stdout(predicate::str::contains("PARENT_IMPLICITLY_EXCLUDED"));
}
