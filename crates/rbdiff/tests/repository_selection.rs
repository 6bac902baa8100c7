use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn create_cvs_checkout() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::create_dir(dir.path().join("CVS")).expect("create CVS dir");
    fs::write(dir.path().join("CVS/Root"), "/var/lib/cvs\n").expect("write CVS/Root");
    dir
}

macro_rules! rbdiff {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("rbdiff")
    };
}

#[test]
fn unknown_repository_type_lists_known_types() {
    let checkout = create_cvs_checkout();

    rbdiff!()
        .args(["--repository-type", "git", "resolve"])
        .current_dir(checkout.path())
        .assert()
        .failure()
        .stderr(contains("unknown repository type 'git'").and(contains("svn, cvs")));
}

#[test]
fn requested_type_must_be_detected() {
    let dir = TempDir::new().expect("create temp dir");

    rbdiff!()
        .args(["--repository-type", "cvs", "resolve"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("no cvs repository found"));
}

#[test]
fn scanning_finds_cvs_checkout() {
    let checkout = create_cvs_checkout();

    rbdiff!()
        .args(["resolve", "A:B"])
        .current_dir(checkout.path())
        .assert()
        .success()
        .stdout(contains("\"base\": \"A\""));
}

#[test]
fn list_repo_types_marks_detected_backend() {
    let checkout = create_cvs_checkout();

    rbdiff!()
        .arg("list-repo-types")
        .current_dir(checkout.path())
        .assert()
        .success()
        .stdout(contains("  svn\n").and(contains("* cvs\n")));
}

#[test]
fn parent_diffs_are_refused() {
    let checkout = create_cvs_checkout();

    rbdiff!()
        .args(["--repository-type", "cvs", "diff", "--parent", "trunk"])
        .current_dir(checkout.path())
        .assert()
        .failure()
        .stderr(contains("does not support parent diffs"));
}

#[test]
fn config_file_selects_backend() {
    let checkout = create_cvs_checkout();
    let config = checkout.path().join("rbdiff.toml");
    fs::write(&config, "repository_type = \"cvs\"\n").expect("write config");

    rbdiff!()
        .arg("--config")
        .arg(&config)
        .args(["resolve", "REL_1", "REL_2"])
        .current_dir(checkout.path())
        .assert()
        .success()
        .stdout(contains("\"base\": \"REL_1\""));
}

#[test]
fn unknown_config_key_is_reported_with_path() {
    let checkout = create_cvs_checkout();
    let config = checkout.path().join("rbdiff.toml");
    fs::write(&config, "repositry_type = \"cvs\"\n").expect("write config");

    rbdiff!()
        .arg("--config")
        .arg(&config)
        .arg("resolve")
        .current_dir(checkout.path())
        .assert()
        .failure()
        .stderr(contains("failed to parse config file").and(contains("rbdiff.toml")))
        .stderr(contains("caused by:"));
}
