use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the licguard binary.
#[allow(deprecated)]
fn licguard_cmd() -> Command {
    Command::cargo_bin("licguard").unwrap()
}

#[test]
fn help_works() {
    licguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("--database-dir"));
}

#[test]
fn quiet_and_verbose_conflict() {
    licguard_cmd()
        .args(["-q", "-v", "md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
