use crate::common::command::{read_ref, repository_dir, run_minigit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_creates_repository_layout(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized empty minigit repository in",
        ));

    repository_dir
        .child(".minigit/objects")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".minigit/refs/heads")
        .assert(predicate::path::is_dir());
    assert_eq!(read_ref(repository_dir.path(), "HEAD"), "ref: refs/heads/main");
}

#[rstest]
fn init_at_explicit_path(repository_dir: TempDir) {
    let nested = repository_dir.path().join("project");

    run_minigit_command(
        repository_dir.path(),
        &["init", nested.to_str().expect("temp path is UTF-8")],
    )
    .assert()
    .success();

    repository_dir
        .child("project/.minigit/HEAD")
        .assert(predicate::path::is_file());
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a minigit repository"));
}
