use crate::common::command::{
    add_and_commit, head_commit_id, init_repository_dir, read_ref, run_minigit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn branch_starts_at_head_by_default(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .success();

    assert_eq!(read_ref(dir, "refs/heads/topic"), head_commit_id(dir));
}

#[rstest]
#[case("main^")]
#[case("HEAD~1")]
#[case("@^")]
fn branch_from_ancestor_revision(init_repository_dir: TempDir, #[case] start_point: &str) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    add_and_commit(dir, "Second commit");

    run_minigit_command(dir, &["branch", "old", start_point])
        .assert()
        .success();

    assert_eq!(read_ref(dir, "refs/heads/old"), first);
}

#[rstest]
fn branch_from_abbreviated_commit_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_minigit_command(dir, &["branch", "short", &head[..7]])
        .assert()
        .success();

    assert_eq!(read_ref(dir, "refs/heads/short"), head);
}

#[rstest]
fn hierarchical_branch_names_are_allowed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    assert_eq!(read_ref(dir, "refs/heads/feature/login"), head_commit_id(dir));
}

#[rstest]
fn duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .success();

    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[rstest]
fn force_moves_existing_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    add_and_commit(dir, "Second commit");

    run_minigit_command(dir, &["branch", "-f", "topic"])
        .assert()
        .success();

    let second = head_commit_id(dir);
    assert_ne!(first, second);
    assert_eq!(read_ref(dir, "refs/heads/topic"), second);
}

#[rstest]
#[case("bad..name")]
#[case("ends.lock")]
#[case("has space")]
#[case("HEAD")]
fn invalid_branch_names_are_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    run_minigit_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

#[rstest]
#[case("nope")]
#[case("main~5")]
fn unknown_start_point_fails(init_repository_dir: TempDir, #[case] start_point: &str) {
    run_minigit_command(init_repository_dir.path(), &["branch", "topic", start_point])
        .assert()
        .failure();

    init_repository_dir
        .path()
        .join(".minigit/refs/heads/topic")
        .try_exists()
        .map(|exists| assert!(!exists))
        .expect("Failed to check branch file");
}
