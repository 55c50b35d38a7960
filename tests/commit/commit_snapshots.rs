use crate::common::command::{
    add_and_commit, cat_file, head_commit_id, init_repository_dir, minigit_commit,
    minigit_commit_at, parent_ids, repository_dir, run_minigit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn first_commit_is_a_root_commit(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_minigit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    minigit_commit(repository_dir.path(), "first")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"^\[main \(root-commit\) [0-9a-f]{7}\] first\n$").unwrap(),
        );

    assert!(parent_ids(repository_dir.path(), &head_commit_id(repository_dir.path())).is_empty());
}

#[rstest]
fn empty_commit_reports_nothing_to_commit(init_repository_dir: TempDir) {
    minigit_commit(init_repository_dir.path(), "nothing here")
        .assert()
        .failure()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_on_fresh_repository_reports_nothing_to_commit(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    minigit_commit(repository_dir.path(), "empty")
        .assert()
        .failure()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_carries_unstaged_paths_from_parent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("1.txt"), "one, edited".to_string()));
    run_minigit_command(dir, &["add", "1.txt"])
        .assert()
        .success();
    minigit_commit(dir, "edit one")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[main "));

    let second = head_commit_id(dir);
    assert_eq!(parent_ids(dir, &second), vec![first]);

    let content = cat_file(dir, &second);
    assert!(content.contains(" 1.txt\n"));
    assert!(content.contains(" a/2.txt\n"));
    assert!(content.contains(" a/b/3.txt\n"));
}

#[rstest]
fn fixed_commit_date_makes_ids_reproducible(
    #[from(repository_dir)] first_dir: TempDir,
    #[from(repository_dir)] second_dir: TempDir,
) {
    let date = "2023-01-01T12:00:00+00:00";
    let mut ids = Vec::new();

    for dir in [first_dir.path(), second_dir.path()] {
        run_minigit_command(dir, &["init"]).assert().success();
        write_file(FileSpec::new(dir.join("same.txt"), "same".to_string()));
        run_minigit_command(dir, &["add", "."]).assert().success();
        minigit_commit_at(dir, "same", date).assert().success();
        ids.push(head_commit_id(dir));
    }

    assert_eq!(ids[0], ids[1]);
}

#[rstest]
fn commit_records_date_and_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_minigit_command(dir, &["add", "4.txt"]).assert().success();
    minigit_commit_at(dir, "  add four  ", "2023-01-01T12:00:00+00:00")
        .assert()
        .success();

    let content = cat_file(dir, &head_commit_id(dir));
    assert!(content.contains("date 2023-01-01T12:00:00"));
    assert!(content.ends_with("\n\nadd four\n") || content.ends_with("\n\nadd four"));
}

#[rstest]
fn staging_is_cleared_after_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("5.txt"), "five".to_string()));
    add_and_commit(dir, "add five");

    minigit_commit(dir, "again")
        .assert()
        .failure()
        .stdout(predicate::str::contains("nothing to commit"));
}
