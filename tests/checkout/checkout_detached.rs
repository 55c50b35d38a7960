use crate::common::command::{
    add_and_commit, head_commit_id, init_repository_dir, minigit_commit, parent_ids, read_ref,
    run_minigit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    add_and_commit(dir, "Second commit");

    run_minigit_command(dir, &["checkout", &first[..7]])
        .assert()
        .success()
        .stderr(predicate::str::contains("You are in 'detached HEAD' state"))
        .stderr(predicate::str::contains(format!(
            "HEAD is now at {} Initial commit",
            &first[..7]
        )));

    assert_eq!(read_ref(dir, "HEAD"), first);
    assert_eq!(read_file(&dir.join("1.txt")), "one");
}

#[rstest]
fn commits_on_detached_head_move_head_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    run_minigit_command(dir, &["checkout", "HEAD"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("detached.txt"), "d".to_string()));
    run_minigit_command(dir, &["add", "detached.txt"])
        .assert()
        .success();
    minigit_commit(dir, "Detached work")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[detached HEAD "));

    let detached = read_ref(dir, "HEAD");
    assert_eq!(parent_ids(dir, &detached), vec![first.clone()]);
    assert_eq!(read_ref(dir, "refs/heads/main"), first);
}

#[rstest]
fn leaving_detached_head_reports_previous_position(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    add_and_commit(dir, "Second commit");
    run_minigit_command(dir, &["checkout", "main^"])
        .assert()
        .success();

    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "Previous HEAD position was {} Initial commit",
            &first[..7]
        )))
        .stderr(predicate::str::contains("Switched to branch 'main'"));

    assert_eq!(read_file(&dir.join("1.txt")), "edited");
}
