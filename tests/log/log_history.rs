use crate::common::command::{
    add_and_commit, head_commit_id, init_repository_dir, repository_dir, run_minigit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::Predicate;
use predicates::prelude::predicate;
use rstest::rstest;

fn log_output(dir: &std::path::Path) -> String {
    let output = run_minigit_command(dir, &["log"])
        .output()
        .expect("Failed to run log");
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("log output is not UTF-8")
}

#[rstest]
fn log_lists_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    add_and_commit(dir, "Second commit");
    let head = head_commit_id(dir);

    let log = log_output(dir);

    assert!(log.starts_with(&format!("commit {head}\n")));
    let second = log.find("    Second commit").expect("second commit listed");
    let first = log.find("    Initial commit").expect("first commit listed");
    assert!(second < first);
    assert_eq!(log.matches("Date:   ").count(), 2);
}

#[rstest]
fn log_marks_merge_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "topic"]).assert().success();

    write_file(FileSpec::new(dir.join("main.txt"), "main side".to_string()));
    add_and_commit(dir, "Main work");

    run_minigit_command(dir, &["checkout", "topic"]).assert().success();
    write_file(FileSpec::new(dir.join("topic.txt"), "topic side".to_string()));
    add_and_commit(dir, "Topic work");

    run_minigit_command(dir, &["checkout", "main"]).assert().success();
    run_minigit_command(dir, &["merge", "topic"]).assert().success();

    let log = log_output(dir);

    assert!(predicate::str::is_match(r"(?m)^Merge: [0-9a-f]{7} [0-9a-f]{7}$")
        .unwrap()
        .eval(&log));
    assert!(log.contains("    Merge branch 'topic'"));
    // first-parent walk skips the topic branch commit
    assert!(!log.contains("Topic work"));
}

#[rstest]
fn log_on_unborn_branch_fails(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have any commits yet"));
}
