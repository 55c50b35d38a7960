use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on `main` holding three files
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    minigit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_minigit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minigit").expect("Failed to find minigit binary");
    cmd.env("NO_PAGER", "1");
    cmd.env_remove("MINIGIT_COMMIT_DATE");
    cmd.env_remove("MINIGIT_LOG");
    cmd.current_dir(dir);
    cmd.args(args);
    cmd
}

pub fn minigit_commit(dir: &Path, message: &str) -> Command {
    run_minigit_command(dir, &["commit", "-m", message])
}

/// Commit with a fixed timestamp so the resulting ID is reproducible
pub fn minigit_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = minigit_commit(dir, message);
    cmd.env("MINIGIT_COMMIT_DATE", date);
    cmd
}

/// Stage everything and commit it
pub fn add_and_commit(dir: &Path, message: &str) {
    run_minigit_command(dir, &["add", "."]).assert().success();
    minigit_commit(dir, message).assert().success();
}

pub fn read_ref(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".minigit").join(name))
        .unwrap_or_else(|e| panic!("Failed to read ref {name}: {e}"))
        .trim()
        .to_string()
}

pub fn head_commit_id(dir: &Path) -> String {
    let head = read_ref(dir, "HEAD");
    match head.strip_prefix("ref: ") {
        Some(branch_ref) => read_ref(dir, branch_ref),
        None => head,
    }
}

pub fn cat_file(dir: &Path, object_id: &str) -> String {
    let output = run_minigit_command(dir, &["cat-file", "-p", object_id])
        .output()
        .expect("Failed to run cat-file");
    String::from_utf8(output.stdout).expect("cat-file output is not UTF-8")
}

pub fn parent_ids(dir: &Path, commit_id: &str) -> Vec<String> {
    cat_file(dir, commit_id)
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
        .collect()
}
