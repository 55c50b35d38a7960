use crate::common::command::{
    cat_file, head_commit_id, minigit_commit, repository_dir, run_minigit_command,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_stages_nested_files(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let files = write_generated_files(&repository_dir.path().join("nested/dir"), 3);

    run_minigit_command(repository_dir.path(), &["add", "nested"])
        .assert()
        .success();

    repository_dir
        .child(".minigit/index")
        .assert(predicate::path::is_file());

    let commit_output = minigit_commit(repository_dir.path(), "Add generated files")
        .output()
        .expect("Failed to run commit");
    assert!(commit_output.status.success());

    let head = head_commit_id(repository_dir.path());
    let content = cat_file(repository_dir.path(), &head);
    for file in files {
        let name = file
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("generated names are UTF-8");
        assert!(
            content.contains(&format!("nested/dir/{name}")),
            "{name} missing from commit:\n{content}"
        );
    }
}

#[rstest]
fn adding_a_missing_path_fails(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn failed_add_stages_nothing(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("present.txt"),
        "here".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["add", "present.txt", "missing.txt"])
        .assert()
        .failure();

    minigit_commit(repository_dir.path(), "Should not happen")
        .assert()
        .failure()
        .stdout(predicate::str::contains("nothing to commit"));
}
