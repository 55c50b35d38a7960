use crate::common::command::{head_commit_id, init_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

// blob ID of "one"
const ONE_OID: &str = "43dd47ea691c90a5fa7827892c70241913351963";

#[rstest]
fn cat_file_prints_blob_content(init_repository_dir: TempDir) {
    run_minigit_command(init_repository_dir.path(), &["cat-file", "-p", ONE_OID])
        .assert()
        .success()
        .stdout("one");
}

#[rstest]
fn cat_file_accepts_abbreviated_ids(init_repository_dir: TempDir) {
    run_minigit_command(init_repository_dir.path(), &["cat-file", "-p", &ONE_OID[..8]])
        .assert()
        .success()
        .stdout("one");
}

#[rstest]
fn cat_file_prints_blob_type(init_repository_dir: TempDir) {
    run_minigit_command(init_repository_dir.path(), &["cat-file", "-t", ONE_OID])
        .assert()
        .success()
        .stdout("blob\n");
}

#[rstest]
fn cat_file_prints_commit_type_and_content(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_minigit_command(dir, &["cat-file", "-t", &head])
        .assert()
        .success()
        .stdout("commit\n");
    run_minigit_command(dir, &["cat-file", "-p", &head])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date "))
        .stdout(predicate::str::contains(format!("file {ONE_OID} 1.txt\n")))
        .stdout(predicate::str::ends_with("\n\nInitial commit"));
}

#[rstest]
fn cat_file_of_unknown_object_fails(init_repository_dir: TempDir) {
    run_minigit_command(init_repository_dir.path(), &["cat-file", "-p", "0000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
