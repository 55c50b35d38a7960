use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

const HELLO_OID: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

#[rstest]
fn hash_object_prints_blob_id_without_storing(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello\n".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    repository_dir
        .child(format!(".minigit/objects/{}/{}", &HELLO_OID[..2], &HELLO_OID[2..]))
        .assert(predicate::path::missing());
}

#[rstest]
fn hash_object_with_write_stores_the_blob(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello\n".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    repository_dir
        .child(format!(".minigit/objects/{}/{}", &HELLO_OID[..2], &HELLO_OID[2..]))
        .assert(predicate::path::is_file());
}
