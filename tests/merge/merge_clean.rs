use crate::common::command::{
    add_and_commit, cat_file, head_commit_id, init_repository_dir, parent_ids, read_ref,
    repository_dir, run_minigit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// `topic` edits 1.txt and adds topic.txt; `main` adds main.txt
#[rstest]
fn divergent_branches_merge_cleanly(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("main.txt"), "main".to_string()));
    add_and_commit(dir, "Main work");
    let main_tip = head_commit_id(dir);

    run_minigit_command(dir, &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("1.txt"), "one from topic".to_string()));
    write_file(FileSpec::new(dir.join("topic.txt"), "topic".to_string()));
    add_and_commit(dir, "Topic work");
    let topic_tip = head_commit_id(dir);

    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    run_minigit_command(dir, &["merge", "topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merge made by the 'three-way' strategy.",
        ))
        .stdout(predicate::str::contains("Merge branch 'topic'"));

    let merge_commit = head_commit_id(dir);
    assert_eq!(parent_ids(dir, &merge_commit), vec![main_tip, topic_tip]);
    assert_eq!(read_file(&dir.join("1.txt")), "one from topic");
    assert_eq!(read_file(&dir.join("topic.txt")), "topic");
    assert_eq!(read_file(&dir.join("main.txt")), "main");
    init_repository_dir
        .child(".minigit/MERGE_HEAD")
        .assert(predicate::path::missing());
}

#[rstest]
fn merging_an_ancestor_is_up_to_date(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "old"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("1.txt"), "newer".to_string()));
    add_and_commit(dir, "Newer");
    let head = head_commit_id(dir);

    run_minigit_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up to date."));

    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn merging_a_descendant_still_records_a_merge_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let base = head_commit_id(dir);
    run_minigit_command(dir, &["branch", "ahead"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "ahead"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("ahead.txt"), "ahead".to_string()));
    add_and_commit(dir, "Ahead");
    let ahead = head_commit_id(dir);
    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();

    run_minigit_command(dir, &["merge", "ahead"])
        .assert()
        .success();

    let merge_commit = read_ref(dir, "refs/heads/main");
    assert_eq!(parent_ids(dir, &merge_commit), vec![base, ahead]);
    assert_eq!(read_file(&dir.join("ahead.txt")), "ahead");
}

#[rstest]
fn our_edits_survive_their_unrelated_edits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("a/2.txt"), "two on main".to_string()));
    add_and_commit(dir, "Main edit");

    run_minigit_command(dir, &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("a/b/3.txt"), "three on topic".to_string()));
    add_and_commit(dir, "Topic edit");

    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    run_minigit_command(dir, &["merge", "topic"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a/2.txt")), "two on main");
    assert_eq!(read_file(&dir.join("a/b/3.txt")), "three on topic");
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    let merged = cat_file(dir, &head_commit_id(dir));
    assert!(merged.contains(" a/2.txt\n"));
    assert!(merged.contains(" a/b/3.txt\n"));
}

#[rstest]
fn unrelated_histories_are_refused(
    init_repository_dir: TempDir,
    #[from(repository_dir)] other_dir: TempDir,
) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    // a root commit from another repository shares no history with ours
    run_minigit_command(other_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        other_dir.path().join("other.txt"),
        "other".to_string(),
    ));
    add_and_commit(other_dir.path(), "Other root");
    copy_objects(&other_dir.path().join(".minigit/objects"), &dir.join(".minigit/objects"));
    let orphan = head_commit_id(other_dir.path());

    run_minigit_command(dir, &["merge", &orphan])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no common ancestor"));

    assert_eq!(head_commit_id(dir), head);
    init_repository_dir
        .child(".minigit/MERGE_HEAD")
        .assert(predicate::path::missing());
    init_repository_dir
        .child("other.txt")
        .assert(predicate::path::missing());
}

fn copy_objects(from: &std::path::Path, to: &std::path::Path) {
    for entry in walkdir::WalkDir::new(from)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let relative = entry
            .path()
            .strip_prefix(from)
            .expect("entry is under the objects directory");
        let target = to.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create object directory");
        }
        std::fs::copy(entry.path(), &target).expect("Failed to copy object");
    }
}
