use crate::common::command::{
    init_repository_dir, list_workspace, minigit_commit, read_branch_tip, read_head, read_index,
    run_minigit, staged_blob_id,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::fs;

mod common;

/// Build divergent branches on top of the shared "first" commit:
/// master gains b.txt, feature gains c.txt.
fn diverge(dir: &TempDir) {
    run_minigit(dir.path(), &["branch", "feature"]).assert().success();

    write_file(FileSpec::new(dir.path().join("b.txt"), "m\n".to_string()));
    run_minigit(dir.path(), &["add", "b.txt"]).assert().success();
    minigit_commit(dir.path(), "master adds b").assert().success();

    run_minigit(dir.path(), &["checkout", "feature"]).assert().success();

    write_file(FileSpec::new(dir.path().join("c.txt"), "f\n".to_string()));
    run_minigit(dir.path(), &["add", "c.txt"]).assert().success();
    minigit_commit(dir.path(), "feature adds c").assert().success();
}

#[rstest]
fn checkout_materializes_the_branch_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    diverge(&dir);

    // on feature after the divergence: a.txt and c.txt, but not b.txt
    assert_eq!(list_workspace(dir.path()), vec!["a.txt", "c.txt"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("c.txt")).unwrap(),
        "f\n"
    );

    run_minigit(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked out to master"));

    assert_eq!(list_workspace(dir.path()), vec!["a.txt", "b.txt"]);
    assert_eq!(read_head(dir.path()), "ref: refs/heads/master");
}

#[rstest]
fn checkout_rewrites_the_index_to_mirror_the_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    diverge(&dir);

    run_minigit(dir.path(), &["checkout", "master"]).assert().success();

    let index = read_index(dir.path());
    assert!(index.contains("a.txt:"));
    assert!(index.contains("b.txt:"));
    assert!(!index.contains("c.txt:"));
}

#[rstest]
fn checkout_discards_uncommitted_local_edits(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "scribbled over\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("untracked.txt"),
        "never staged\n".to_string(),
    ));

    run_minigit(dir.path(), &["checkout", "master"]).assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello\n"
    );
    assert!(!dir.path().join("untracked.txt").exists());
}

#[rstest]
fn checkout_is_idempotent(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    diverge(&dir);

    run_minigit(dir.path(), &["checkout", "master"]).assert().success();

    let head = read_head(dir.path());
    let index = read_index(dir.path());
    let workspace = list_workspace(dir.path());
    let a_content = fs::read_to_string(dir.path().join("a.txt")).unwrap();

    run_minigit(dir.path(), &["checkout", "master"]).assert().success();

    assert_eq!(read_head(dir.path()), head);
    assert_eq!(read_index(dir.path()), index);
    assert_eq!(list_workspace(dir.path()), workspace);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        a_content
    );
}

#[rstest]
fn checkout_of_a_commit_id_detaches_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first_tip = read_branch_tip(dir.path(), "master");

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "hello2\n".to_string(),
    ));
    run_minigit(dir.path(), &["add", "a.txt"]).assert().success();
    minigit_commit(dir.path(), "second").assert().success();

    run_minigit(dir.path(), &["checkout", &first_tip])
        .assert()
        .success();

    assert_eq!(read_head(dir.path()), first_tip);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello\n"
    );
}

#[rstest]
fn head_moves_before_the_snapshot_is_materialized(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_minigit(dir.path(), &["branch", "feature"]).assert().success();

    // the blob feature's snapshot will need
    let old_blob_id = staged_blob_id(dir.path(), "a.txt");

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "hello2\n".to_string(),
    ));
    run_minigit(dir.path(), &["add", "a.txt"]).assert().success();
    minigit_commit(dir.path(), "second").assert().success();

    // knock out that blob so materialization cannot complete
    fs::remove_file(
        dir.path()
            .join(".minigit")
            .join("objects")
            .join(&old_blob_id),
    )
    .unwrap();

    run_minigit(dir.path(), &["checkout", "feature"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("object not found"));

    // HEAD was already updated when materialization failed; the working
    // tree and index were left untouched
    assert_eq!(read_head(dir.path()), "ref: refs/heads/feature");
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello2\n"
    );
    assert!(read_index(dir.path()).lines().any(|line| line.starts_with("a.txt:")));
}

#[rstest]
fn checkout_of_an_unknown_revision_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_minigit(dir.path(), &["checkout", "no-such-thing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown revision"));

    // nothing moved
    assert_eq!(read_head(dir.path()), "ref: refs/heads/master");
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello\n"
    );
}
