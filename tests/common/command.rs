use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// A repository with one commit: a.txt = "hello\n" committed as "first"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minigit(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello\n".to_string(),
    ));

    run_minigit(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    minigit_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_minigit(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minigit").expect("failed to find minigit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn minigit_commit(dir: &Path, message: &str) -> Command {
    run_minigit(dir, &["commit", "-m", message])
}

pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".minigit").join("HEAD"))
        .expect("failed to read HEAD")
        .trim()
        .to_string()
}

pub fn read_branch_tip(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".minigit").join("refs").join("heads").join(branch))
        .expect("failed to read branch file")
        .trim()
        .to_string()
}

pub fn read_index(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".minigit").join("index")).expect("failed to read index")
}

pub fn read_object(dir: &Path, object_id: &str) -> String {
    std::fs::read_to_string(dir.join(".minigit").join("objects").join(object_id))
        .expect("failed to read object")
}

pub fn count_objects(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".minigit").join("objects"))
        .expect("failed to list objects")
        .count()
}

/// The blob id a path is staged under, read straight from the index file.
pub fn staged_blob_id(dir: &Path, path: &str) -> String {
    read_index(dir)
        .lines()
        .find_map(|line| {
            let (entry_path, blob_id) = line.split_once(':')?;
            (entry_path == path).then(|| blob_id.to_string())
        })
        .unwrap_or_else(|| panic!("path {path} is not staged"))
}

/// Sorted listing of the working directory, `.minigit/` excluded.
pub fn list_workspace(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to list workspace")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name != ".minigit")
        .collect();
    names.sort();
    names
}
