// Shared git fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use halcyon::history::ScanConfig;
use halcyon::model::FilePath;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary git repository with no commits
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().join("demo");
    let repo = Repository::init(&repo_path).unwrap();

    // Configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Commit time one minute after the previous commit, so time order is unambiguous
fn next_signature(repo: &Repository) -> Signature<'static> {
    let previous = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .map(|c| c.time().seconds())
        .unwrap_or(1_600_000_000);
    Signature::new("Test User", "test@example.com", &Time::new(previous + 60, 0)).unwrap()
}

fn commit_index(repo: &Repository, index: &mut git2::Index, message: &str) -> String {
    let sig = next_signature(repo);
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    // Get parent commit if exists
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
        .to_string()
}

/// Write files, stage them and commit; returns the commit id
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str) -> String {
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        // Write file to working directory
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();

        index.add_path(std::path::Path::new(path)).unwrap();
    }

    commit_index(repo, &mut index, message)
}

/// Remove a file from the repository and commit
pub fn remove_file_commit(repo: &Repository, path: &str, message: &str) -> String {
    let full_path = repo.workdir().unwrap().join(path);
    if full_path.exists() {
        std::fs::remove_file(&full_path).unwrap();
    }

    let mut index = repo.index().unwrap();
    index.remove_path(std::path::Path::new(path)).unwrap();

    commit_index(repo, &mut index, message)
}

/// Scan settings for the `version.txt` / `VERSION = "x"` fixtures
pub fn version_config(top: usize) -> ScanConfig {
    ScanConfig {
        project: "demo".to_string(),
        tracked_file: FilePath::from("version.txt"),
        pattern: r#"^VERSION = "([^"]+)"$"#.to_string(),
        omit: Vec::new(),
        top,
    }
}

pub fn version_file(version: &str) -> Vec<u8> {
    format!("# release\nVERSION = \"{}\"\n", version).into_bytes()
}
