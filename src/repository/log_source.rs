//! Sources of the line-oriented history log
//!
//! The log is the shape `git log --stat --stat-width=10000 --format=%x11%H%x12`
//! prints: a boundary line per commit, newest first, followed by one
//! ` <path> | <stat>` line per changed file. Only the path is ever read, so
//! the git2 walker writes the change kind as the stat instead of counting
//! lines.

use anyhow::{Context, Result};
use git2::{Delta, Diff, DiffDelta, ErrorCode, Oid, Repository, Sort};
use std::fs;
use std::path::PathBuf;

/// Opens a commit boundary line
pub const COMMIT_START: char = '\u{11}';
/// Closes a commit boundary line
pub const COMMIT_END: char = '\u{12}';

/// Produces the raw history log, one entry per line
pub trait LogSource {
    fn lines(&self) -> Result<Vec<String>>;
}

/// Format a commit boundary line
pub fn boundary_line(commit: &str) -> String {
    format!("{}{}{}", COMMIT_START, commit, COMMIT_END)
}

/// Walks a repository with git2 and renders the log in memory
pub struct Git2LogSource {
    repo_path: PathBuf,
}

impl Git2LogSource {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Commits reachable from HEAD, newest first, parents after children
    fn collect_commits(&self, repo: &Repository) -> Result<Vec<Oid>> {
        match repo.head() {
            Ok(_) => {}
            // Fresh repository without commits
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e).context("Failed to resolve HEAD"),
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        let commits = revwalk
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to walk history")?;
        Ok(commits)
    }
}

impl LogSource for Git2LogSource {
    fn lines(&self) -> Result<Vec<String>> {
        let repo = Repository::open(&self.repo_path).with_context(|| {
            format!("Failed to open git repository at {}", self.repo_path.display())
        })?;

        let mut lines = Vec::new();
        for oid in self.collect_commits(&repo)? {
            let commit = repo
                .find_commit(oid)
                .with_context(|| format!("Commit not found: {}", oid))?;
            lines.push(boundary_line(&oid.to_string()));

            // Like `git log --stat`, merges list no files
            if commit.parent_count() > 1 {
                continue;
            }

            let parent_tree = match commit.parent(0) {
                Ok(parent) => Some(parent.tree()?),
                Err(_) => None,
            };
            let tree = commit.tree()?;
            let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
            append_stat_lines(&diff, &mut lines);
        }
        Ok(lines)
    }
}

fn append_stat_lines(diff: &Diff<'_>, lines: &mut Vec<String>) {
    for delta in diff.deltas() {
        if let Some(path) = delta_path(&delta) {
            lines.push(format!(" {} | {}", path, change_kind(delta.status())));
        }
    }
}

/// `git diff --name-status` letter
fn change_kind(status: Delta) -> char {
    match status {
        Delta::Added => 'A',
        Delta::Deleted => 'D',
        Delta::Renamed => 'R',
        Delta::Copied => 'C',
        Delta::Typechange => 'T',
        _ => 'M',
    }
}

fn delta_path(delta: &DiffDelta<'_>) -> Option<String> {
    delta
        .new_file()
        .path()
        .or_else(|| delta.old_file().path())
        .map(|p| p.to_string_lossy().into_owned())
}

/// Reads a log previously recorded with `git log` to a file
pub struct LogFileSource {
    path: PathBuf,
}

impl LogFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for LogFileSource {
    fn lines(&self) -> Result<Vec<String>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read log file {}", self.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
