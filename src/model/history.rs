//! Structures built from one pass over the history log

use rustc_hash::{FxHashMap, FxHashSet};

use super::ids::{CommitId, FilePath, VersionLabel};

/// A file's content changed in a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchRecord<'a> {
    pub path: &'a FilePath,
    pub commit: &'a CommitId,
}

/// Ordered map of file path -> commits that touched it.
///
/// Files keep their first-encounter order and each file's commits keep log
/// order, so ranking ties resolve the same way on every run.
#[derive(Debug, Default, Clone)]
pub struct FileTouches {
    index: FxHashMap<FilePath, usize>,
    entries: Vec<(FilePath, Vec<CommitId>)>,
}

impl FileTouches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` changed in `commit`; repeated records are ignored
    pub fn touch(&mut self, path: FilePath, commit: &CommitId) {
        let idx = match self.index.get(&path) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(path.clone(), idx);
                self.entries.push((path, Vec::new()));
                idx
            }
        };
        let commits = &mut self.entries[idx].1;
        // A commit's file lines are contiguous, so a repeat can only be the last one
        if commits.last() != Some(commit) {
            commits.push(commit.clone());
        }
    }

    pub fn commits_of(&self, path: &FilePath) -> Option<&[CommitId]> {
        self.index
            .get(path)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn contains(&self, path: &FilePath) -> bool {
        self.index.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilePath, &[CommitId])> {
        self.entries
            .iter()
            .map(|(path, commits)| (path, commits.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &FilePath> {
        self.entries.iter().map(|(path, _)| path)
    }

    /// Every (file, commit) fact in file order
    pub fn records(&self) -> impl Iterator<Item = TouchRecord<'_>> {
        self.entries.iter().flat_map(|(path, commits)| {
            commits.iter().map(move |commit| TouchRecord { path, commit })
        })
    }

    /// Keep only the files for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&FilePath) -> bool) {
        self.entries.retain(|(path, _)| keep(path));
        self.reindex();
    }

    /// Keep the `n` most-touched files, most-touched first. Ties keep encounter order.
    pub fn keep_most_touched(&mut self, n: usize) {
        // sort_by is stable
        self.entries
            .sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        self.entries.truncate(n);
        self.reindex();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, (path, _)) in self.entries.iter().enumerate() {
            self.index.insert(path.clone(), idx);
        }
    }
}

/// Commit -> version label assignments
#[derive(Debug, Default, Clone)]
pub struct VersionTimeline {
    labels: FxHashMap<CommitId, VersionLabel>,
}

impl VersionTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, commit: CommitId, label: VersionLabel) {
        self.labels.insert(commit, label);
    }

    pub fn label_of(&self, commit: &CommitId) -> Option<&VersionLabel> {
        self.labels.get(commit)
    }

    /// Number of commits carrying a label
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct labels (one per version-bearing commit)
    pub fn distinct_labels(&self) -> usize {
        self.labels.values().collect::<FxHashSet<_>>().len()
    }
}

/// Everything the log parser learns in one pass
#[derive(Debug, Default, Clone)]
pub struct History {
    /// Non-tracked files and the commits that changed them
    pub files: FileTouches,
    /// Commits in log order (newest first)
    pub commits: Vec<CommitId>,
    pub versions: VersionTimeline,
    /// Lines that were neither a commit boundary nor a file change
    pub skipped_lines: usize,
}
