//! Revision content access
//!
//! `Ok(None)` means the path did not exist at that commit; an empty file is
//! `Ok(Some(vec![]))`. Callers in the history pipeline treat `Err` as absence.

use anyhow::{Context, Result};
use git2::{ErrorCode, ObjectType, Oid, Repository};
use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::path::Path;

use crate::model::{CommitId, FilePath};

/// Reads a file as it existed at a given commit
pub trait ContentReader {
    fn fetch(&self, commit: &CommitId, path: &FilePath) -> Result<Option<Vec<u8>>>;
}

impl<R: ContentReader + ?Sized> ContentReader for &R {
    fn fetch(&self, commit: &CommitId, path: &FilePath) -> Result<Option<Vec<u8>>> {
        (**self).fetch(commit, path)
    }
}

/// Reader backed by a git object database
pub struct GitContentReader {
    repo: Repository,
}

impl GitContentReader {
    pub fn open(repo_path: &Path) -> Result<Self> {
        let repo = Repository::open(repo_path)
            .with_context(|| format!("Failed to open git repository at {}", repo_path.display()))?;
        Ok(Self { repo })
    }
}

impl ContentReader for GitContentReader {
    fn fetch(&self, commit: &CommitId, path: &FilePath) -> Result<Option<Vec<u8>>> {
        let oid = Oid::from_str(commit.as_str())
            .with_context(|| format!("Invalid commit id: {}", commit))?;
        let tree = self
            .repo
            .find_commit(oid)
            .with_context(|| format!("Commit not found: {}", commit))?
            .tree()?;

        let entry = match tree.get_path(Path::new(path.as_str())) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // Directories and submodules have no content to hash
        if entry.kind() != Some(ObjectType::Blob) {
            return Ok(None);
        }

        let blob = self
            .repo
            .find_blob(entry.id())
            .with_context(|| format!("Failed to read {} at {}", path, commit))?;
        Ok(Some(blob.content().to_vec()))
    }
}

/// In-memory reader, for tests and benchmarks
#[derive(Debug, Default)]
pub struct MemoryReader {
    contents: FxHashMap<(CommitId, FilePath), Vec<u8>>,
    fetches: Cell<usize>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, commit: &str, path: &str, content: impl Into<Vec<u8>>) {
        self.contents
            .insert((CommitId::from(commit), FilePath::from(path)), content.into());
    }

    pub fn with(mut self, commit: &str, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(commit, path, content);
        self
    }

    /// Number of fetch calls served so far
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl ContentReader for MemoryReader {
    fn fetch(&self, commit: &CommitId, path: &FilePath) -> Result<Option<Vec<u8>>> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self
            .contents
            .get(&(commit.clone(), path.clone()))
            .cloned())
    }
}
