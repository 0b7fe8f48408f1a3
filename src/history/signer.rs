//! Hashing selected files and joining them with version labels

use tracing::debug;

use crate::model::{
    CommitId, ContentHash, FilePath, FileTouches, SignatureDocument, VersionTimeline,
};
use crate::repository::ContentReader;

use super::progress::PassProgress;

/// Records dropped while building signatures
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SignStats {
    pub hashed: usize,
    /// File did not exist, or could not be read, at the commit
    pub absent: usize,
    /// Commit precedes the first version-bearing commit
    pub unlabeled: usize,
}

/// Builds one signature document per selected file
pub struct SignatureBuilder<'a, R: ?Sized> {
    project: &'a str,
    reader: &'a R,
    versions: &'a VersionTimeline,
}

impl<'a, R: ContentReader + ?Sized> SignatureBuilder<'a, R> {
    pub fn new(project: &'a str, reader: &'a R, versions: &'a VersionTimeline) -> Self {
        Self {
            project,
            reader,
            versions,
        }
    }

    pub fn build_all(
        &self,
        files: &FileTouches,
        progress: &PassProgress,
    ) -> (Vec<SignatureDocument>, SignStats) {
        let mut stats = SignStats::default();
        let documents = files
            .iter()
            .map(|(path, commits)| {
                progress.set_current(path);
                let doc = self.build_document(path, commits, &mut stats);
                progress.advance();
                doc
            })
            .collect();
        (documents, stats)
    }

    pub fn build_document(
        &self,
        path: &FilePath,
        commits: &[CommitId],
        stats: &mut SignStats,
    ) -> SignatureDocument {
        let mut doc = SignatureDocument::new(self.project, path.clone());
        for commit in commits {
            let content = match self.reader.fetch(commit, path) {
                Ok(Some(content)) => content,
                Ok(None) => {
                    stats.absent += 1;
                    continue;
                }
                Err(e) => {
                    debug!("Could not read {} at {}: {:#}", path, commit, e);
                    stats.absent += 1;
                    continue;
                }
            };
            let Some(label) = self.versions.label_of(commit) else {
                stats.unlabeled += 1;
                continue;
            };
            doc.insert(label.clone(), ContentHash::of(&content));
            stats.hashed += 1;
        }
        doc
    }
}
