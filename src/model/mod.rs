mod history;
mod ids;
mod signature;

pub use history::{FileTouches, History, TouchRecord, VersionTimeline};
pub use ids::{COMMIT_MARKER, CommitId, ContentHash, FilePath, VersionLabel};
pub use signature::{SignatureDocument, SignatureEntry};
