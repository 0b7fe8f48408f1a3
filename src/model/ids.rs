//! Typed identifiers used throughout the history pipeline
//!
//! Commit ids, paths, labels and hashes are all strings underneath; wrapping
//! them keeps a path from ever being looked up as a commit.

use md5::{Digest, Md5};
use serde::Serialize;
use std::fmt;

use crate::util::base_name;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(
    /// Commit identifier as printed by the VCS (full hex SHA for git)
    CommitId
);

string_newtype!(
    /// Repository-relative, `/`-separated path
    FilePath
);

string_newtype!(
    /// Version string derived from the tracked file, suffixed with the commit it came from
    VersionLabel
);

string_newtype!(
    /// Lowercase hex MD5 digest of a file's content at one commit
    ContentHash
);

/// Separator between the captured version text and the originating commit
pub const COMMIT_MARKER: &str = "-commitid-";

impl VersionLabel {
    /// Join captured groups with `-` and append the commit marker.
    ///
    /// With no captures the label is `-commitid-<commit>`.
    pub fn from_captures<S: AsRef<str>>(captures: &[S], commit: &CommitId) -> Self {
        let joined = captures
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join("-");
        Self(format!("{}{}{}", joined, COMMIT_MARKER, commit))
    }
}

impl ContentHash {
    /// Digest raw bytes. Only call this for content that exists; absence is not empty content.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(content);
        Self(hex::encode(hasher.finalize()))
    }
}

impl FilePath {
    /// Final path component
    pub fn file_name(&self) -> &str {
        base_name(&self.0)
    }
}
