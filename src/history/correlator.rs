//! Version label extraction from the tracked file

use regex::bytes::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::model::{CommitId, FilePath, VersionLabel};
use crate::repository::ContentReader;

/// Compiled version pattern.
///
/// `^` and `$` anchor at line boundaries, so a pattern written for a single
/// line of the tracked file matches anywhere in it.
#[derive(Debug, Clone)]
pub struct VersionMatcher {
    pattern: Option<Regex>,
}

impl VersionMatcher {
    /// Compile `pattern`. A pattern that fails to compile never matches.
    pub fn new(pattern: &str) -> Self {
        match Self::try_new(pattern) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!("Version pattern does not compile, no versions will be detected: {}", e);
                Self { pattern: None }
            }
        }
    }

    pub fn try_new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).multi_line(true).build()?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.pattern.is_some()
    }

    /// Number of capture groups, excluding the whole-match group
    pub fn capture_groups(&self) -> usize {
        self.pattern
            .as_ref()
            .map_or(0, |re| re.captures_len().saturating_sub(1))
    }

    /// Label for `content` at `commit`, from the first match.
    ///
    /// Groups that did not take part in the match contribute an empty string.
    pub fn label_for(&self, commit: &CommitId, content: &[u8]) -> Option<VersionLabel> {
        let captures = self.pattern.as_ref()?.captures(content)?;
        let groups: Vec<String> = captures
            .iter()
            .skip(1)
            .map(|group| {
                group
                    .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
                    .unwrap_or_default()
            })
            .collect();
        Some(VersionLabel::from_captures(&groups, commit))
    }
}

/// Derives labels for the tracked file at individual commits
pub struct VersionCorrelator<'a, R: ?Sized> {
    reader: &'a R,
    tracked: &'a FilePath,
    matcher: &'a VersionMatcher,
}

impl<'a, R: ContentReader + ?Sized> VersionCorrelator<'a, R> {
    pub fn new(reader: &'a R, tracked: &'a FilePath, matcher: &'a VersionMatcher) -> Self {
        Self {
            reader,
            tracked,
            matcher,
        }
    }

    /// Label of the tracked file at `commit`; `None` if it is unreadable or does not match
    pub fn correlate(&self, commit: &CommitId) -> Option<VersionLabel> {
        if !self.matcher.is_valid() {
            return None;
        }
        match self.reader.fetch(commit, self.tracked) {
            Ok(Some(content)) => self.matcher.label_for(commit, &content),
            Ok(None) => {
                debug!("{} absent at {}", self.tracked, commit);
                None
            }
            Err(e) => {
                debug!("Could not read {} at {}: {:#}", self.tracked, commit, e);
                None
            }
        }
    }
}
