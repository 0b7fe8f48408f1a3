//! Choosing which files get signatures

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{FileTouches, FilePath};

/// Extensions never fingerprinted: server-side templates and data/config
/// formats, none of which a deployed site serves verbatim.
pub const DENIED_EXTENSIONS: [&str; 5] = ["php", "asp", "xml", "sql", "ini"];

/// Applies the denylist, the exclusion pattern, then the top-N cut
#[derive(Debug, Clone)]
pub struct FileSelector {
    exclude: Option<Regex>,
    top: usize,
}

impl FileSelector {
    /// `omit` holds path fragments matched literally; `top == 0` keeps every file
    pub fn new<S: AsRef<str>>(omit: &[S], top: usize) -> Result<Self> {
        let exclude = match exclusion_pattern(omit) {
            Some(pattern) => Some(
                Regex::new(&pattern)
                    .with_context(|| format!("Invalid exclusion pattern: {}", pattern))?,
            ),
            None => None,
        };
        Ok(Self { exclude, top })
    }

    /// Case-sensitive `.<ext>` suffix; a bare `.ini` dotfile counts too
    pub fn is_denied_extension(path: &FilePath) -> bool {
        DENIED_EXTENSIONS.iter().any(|ext| {
            path.as_str()
                .strip_suffix(ext)
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    pub fn is_excluded(&self, path: &FilePath) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|re| re.is_match(path.as_str()))
    }

    /// Both filters, without ranking
    pub fn filter(&self, files: &mut FileTouches) {
        files.retain(|path| !Self::is_denied_extension(path) && !self.is_excluded(path));
    }

    /// Filter, then keep the most-touched files. Ranking only sees survivors.
    pub fn select(&self, mut files: FileTouches) -> FileTouches {
        self.filter(&mut files);
        if self.top > 0 {
            files.keep_most_touched(self.top);
        }
        files
    }
}

/// Alternation of the escaped, non-empty fragments
pub fn exclusion_pattern<S: AsRef<str>>(fragments: &[S]) -> Option<String> {
    let escaped: Vec<String> = fragments
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(format!("({})", escaped.join("|")))
    }
}
