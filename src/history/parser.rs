//! Two-state parser for the `--stat` history log
//!
//! Builds the file -> commits map, the ordered commit list and the version
//! timeline in one pass. Labels propagate in log order: each commit that
//! does not carry its own label inherits the last one assigned before it.

use tracing::debug;

use crate::model::{CommitId, FilePath, History, VersionLabel};
use crate::repository::{COMMIT_END, COMMIT_START};

/// One classified log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLine<'a> {
    /// Commit boundary carrying the commit id
    Commit(&'a str),
    /// A changed file's path
    FileChange(&'a str),
    /// Blank lines, summaries and anything unparseable
    Other,
}

impl<'a> LogLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if let Some(inner) = trimmed
            .strip_prefix(COMMIT_START)
            .and_then(|rest| rest.strip_suffix(COMMIT_END))
        {
            let commit = inner.trim();
            if commit.is_empty() {
                return LogLine::Other;
            }
            return LogLine::Commit(commit);
        }

        // The stat tail never contains '|', so the last one ends the path
        match trimmed.rsplit_once('|') {
            Some((path, _)) if !path.trim().is_empty() => LogLine::FileChange(path.trim()),
            _ => LogLine::Other,
        }
    }
}

#[derive(Debug)]
enum ParseState {
    AwaitingCommit,
    InCommit { commit: CommitId, changed: bool },
}

/// Incremental history parser.
///
/// `correlate` is called with the current commit whenever the tracked file
/// appears in it and returns that commit's label, if any.
pub struct HistoryParser<'a> {
    tracked: &'a FilePath,
    state: ParseState,
    current_label: Option<VersionLabel>,
    history: History,
}

impl<'a> HistoryParser<'a> {
    pub fn new(tracked: &'a FilePath) -> Self {
        Self {
            tracked,
            state: ParseState::AwaitingCommit,
            current_label: None,
            history: History::default(),
        }
    }

    pub fn feed<F>(&mut self, line: &str, correlate: &mut F)
    where
        F: FnMut(&CommitId) -> Option<VersionLabel>,
    {
        match LogLine::classify(line) {
            LogLine::Commit(commit) => self.start_commit(CommitId::from(commit)),
            LogLine::FileChange(path) => self.file_changed(path, line, correlate),
            LogLine::Other => {
                if !line.trim().is_empty() {
                    debug!("Skipping log line: {:?}", line);
                }
                self.history.skipped_lines += 1;
            }
        }
    }

    /// Close the last commit and return what was learned
    pub fn finish(mut self) -> History {
        self.close_commit();
        self.history
    }

    fn start_commit(&mut self, commit: CommitId) {
        self.close_commit();
        self.history.commits.push(commit.clone());
        self.state = ParseState::InCommit {
            commit,
            changed: false,
        };
    }

    /// Commits without their own label inherit the current one
    fn close_commit(&mut self) {
        let state = std::mem::replace(&mut self.state, ParseState::AwaitingCommit);
        if let ParseState::InCommit {
            commit,
            changed: false,
        } = state
        {
            if let Some(label) = &self.current_label {
                self.history.versions.assign(commit, label.clone());
            }
        }
    }

    fn file_changed<F>(&mut self, path: &str, line: &str, correlate: &mut F)
    where
        F: FnMut(&CommitId) -> Option<VersionLabel>,
    {
        let ParseState::InCommit { commit, changed } = &mut self.state else {
            debug!("File change before any commit: {:?}", line);
            self.history.skipped_lines += 1;
            return;
        };

        if path == self.tracked.as_str() {
            if let Some(label) = correlate(commit) {
                self.history.versions.assign(commit.clone(), label.clone());
                self.current_label = Some(label);
                *changed = true;
            }
        } else {
            self.history.files.touch(FilePath::from(path), commit);
        }
    }
}

/// Parse a whole log in one go
pub fn parse_history<I, S, F>(tracked: &FilePath, lines: I, mut correlate: F) -> History
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&CommitId) -> Option<VersionLabel>,
{
    let mut parser = HistoryParser::new(tracked);
    for line in lines {
        parser.feed(line.as_ref(), &mut correlate);
    }
    parser.finish()
}
