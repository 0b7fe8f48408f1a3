//! Version fingerprinting over commit history
//!
//! Turns a `--stat` history log into per-file signature documents.
//!
//! # Architecture
//!
//! - **parser**: two-state log parser (files, commits, version timeline)
//! - **correlator**: version pattern -> label for the tracked file
//! - **selector**: extension denylist, exclusion pattern, top-N cut
//! - **signer**: content hashes joined with labels
//! - **progress**: one indicatif bar per pass
//!
//! `SignatureScanner` below runs the phases in order.

mod correlator;
mod parser;
mod progress;
mod selector;
mod signer;

pub use correlator::{VersionCorrelator, VersionMatcher};
pub use parser::{HistoryParser, LogLine, parse_history};
pub use progress::{Pass, PassProgress};
pub use selector::{DENIED_EXTENSIONS, FileSelector, exclusion_pattern};
pub use signer::{SignStats, SignatureBuilder};

use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::model::{CommitId, FilePath, History, SignatureDocument};
use crate::repository::{ContentReader, LogSource};

/// Inputs of one fingerprinting run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Name recorded in every document
    pub project: String,
    /// File whose content carries the version string
    pub tracked_file: FilePath,
    /// Version pattern; capture groups form the label
    pub pattern: String,
    /// Path fragments to leave out
    pub omit: Vec<String>,
    /// Number of most-touched files to keep, 0 for all
    pub top: usize,
}

/// Result of a run
#[derive(Debug, Default)]
pub struct ScanReport {
    pub documents: Vec<SignatureDocument>,
    pub commits: usize,
    /// Commits that ended up with a label
    pub labeled_commits: usize,
    /// Distinct versions detected
    pub versions: usize,
    pub files_touched: usize,
    pub files_selected: usize,
    pub skipped_lines: usize,
    pub sign_stats: SignStats,
}

/// Runs parsing, correlation, selection and hashing
pub struct SignatureScanner {
    config: ScanConfig,
    verbose: bool,
    profile: bool,
}

impl SignatureScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            verbose: true,
            profile: false,
        }
    }

    /// No progress bars (tests, benchmarks, `--quiet`)
    pub fn quiet(config: ScanConfig) -> Self {
        Self {
            config,
            verbose: false,
            profile: false,
        }
    }

    /// Per-phase timing instead of progress bars
    pub fn profiling(config: ScanConfig) -> Self {
        Self {
            config,
            verbose: true,
            profile: true,
        }
    }

    pub fn scan<R: ContentReader>(&self, source: &dyn LogSource, reader: &R) -> Result<ScanReport> {
        let total_start = Instant::now();

        // Phase 1: Read the log
        self.log("Reading history log...");
        let phase_start = Instant::now();
        let lines = source.lines()?;
        self.profile_phase(&format!("Read log ({} lines)", lines.len()), phase_start);

        // Phase 2: Parse and correlate versions
        self.log(&format!("Detecting versions in {}...", self.config.tracked_file));
        let phase_start = Instant::now();
        let history = self.parse(&lines, reader);
        self.profile_phase(
            &format!(
                "Parse {} commits ({} labeled)",
                history.commits.len(),
                history.versions.len()
            ),
            phase_start,
        );
        let versions = history.versions.distinct_labels();
        self.log(&format!(
            "Found {} commits, {} versions, {} touched files",
            history.commits.len(),
            versions,
            history.files.len()
        ));
        if history.skipped_lines > 0 {
            debug!("Skipped {} unparseable log lines", history.skipped_lines);
        }

        // Phase 3: Select files
        let phase_start = Instant::now();
        let History {
            files,
            commits,
            versions: timeline,
            skipped_lines,
        } = history;
        let files_touched = files.len();
        let selector = FileSelector::new(&self.config.omit, self.config.top)?;
        let selected = selector.select(files);
        self.profile_phase(
            &format!("Select files ({} of {})", selected.len(), files_touched),
            phase_start,
        );
        for (path, touched_in) in selected.iter() {
            debug!("Selected {} ({} commits)", path, touched_in.len());
        }

        // Phase 4: Hash and sign
        self.log(&format!("Hashing {} files...", selected.len()));
        let phase_start = Instant::now();
        let builder = SignatureBuilder::new(&self.config.project, reader, &timeline);
        let pb = PassProgress::start(Pass::Hashing, selected.len() as u64, self.shows_bars());
        let (documents, sign_stats) = builder.build_all(&selected, &pb);
        pb.finish();
        self.profile_phase(
            &format!(
                "Hash {} revisions ({} absent, {} before first version)",
                sign_stats.hashed, sign_stats.absent, sign_stats.unlabeled
            ),
            phase_start,
        );

        if versions == 0 && !commits.is_empty() {
            warn!(
                "No version detected in {}; check the tracked file and match pattern",
                self.config.tracked_file
            );
        }

        if self.profile {
            info!("[PROFILE] TOTAL scanning time: {:?}", total_start.elapsed());
        }

        Ok(ScanReport {
            documents,
            commits: commits.len(),
            labeled_commits: timeline.len(),
            versions,
            files_touched,
            files_selected: selected.len(),
            skipped_lines,
            sign_stats,
        })
    }

    fn parse<R: ContentReader + ?Sized>(&self, lines: &[String], reader: &R) -> History {
        let matcher = VersionMatcher::new(&self.config.pattern);
        if matcher.is_valid() && matcher.capture_groups() == 0 {
            warn!("Version pattern has no capture groups; every change becomes its own version");
        }
        let correlator = VersionCorrelator::new(reader, &self.config.tracked_file, &matcher);
        let mut correlate = |commit: &CommitId| correlator.correlate(commit);

        let pb = PassProgress::start(Pass::Parsing, lines.len() as u64, self.shows_bars());
        let mut parser = HistoryParser::new(&self.config.tracked_file);
        for line in lines {
            parser.feed(line, &mut correlate);
            pb.advance();
        }
        pb.finish();
        parser.finish()
    }

    /// Profiling output would be garbled by redrawing bars
    fn shows_bars(&self) -> bool {
        self.verbose && !self.profile
    }

    fn log(&self, msg: &str) {
        if self.verbose {
            info!("{}", msg);
        }
    }

    fn profile_phase(&self, name: &str, start: Instant) {
        if self.profile {
            info!("[PROFILE] {}: {:?}", name, start.elapsed());
        }
    }
}
