//! Progress bars for the parsing and hashing passes

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt::Display;

/// Pass a bar tracks; each counts a different unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Log lines fed to the parser
    Parsing,
    /// Selected files, with the one being hashed as the message
    Hashing,
}

impl Pass {
    fn template(self) -> &'static str {
        match self {
            Pass::Parsing => {
                "{spinner:.green} Parsing log [{bar:40.cyan/blue}] {pos}/{len} lines ({per_sec})"
            }
            Pass::Hashing => "{spinner:.green} Hashing [{bar:40.cyan/blue}] {pos}/{len} files {wide_msg}",
        }
    }
}

/// One pass's bar. Hidden bars still count, they just never draw.
pub struct PassProgress(ProgressBar);

impl PassProgress {
    /// Drawn on stderr when `visible`, hidden otherwise
    pub fn start(pass: Pass, total: u64, visible: bool) -> Self {
        if !visible {
            return Self::hidden(total);
        }
        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(pass.template())
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self(pb)
    }

    pub fn hidden(total: u64) -> Self {
        let pb = ProgressBar::hidden();
        pb.set_length(total);
        Self(pb)
    }

    pub fn advance(&self) {
        self.0.inc(1);
    }

    pub fn set_current(&self, item: &impl Display) {
        self.0.set_message(item.to_string());
    }

    pub fn position(&self) -> u64 {
        self.0.position()
    }

    pub fn finish(&self) {
        self.0.finish_and_clear();
    }
}
