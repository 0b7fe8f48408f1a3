use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use halcyon::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "halcyon",
    about = "Build per-file version signatures from a git repository's history"
)]
pub struct Cli {
    /// Path to the repository, or its URL together with --clone
    #[arg(short = 'u', short_alias = 'p', long = "url", visible_alias = "path")]
    pub url: String,

    /// Clone the repository first (or update an existing clone)
    #[arg(short, long)]
    pub clone: bool,

    /// Directory clones are placed in
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// File whose content carries the version string
    #[arg(short, long)]
    pub file: String,

    /// Regex matching the version line; capture groups form the version
    /// (e.g. ^\$wp_version = '([^']+)';$)
    #[arg(short = 'm', long = "match")]
    pub pattern: String,

    /// Comma separated list of directories to omit
    #[arg(long, default_value = "")]
    pub omit_directory: String,

    /// Number of most-changed files to sign (0 for unlimited)
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Directory signature files are written to
    #[arg(short, long, default_value = "sigs")]
    pub output: PathBuf,

    /// Signature file format
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Parse a recorded `git log --stat --stat-width=10000 --format=%x11%H%x12`
    /// dump instead of walking the repository
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print per-phase timing
    #[arg(long)]
    pub profile: bool,

    /// Hide progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Yaml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => OutputFormat::Yaml,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Path fragments from `--omit-directory`
    pub fn omit_fragments(&self) -> Vec<String> {
        self.omit_directory
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}
