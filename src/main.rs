mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use cli::Cli;
use halcyon::history::{ScanConfig, SignatureScanner};
use halcyon::model::FilePath;
use halcyon::output::{DirSink, SignatureSink};
use halcyon::repository::{
    Git2LogSource, GitContentReader, LogFileSource, LogSource, clone_or_update,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halcyon=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let repo_path = if cli.clone {
        clone_or_update(&cli.url, &cli.work_dir)?
    } else {
        PathBuf::from(&cli.url)
    };

    // Project name is the repository directory's name
    let abs_repo_path = fs::canonicalize(&repo_path)
        .with_context(|| format!("Could not resolve path: {}", repo_path.display()))?;
    let project = abs_repo_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("repo")
        .to_string();

    let config = ScanConfig {
        project,
        tracked_file: FilePath::from(cli.file.as_str()),
        pattern: cli.pattern.clone(),
        omit: cli.omit_fragments(),
        top: cli.top,
    };
    let scanner = if cli.profile {
        SignatureScanner::profiling(config)
    } else if cli.quiet {
        SignatureScanner::quiet(config)
    } else {
        SignatureScanner::new(config)
    };

    let reader = GitContentReader::open(&abs_repo_path)?;
    let source: Box<dyn LogSource> = match &cli.log_file {
        Some(path) => Box::new(LogFileSource::new(path)),
        None => Box::new(Git2LogSource::new(&abs_repo_path)),
    };

    let report = scanner.scan(source.as_ref(), &reader)?;

    if report.files_selected == 0 {
        warn!("No files selected; nothing to write");
        return Ok(());
    }

    let sink = DirSink::new(&cli.output, cli.format.into());
    let mut signed = 0;
    for doc in &report.documents {
        let path = sink.write(doc)?;
        if doc.is_empty() {
            warn!(
                "No signatures for {}, wrote {} with an empty sigs block",
                doc.check_file,
                path.display()
            );
        } else {
            info!("Wrote {} ({} versions)", path.display(), doc.len());
            signed += 1;
        }
    }

    info!(
        "Signed {} of {} files across {} versions ({} commits)",
        signed, report.files_touched, report.versions, report.commits
    );
    Ok(())
}
