//! Writing signature documents to disk

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crate::model::SignatureDocument;

/// Serialization of a signature document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Destination for finished documents
pub trait SignatureSink {
    /// Persist one document and return where it went
    fn write(&self, doc: &SignatureDocument) -> Result<PathBuf>;
}

/// Writes each document to its own file in a directory
pub struct DirSink {
    dir: PathBuf,
    format: OutputFormat,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }
}

impl SignatureSink for DirSink {
    fn write(&self, doc: &SignatureDocument) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;
        let path = self.dir.join(document_file_name(doc, self.format));
        let body = render(doc, self.format)?;
        fs::write(&path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// `<project>-<base name of checked file>`, plus `.json` for JSON output
pub fn document_file_name(doc: &SignatureDocument, format: OutputFormat) -> String {
    let name = format!("{}-{}", doc.project, doc.check_file.file_name());
    match format {
        OutputFormat::Yaml => name,
        OutputFormat::Json => format!("{}.json", name),
    }
}

pub fn render(doc: &SignatureDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(render_yaml(doc)),
        OutputFormat::Json => {
            let mut body = serde_json::to_string_pretty(doc)
                .context("Failed to serialize signature document")?;
            body.push('\n');
            Ok(body)
        }
    }
}

/// YAML layout read by fingerprint consumers:
///
/// ```text
/// ---
/// config:
///   app_name: wordpress
///   check_file: wp-includes/js/wp-emoji.js
/// sigs:
///   4.9.1-commitid-0a1b...: 5d41402abc4b2a76b9719d911017c592
/// ```
pub fn render_yaml(doc: &SignatureDocument) -> String {
    let mut out = String::new();
    out.push_str("---\nconfig:\n");
    let _ = writeln!(out, "  app_name: {}", yaml_scalar(&doc.project));
    let _ = writeln!(out, "  check_file: {}", yaml_scalar(doc.check_file.as_str()));
    out.push_str("sigs:\n");
    for entry in doc.entries() {
        let _ = writeln!(
            out,
            "  {}: {}",
            yaml_scalar(entry.label.as_str()),
            entry.hash
        );
    }
    out
}

/// Plain scalar when unambiguous, single-quoted otherwise
fn yaml_scalar(value: &str) -> String {
    let plain = !value.is_empty()
        && !value.starts_with(['-', '.', '@', '~'])
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '+' | '@' | '~'));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}
