// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use halcyon::history::ScanConfig;
use halcyon::model::FilePath;
use halcyon::repository::{MemoryReader, boundary_line};

pub const TRACKED: &str = "version.txt";

/// Synthetic log: `num_commits` commits, every `bump_every`-th changes the version,
/// the rest touch three of `num_files` files
pub fn generate_log(num_commits: usize, num_files: usize, bump_every: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(num_commits * 4);
    for i in (0..num_commits).rev() {
        lines.push(boundary_line(&commit_id(i)));
        if i % bump_every == 0 {
            lines.push(format!(" {} | 2 +-", TRACKED));
        } else {
            for j in 0..3 {
                let file = (i * 7 + j * 13) % num_files;
                lines.push(format!(" {} | 4 ++--", file_path(file)));
            }
        }
        lines.push(String::new());
    }
    lines
}

/// Reader holding the tracked file at every bump and each touched file's content
pub fn generate_reader(log: &[String]) -> MemoryReader {
    let mut reader = MemoryReader::new();
    let mut commit = String::new();
    for line in log {
        if let Some(id) = line.strip_prefix('\u{11}').and_then(|l| l.strip_suffix('\u{12}')) {
            commit = id.to_string();
        } else if let Some((path, _)) = line.rsplit_once('|') {
            let path = path.trim();
            let content = if path == TRACKED {
                format!("VERSION = \"{}\"\n", commit)
            } else {
                format!("// {} at {}\n", path, commit)
            };
            reader.insert(&commit, path, content);
        }
    }
    reader
}

pub fn commit_id(i: usize) -> String {
    format!("{:040x}", i)
}

pub fn file_path(i: usize) -> String {
    format!("assets/dir_{}/file_{}.js", i % 20, i)
}

pub fn config(top: usize) -> ScanConfig {
    ScanConfig {
        project: "bench".to_string(),
        tracked_file: FilePath::from(TRACKED),
        pattern: r#"^VERSION = "([^"]+)"$"#.to_string(),
        omit: vec!["dir_3/".to_string()],
        top,
    }
}
