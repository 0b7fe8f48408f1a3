/// Final `/`-separated component of a repository path.
///
/// Trailing slashes are ignored, so `"a/b/"` yields `"b"`.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => name,
        None => trimmed,
    }
}

/// Directory name a clone of `url` lands in: last URL segment, extension stripped.
pub fn repo_dir_name(url: &str) -> &str {
    let name = base_name(url);
    let name = name.rsplit_once(':').map_or(name, |(_, tail)| tail);
    match name.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
