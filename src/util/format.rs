/// Abbreviate a commit id for log output (first 8 characters)
pub fn short_commit(commit: &str) -> &str {
    match commit.char_indices().nth(8) {
        Some((idx, _)) => &commit[..idx],
        None => commit,
    }
}
