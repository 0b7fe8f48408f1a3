mod format;
mod path;

pub use format::short_commit;
pub use path::{base_name, repo_dir_name};
