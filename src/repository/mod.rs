mod clone;
mod log_source;
mod reader;

pub use clone::{clone_or_update, update};
pub use log_source::{COMMIT_END, COMMIT_START, Git2LogSource, LogFileSource, LogSource, boundary_line};
pub use reader::{ContentReader, GitContentReader, MemoryReader};
