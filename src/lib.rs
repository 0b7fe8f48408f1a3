// Library crate exposing modules for the binary and integration tests

pub mod history;
pub mod model;
pub mod output;
pub mod repository;
pub mod util;
