//! Library side of the `strcleaner` binary.

pub mod cli;
pub mod config;
pub mod logging;
pub mod summary;
