//! Command-line front end for the simplified-scheme consumption tax return.

pub mod config_file;
pub mod input;
pub mod report;
