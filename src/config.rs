//! Configuration module.
//!
//! This module defines the command-line interface (CLI) using `clap`.

use clap::Parser;
use std::path::PathBuf;

/// Convert a Z8000 x.out executable to a flat binary image.
///
/// Initialized segments (code, constants, data) are copied from the file in
/// segment-table order and BSS segments are zero-filled. Stack segments are
/// skipped.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Input x.out file
    pub input: PathBuf,

    /// Output flat binary
    pub output: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,

    /// Print the decoded header and segment table to stdout
    #[arg(long)]
    pub dump: bool,
}
