//! Command-line argument definitions for the Patchboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, watch mode, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Patchboard sketch compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the canvas snapshot export (JSON)
    #[arg(help = "Path to the snapshot export")]
    pub input: String,

    /// Path to the output program file
    #[arg(short, long, default_value = "patch.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Recompile every time Enter is pressed, until EOF
    #[arg(short, long)]
    pub watch: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
