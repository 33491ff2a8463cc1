//! Command-line argument definitions for the Landskape CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Besides input/output paths, configuration file selection
//! and logging verbosity, it carries the diagram request parameters. The
//! list-valued filters take comma-separated system ids or connection types.

use clap::Parser;

/// Command-line arguments for the Landskape diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the landscape dataset (TOML)
    #[arg(help = "Path to the landscape dataset file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Only connections leaving these systems
    #[arg(long, default_value = "")]
    pub from: String,

    /// Only connections entering these systems
    #[arg(long, default_value = "")]
    pub to: String,

    /// Only connections of these types
    #[arg(long = "type", default_value = "")]
    pub types: String,

    /// Only connections touching these systems
    #[arg(long, default_value = "")]
    pub center: String,

    /// System attribute to group nodes by
    #[arg(long, default_value = "")]
    pub cluster: String,

    /// Output format (`dot` for the description, otherwise a renderer format)
    #[arg(short, long, default_value = "")]
    pub format: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
