//! CLI struct definitions for the abspath-guard command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "abspath-guard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flags PHP files whose ABSPATH guard check sits above their first `use` import."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One flagged path per line.
    #[default]
    Text,
    /// A single JSON document with counts and findings.
    Json,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ScanCli {
    /// Directory to scan (overrides the config file; defaults to `src`).
    pub root: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Config file (defaults to `abspath-guard.toml` in the working directory, if present).
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Base file name to exclude; repeatable. Replaces the configured list.
    #[clap(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,
    /// Exit with status 1 when any file is flagged.
    #[clap(long)]
    pub fail_on_violation: bool,
    /// Print a summary line to stderr.
    #[clap(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct DebugCli {
    /// Read the sample from a file instead of the built-in header.
    #[clap(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Walk a directory and print files whose ABSPATH guard precedes their imports
    Scan(ScanCli),
    /// Show the raw pattern matches for one sample
    Debug(DebugCli),
    /// Print version
    Version,
}
