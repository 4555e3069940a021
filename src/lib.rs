//! abspath-guard: a heuristic lint for PHP import ordering.
//!
//! WordPress-style PHP files often open with a direct-access guard:
//!
//! ```php
//! if (!defined('ABSPATH')) { return; }
//! ```
//!
//! PHP requires `use` imports to come before other statements in a
//! namespace body, so a guard placed above the imports is a convention
//! violation. This crate flags such files with two regexes and a position
//! comparison. It does not parse PHP.
//!
//! # Crate Structure
//!
//! - [`core::rule`]: the pure detection rule
//! - [`core::walker`]: lazy directory walk applying the rule
//! - [`core::harness`]: diagnostic view of one text sample
//! - [`core::config`]: scan root and candidate filter
//!
//! # Examples
//!
//! ```bash
//! # Scan ./src and print offending paths
//! abspath-guard scan
//!
//! # Scan another tree, failing CI on findings
//! abspath-guard scan wp-content/plugins/starmus --fail-on-violation
//!
//! # Inspect what the patterns match in one file
//! abspath-guard debug --file src/admin/Handler.php
//! ```

mod cli;
pub mod core;

pub use cli::OutputFormat;
use crate::cli::{Cli, Command, DebugCli, ScanCli};
use crate::core::{config, error, harness, output, rule, trace::trace, walker::Scanner};

use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

pub fn run() -> Result<ExitCode, error::GuardError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(scan_cli) => run_scan(scan_cli),
        Command::Debug(debug_cli) => {
            run_debug(debug_cli)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_scan(args: ScanCli) -> Result<ExitCode, error::GuardError> {
    let current_dir = std::env::current_dir()?;
    let mut scan_config = config::load_config(&current_dir, args.config.as_deref())?;
    if let Some(root) = args.root {
        scan_config.root = root;
    }
    if !args.exclude.is_empty() {
        scan_config.exclude = args.exclude;
    }
    trace(format!(
        "config root={} suffix={} exclude={:?}",
        scan_config.root.display(),
        scan_config.suffix,
        scan_config.exclude
    ));

    let scanner = Scanner::new(scan_config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match args.format {
        OutputFormat::Text => {
            scanner.run(|finding| {
                writeln!(out, "{}", output::path_line(finding))?;
                Ok(())
            })?
        }
        OutputFormat::Json => {
            let summary = scanner.summarize()?;
            writeln!(out, "{}", output::render_json(&summary)?)?;
            summary
        }
    };
    out.flush()?;

    if args.verbose {
        eprintln!("{}", output::summary_line(&summary));
    }

    if args.fail_on_violation && !summary.flagged.is_empty() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_debug(args: DebugCli) -> Result<(), error::GuardError> {
    let sample = match &args.file {
        Some(path) => rule::normalize_newlines(&fs::read_to_string(path)?).into_owned(),
        None => harness::DEFAULT_SAMPLE.to_string(),
    };
    if let Some(path) = &args.file {
        trace(format!("debug sample {}", path.display()));
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    harness::run_harness(&sample, &mut out)?;
    Ok(())
}
