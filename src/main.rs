use anyhow::Context;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match abspath_guard::run().context("abspath-guard failed") {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
