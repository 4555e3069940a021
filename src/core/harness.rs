//! Debug harness: shows what the rule sees in a single text sample.
//!
//! Nothing here asserts; the report is for a developer checking the patterns
//! by eye.

use crate::core::rule::{self, Evaluation};
use std::io::{self, Write};

/// A plugin admin header with the guard placed above the imports.
///
/// Backslashes are literal PHP namespace separators, so reported offsets are
/// those of the real file text (`\admin` is two characters, not an escape).
pub const DEFAULT_SAMPLE: &str = r#"<?php

/**
 * Starmus Admin Handler - Refactored for Security & Performance
 *
 * @package Starisian\Sparxstar\Starmus\admin
 *
 * @version 0.9.2
 *
 * @since 0.3.1
 */
namespace Starisian\Sparxstar\Starmus\admin;

if (! \defined('ABSPATH')) {
    return;
}

use Starisian\Sparxstar\Starmus\core\StarmusSettings;
use Starisian\Sparxstar\Starmus\data\interfaces\IStarmusAudioDAL;
"#;

pub const DETECTED_LINE: &str = "DETECTED: ABSPATH check comes BEFORE use statements";
pub const OK_LINE: &str = "OK: ABSPATH matches comes after or equal";
pub const NOT_DETECTED_LINE: &str = "Not detected both patterns";

/// Render the diagnostic block for `sample`. Offsets are in characters.
pub fn report(sample: &str) -> Vec<String> {
    let probe = rule::probe(sample);
    let mut lines = Vec::new();

    lines.push(format!("Use statements found: {}", probe.use_offsets.len()));
    if let Some(first) = probe.first_use() {
        lines.push(format!(
            "First use at: {}",
            rule::char_offset(sample, first)
        ));
    }

    if let Some(guard) = &probe.guard {
        lines.push(format!(
            "ABSPATH check found at: {}",
            rule::char_offset(sample, guard.offset)
        ));
        lines.push(format!("Match: {}", guard.text));
    }

    let verdict = match probe.evaluate() {
        Evaluation::Verdict {
            violation: true, ..
        } => DETECTED_LINE,
        Evaluation::Verdict {
            violation: false, ..
        } => OK_LINE,
        Evaluation::Inapplicable => NOT_DETECTED_LINE,
    };
    lines.push(verdict.to_string());
    lines
}

pub fn run_harness(sample: &str, out: &mut impl Write) -> io::Result<()> {
    for line in report(sample) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
