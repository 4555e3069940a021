//! Directory walk that applies the ABSPATH ordering rule to PHP files.
//!
//! The walk is lazy and single-threaded: each candidate is read and judged
//! before the next directory entry is requested. Unreadable candidates
//! (permissions, non-UTF-8 content, files vanishing mid-walk) are skipped
//! without aborting the scan.

use crate::core::config::ScanConfig;
use crate::core::error::GuardError;
use crate::core::rule::{self, Evaluation};
use crate::core::trace::trace;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file whose guard check precedes its first import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    /// Character offset of the guard check.
    pub guard_offset: usize,
    /// Character offset of the first `use` match.
    pub first_use_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Could not be read as UTF-8 text.
    Skipped(PathBuf),
    Inapplicable(PathBuf),
    Clean(PathBuf),
    Flagged(Finding),
}

impl FileOutcome {
    pub fn into_finding(self) -> Option<Finding> {
        match self {
            FileOutcome::Flagged(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    #[serde(serialize_with = "lossy_path")]
    pub root: PathBuf,
    /// Candidate files visited, including skipped ones.
    pub candidates: usize,
    pub skipped: usize,
    /// Flagged files in walk order.
    pub flagged: Vec<Finding>,
}

/// Paths are reported as text even when the name is not valid UTF-8.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Fail fast when the root cannot be walked at all. Errors below the
    /// root are tolerated by the walk itself.
    pub fn ensure_root(&self) -> Result<(), GuardError> {
        if self.config.root.is_dir() {
            Ok(())
        } else {
            Err(GuardError::RootNotFound(self.config.root.clone()))
        }
    }

    /// Lazily judge every candidate under the root.
    pub fn outcomes(&self) -> impl Iterator<Item = FileOutcome> + use<> {
        judge_all(self.config.clone())
    }

    /// Lazily yield flagged files only.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + use<> {
        self.outcomes().filter_map(FileOutcome::into_finding)
    }

    /// Drain the walk, calling `on_finding` for each flagged file as it is
    /// encountered. An error from `on_finding` stops the walk.
    pub fn run(
        &self,
        mut on_finding: impl FnMut(&Finding) -> Result<(), GuardError>,
    ) -> Result<ScanSummary, GuardError> {
        self.ensure_root()?;
        let mut summary = ScanSummary {
            root: self.config.root.clone(),
            ..ScanSummary::default()
        };
        for outcome in self.outcomes() {
            summary.candidates += 1;
            match outcome {
                FileOutcome::Skipped(_) => summary.skipped += 1,
                FileOutcome::Flagged(finding) => {
                    on_finding(&finding)?;
                    summary.flagged.push(finding);
                }
                FileOutcome::Inapplicable(_) | FileOutcome::Clean(_) => {}
            }
        }
        trace(format!(
            "scan {} candidates={} skipped={} flagged={}",
            summary.root.display(),
            summary.candidates,
            summary.skipped,
            summary.flagged.len()
        ));
        Ok(summary)
    }

    pub fn summarize(&self) -> Result<ScanSummary, GuardError> {
        self.run(|_| Ok(()))
    }
}

/// Flagged paths under `root` using the default candidate filter.
pub fn scan(root: impl Into<PathBuf>) -> Result<impl Iterator<Item = PathBuf>, GuardError> {
    let scanner = Scanner::new(ScanConfig {
        root: root.into(),
        ..ScanConfig::default()
    });
    scanner.ensure_root()?;
    Ok(scanner.findings().map(|f| f.path))
}

fn judge_all(config: ScanConfig) -> impl Iterator<Item = FileOutcome> {
    walk(&config.root)
        .filter(move |path| {
            path.file_name()
                .is_some_and(|n| config.is_candidate(&n.to_string_lossy()))
        })
        .map(inspect)
}

/// Every non-directory entry under `root`, sorted by name within each
/// directory. Symlinks are reported but not followed.
fn walk(root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                trace(format!("walk error: {err}"));
                None
            }
        })
        .filter(|e| !e.file_type().is_dir())
        .map(|e| e.into_path())
}

/// Read one candidate and apply the rule.
pub fn inspect(path: PathBuf) -> FileOutcome {
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(err) => {
            trace(format!("skip {}: {err}", path.display()));
            return FileOutcome::Skipped(path);
        }
    };
    let content = rule::normalize_newlines(&content);
    match rule::evaluate(&content) {
        Evaluation::Inapplicable => FileOutcome::Inapplicable(path),
        Evaluation::Verdict {
            violation: false, ..
        } => FileOutcome::Clean(path),
        Evaluation::Verdict {
            violation: true,
            guard_offset,
            first_use_offset,
        } => FileOutcome::Flagged(Finding {
            path,
            guard_offset: rule::char_offset(&content, guard_offset),
            first_use_offset: rule::char_offset(&content, first_use_offset),
        }),
    }
}
