//! ABSPATH ordering rule.
//!
//! A text-pattern heuristic, not a PHP parser. A file violates the convention
//! when its first `defined('ABSPATH')` check appears before its first `use`
//! import line. Files that lack either construct are out of scope for the
//! rule and produce no verdict.
//!
//! `use` lines inside comments or string literals still count as imports,
//! and only the first occurrence of each pattern is compared.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Line-anchored `use` import. `\s*` may cross blank lines, so a match can
/// start on an empty line above the keyword.
static USE_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*use\s+[\w\\]+").unwrap());

/// `defined('ABSPATH')` anywhere in the text; either quote on either side.
static ABSPATH_GUARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"defined\(\s*['"]ABSPATH['"]\s*\)"#).unwrap());

/// First guard-check match in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardMatch {
    /// Byte offset of the start of `defined(`.
    pub offset: usize,
    /// Matched substring, e.g. `defined('ABSPATH')`.
    pub text: String,
}

/// Raw pattern results for one text, before any verdict is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probe {
    /// Byte offsets of every `use` line, top to bottom.
    pub use_offsets: Vec<usize>,
    pub guard: Option<GuardMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The text lacks a `use` line or a guard check.
    Inapplicable,
    Verdict {
        violation: bool,
        guard_offset: usize,
        first_use_offset: usize,
    },
}

impl Evaluation {
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            Evaluation::Verdict {
                violation: true,
                ..
            }
        )
    }
}

impl Probe {
    pub fn first_use(&self) -> Option<usize> {
        self.use_offsets.first().copied()
    }

    pub fn guard_offset(&self) -> Option<usize> {
        self.guard.as_ref().map(|g| g.offset)
    }

    /// Compare the first guard against the first import. Equal offsets are
    /// not a violation.
    pub fn evaluate(&self) -> Evaluation {
        match (self.guard_offset(), self.first_use()) {
            (Some(guard_offset), Some(first_use_offset)) => Evaluation::Verdict {
                violation: guard_offset < first_use_offset,
                guard_offset,
                first_use_offset,
            },
            _ => Evaluation::Inapplicable,
        }
    }
}

/// Run both patterns over `text`.
pub fn probe(text: &str) -> Probe {
    let use_offsets = USE_STATEMENT.find_iter(text).map(|m| m.start()).collect();
    let guard = ABSPATH_GUARD.find(text).map(|m| GuardMatch {
        offset: m.start(),
        text: m.as_str().to_string(),
    });
    Probe { use_offsets, guard }
}

pub fn evaluate(text: &str) -> Evaluation {
    probe(text).evaluate()
}

/// Fold `\r\n` and lone `\r` line endings into `\n`, the way a text-mode
/// read does. `(?m)^` only anchors after `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Convert a byte offset into `text` to a character offset.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text.get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte_offset)
}
