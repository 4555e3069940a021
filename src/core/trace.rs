//! Opt-in diagnostic logging.
//!
//! Stdout carries the report, so trace lines always go to stderr and only
//! when `ABSPATH_GUARD_TRACE=1`.

use std::sync::LazyLock;

pub const TRACE_ENV: &str = "ABSPATH_GUARD_TRACE";

static ENABLED: LazyLock<bool> =
    LazyLock::new(|| std::env::var(TRACE_ENV).ok().as_deref() == Some("1"));

pub fn enabled() -> bool {
    *ENABLED
}

pub fn trace(message: impl AsRef<str>) {
    if enabled() {
        eprintln!("abspath-guard: trace {}", message.as_ref());
    }
}
