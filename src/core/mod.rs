//! Core modules for the ABSPATH ordering lint.
//!
//! The rule itself is pure text matching; everything that touches the
//! filesystem or the terminal sits on top of it.

pub mod config;
pub mod error;
pub mod harness;
pub mod output;
pub mod rule;
pub mod trace;
pub mod walker;
