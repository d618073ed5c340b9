//! Shared utilities for `ishu`.
//!
//! Common functionality used across modules:
//! - Issue reference resolution and abbreviation
//! - Fixed-format timestamp parsing and formatting

pub mod id;
pub mod time;

pub use id::IdResolver;
pub use time::{format_stamp, now, parse_stamp, TIMESTAMP_FMT};
