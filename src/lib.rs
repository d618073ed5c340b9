//! `ishu` - File-per-record issue tracker library
//!
//! This crate provides the core functionality for the `ishu` CLI tool,
//! a personal issue tracker that stores every record as its own JSON
//! document on the filesystem.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Issue, IssueId, Status, Comment, LogEntry)
//! - [`store`] - Filesystem record store (one file per issue/comment)
//! - [`tags`] - Tag registry and reconciliation operations
//! - [`config`] - User configuration and root discovery
//! - [`error`] - Error types and handling
//! - [`util`] - Utility functions (ID resolution, timestamps)

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod tags;
pub mod util;

pub use error::{IshuError, Result};
