//! Wontfix command implementation.

use crate::cli::CloseArgs;
use crate::cli::commands::status::change_status;
use crate::config::Config;
use crate::error::Result;
use crate::model::Status;
use crate::store::FsStore;

/// Close an issue as not going to be fixed, optionally attaching a
/// comment.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or a save
/// fails.
pub fn execute(args: &CloseArgs, config: &Config, store: &FsStore) -> Result<()> {
    change_status(
        config,
        store,
        &args.id,
        Status::Wontfix,
        "marked as wontfix",
        "closed and marked as wontfix",
        args.comment.as_deref(),
    )
}
