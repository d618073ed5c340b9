//! Reopen command implementation.

use crate::cli::ReopenArgs;
use crate::cli::commands::status::change_status;
use crate::config::Config;
use crate::error::Result;
use crate::model::Status;
use crate::store::FsStore;

/// Reopen a closed issue.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or the save
/// fails.
pub fn execute(args: &ReopenArgs, config: &Config, store: &FsStore) -> Result<()> {
    change_status(
        config,
        store,
        &args.id,
        Status::Open,
        "open",
        "reopened",
        None,
    )
}
