//! Unblock command implementation.

use crate::cli::EdgeArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::model::UnblockChange;
use crate::store::FsStore;
use tracing::info;

/// Remove a blocking edge between two issues.
///
/// # Errors
///
/// Returns an error for unresolvable references, self-references, or
/// save failures.
pub fn execute(args: &EdgeArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let blocked_id = refs.resolve(store, &args.blocked_id, true)?;
    let blocking_id = refs.resolve(store, &args.blocking_id, false)?;

    let mut issue = store.load_issue(&blocked_id)?;
    let s_blocked = format!("#{}", refs.shorten(&blocked_id));
    let s_blocking = format!("#{}", refs.shorten(&blocking_id));

    match issue.remove_blocked_by(&blocking_id)? {
        UnblockChange::NotBlocked => {
            println!("Issue {s_blocked} is not blocked by {s_blocking}, no changes were made.");
        }
        UnblockChange::Removed => {
            store.save_issue(&mut issue)?;
            info!(blocked = %blocked_id, blocking = %blocking_id, "Removed blocking edge");
            println!("Issue {s_blocked} no longer marked as blocked by {s_blocking}.");
        }
    }
    Ok(())
}
