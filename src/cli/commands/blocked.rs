//! Blocked command implementation.

use crate::cli::EdgeArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::model::BlockChange;
use crate::store::FsStore;
use tracing::info;

/// Mark an issue as blocked by another issue.
///
/// The blocked side must be one of the acting user's own issues, so
/// its reference is digits only. Only the direct two-issue cycle is
/// rejected.
///
/// # Errors
///
/// Returns an error for unresolvable references, self-blocks, blocking
/// loops, or save failures.
pub fn execute(args: &EdgeArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let blocked_id = refs.resolve(store, &args.blocked_id, true)?;
    let blocking_id = refs.resolve(store, &args.blocking_id, false)?;

    let mut issue = store.load_issue(&blocked_id)?;
    let blocking = store.load_issue(&blocking_id)?;

    let s_blocked = format!("#{}", refs.shorten(&blocked_id));
    let s_blocking = format!("#{}", refs.shorten(&blocking_id));

    match issue.add_blocked_by(&blocking)? {
        BlockChange::AlreadyBlocked => {
            println!(
                "Issue {s_blocked} is already blocked by {s_blocking}, no changes were made."
            );
        }
        BlockChange::Added => {
            store.save_issue(&mut issue)?;
            info!(blocked = %blocked_id, blocking = %blocking_id, "Added blocking edge");
            println!("Issue {s_blocked} marked as blocked by {s_blocking}.");
        }
    }
    Ok(())
}
