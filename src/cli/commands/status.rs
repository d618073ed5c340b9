//! Shared status-transition logic for reopen/fixed/wontfix.

use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::model::{Comment, Status};
use crate::store::FsStore;
use crate::util::time;
use tracing::info;

/// Move an issue to `target`, optionally attaching a comment.
///
/// Already being in the target state is a reported no-op: no save, no
/// comment.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or a save
/// fails.
pub fn change_status(
    config: &Config,
    store: &FsStore,
    token: &str,
    target: Status,
    already_text: &str,
    result_text: &str,
    comment: Option<&str>,
) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let id = refs.resolve(store, token, false)?;
    let mut issue = store.load_issue(&id)?;

    if !issue.set_status(target) {
        println!("Issue is already {already_text}");
        return Ok(());
    }
    store.save_issue(&mut issue)?;
    info!(id = %issue.id, status = %target, "Changed issue status");

    if let Some(message) = comment {
        store.save_comment(&Comment {
            issue_id: id.clone(),
            user: config.user.clone(),
            created: time::now(),
            message: message.to_string(),
        })?;
    }
    println!("Issue {} {result_text}", id.num);
    Ok(())
}
