//! Comment command implementation.

use crate::cli::CommentArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::model::Comment;
use crate::store::FsStore;
use crate::util::time;
use tracing::info;

/// Add a comment to an issue. Comments are immutable once created.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or the write
/// fails.
pub fn execute(args: &CommentArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let id = refs.resolve(store, &args.id, false)?;

    store.save_comment(&Comment {
        issue_id: id.clone(),
        user: config.user.clone(),
        created: time::now(),
        message: args.message.clone(),
    })?;
    info!(id = %id, "Added comment");
    println!("Comment added");
    Ok(())
}
