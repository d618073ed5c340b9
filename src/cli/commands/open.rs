//! Open command implementation.

use crate::cli::OpenArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::model::{Issue, IssueId};
use crate::store::FsStore;
use crate::util::time;
use std::collections::BTreeSet;
use tracing::info;

/// Open a new issue in the acting user's namespace.
///
/// The issue gets the next unused number; numbers are never reused.
///
/// # Errors
///
/// Returns an error when a `--blocked-by` reference doesn't resolve or
/// the save fails.
pub fn execute(args: &OpenArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let mut blocked_by = BTreeSet::new();
    for token in &args.blocked_by {
        blocked_by.insert(refs.resolve(store, token, false)?);
    }
    let tags: BTreeSet<String> = args.tags.iter().cloned().collect();

    let num = store.next_issue_number(&config.user)?;
    let id = IssueId::new(config.user.clone(), num);
    let mut issue = Issue::new(id, args.description.clone(), tags, blocked_by, time::now());
    store.save_issue(&mut issue)?;

    info!(id = %issue.id, "Opened issue");
    println!("Issue #{num} opened");
    Ok(())
}
