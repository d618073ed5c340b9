//! Log command implementation.
//!
//! Prints an issue's change log: one block per save that altered a
//! loggable field, showing the values each field had *before* that
//! save.

use crate::cli::LogArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::store::FsStore;
use crate::util::time;

/// Show the change history of an issue.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or the issue
/// can't be loaded.
pub fn execute(args: &LogArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let id = refs.resolve(store, &args.id, false)?;
    let issue = store.load_issue(&id)?;

    if issue.log.is_empty() {
        println!("No changes logged for issue #{}", refs.shorten(&id));
        return Ok(());
    }

    for (n, entry) in issue.log.iter().enumerate() {
        if n > 0 {
            println!();
        }
        println!("{}", time::format_stamp(entry.timestamp));
        if let Some(description) = &entry.description {
            println!("  description: {description}");
        }
        if let Some(tags) = &entry.tags {
            println!("  tags: {}", tags.join(", "));
        }
        if let Some(blocked_by) = &entry.blocked_by {
            let edges: Vec<String> = blocked_by
                .iter()
                .map(|b| refs.shorten(&b.to_issue_id()))
                .collect();
            println!("  blocked by: {}", edges.join(", "));
        }
        if let Some(status) = entry.status {
            println!("  status: {status}");
        }
    }
    Ok(())
}
