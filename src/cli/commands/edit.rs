//! Edit command implementation.

use crate::cli::EditArgs;
use crate::cli::commands::RefContext;
use crate::config::Config;
use crate::error::Result;
use crate::store::FsStore;
use std::collections::BTreeSet;
use tracing::info;

/// Edit an issue's description and tags.
///
/// Only actual changes trigger a save (and with it a change-log
/// entry); otherwise the command reports that nothing happened.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or the save
/// fails.
pub fn execute(args: &EditArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let id = refs.resolve(store, &args.id, false)?;
    let mut issue = store.load_issue(&id)?;

    let add: BTreeSet<String> = args.add_tags.iter().cloned().collect();
    let remove: BTreeSet<String> = args.remove_tags.iter().cloned().collect();

    let mut changed = false;
    if let Some(description) = &args.description {
        changed |= issue.set_description(description);
    }
    changed |= issue.add_tags(&add);
    changed |= issue.remove_tags(&remove);

    if changed {
        store.save_issue(&mut issue)?;
        info!(id = %issue.id, "Edited issue");
        println!("Issue edited");
    } else {
        println!("Nothing to update");
    }
    Ok(())
}
