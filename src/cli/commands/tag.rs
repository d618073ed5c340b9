//! Tag command implementation.
//!
//! Registry listing and mutation. Removal and rename can touch every
//! issue using a tag, so they confirm on stdin first; `--yes` answers
//! every prompt for scripted use.

use crate::cli::TagArgs;
use crate::cli::table;
use crate::config::Config;
use crate::error::Result;
use crate::store::FsStore;
use crate::tags::{self, AssumeYes, Confirm, TagRegistry};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Confirmation over stdin: `y`/`yes` (case-insensitive) accepts.
struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Execute the tag command. With no mode flags, lists tags.
///
/// # Errors
///
/// Returns an error for invalid rename arguments or failed writes.
pub fn execute(args: &TagArgs, _config: &Config, store: &FsStore) -> Result<()> {
    let mut registry = TagRegistry::load(store)?;
    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsoleConfirm)
    };

    if !args.add.is_empty() {
        let names: BTreeSet<String> = args.add.iter().cloned().collect();
        let report = tags::add_tags(store, &mut registry, &names)?;
        if !report.skipped.is_empty() {
            println!(
                "Existing tags that weren't added: {}",
                report.skipped.join(", ")
            );
        }
        if !report.added.is_empty() {
            println!("Added tags: {}", report.added.join(", "));
        }
        return Ok(());
    }

    if !args.remove.is_empty() {
        let names: BTreeSet<String> = args.remove.iter().cloned().collect();
        let mut issues = store.load_all_issues(None)?;
        let report = tags::remove_tags(store, &mut registry, &mut issues, &names, &mut *confirm)?;
        if !report.unknown.is_empty() {
            println!(
                "Unknown tags that weren't removed: {}",
                report.unknown.join(", ")
            );
        }
        if report.aborted {
            println!("Aborted tag removal, nothing was changed.");
        } else if !report.removed.is_empty() {
            println!(
                "Tags removed, {} issues were modified.",
                report.modified_issues
            );
        }
        return Ok(());
    }

    if let Some(pair) = &args.edit {
        let (old, new) = (&pair[0], &pair[1]);
        let mut issues = store.load_all_issues(None)?;
        let report = tags::rename_tag(store, &mut registry, &mut issues, old, new, &mut *confirm)?;
        if report.aborted {
            println!("Aborted tag edit, nothing was changed.");
        } else {
            println!("Tag '{old}' renamed to '{new}'.");
            if report.modified_issues > 0 {
                println!("{} issues were modified.", report.modified_issues);
            }
        }
        return Ok(());
    }

    // Default: list.
    let issues = store.load_all_issues(None)?;
    let rows_data = tags::list_tags(&registry, &issues, args.usage);
    let unregistered = rows_data.iter().filter(|r| !r.registered).count();
    let rows: Vec<Vec<String>> = rows_data
        .into_iter()
        .map(|r| {
            let marker = if r.registered { "" } else { " (unregistered)" };
            vec![format!("{}{marker}", r.name), r.count.to_string()]
        })
        .collect();
    if !rows.is_empty() {
        for line in table::render(Some(&["Tag name", "Use count"]), &rows) {
            println!("{line}");
        }
    }
    if unregistered > 0 {
        println!();
        println!("{unregistered} unregistered tags!");
    }
    Ok(())
}
