//! Show command implementation.

use crate::cli::ShowArgs;
use crate::cli::commands::RefContext;
use crate::cli::table;
use crate::config::Config;
use crate::error::Result;
use crate::store::FsStore;

/// Show full info about one issue, including the derived "blocking"
/// relationships and all comments.
///
/// # Errors
///
/// Returns an error when the reference doesn't resolve or the issue
/// can't be loaded.
pub fn execute(args: &ShowArgs, config: &Config, store: &FsStore) -> Result<()> {
    let refs = RefContext::new(store, config)?;
    let id = refs.resolve(store, &args.id, false)?;
    let issue = store.load_issue(&id)?;

    // The inverse of blocked_by lives on other issues. A closed issue
    // blocks nothing, whatever edges still point at it.
    let mut blocking: Vec<String> = if issue.status.is_closed() {
        Vec::new()
    } else {
        store
            .load_all_issues(None)?
            .iter()
            .filter(|other| !other.status.is_closed() && other.blocked_by.contains(&issue.id))
            .map(|other| refs.shorten(&other.id))
            .collect()
    };
    blocking.sort();

    let blocked_by: Vec<String> = issue.blocked_by.iter().map(|b| refs.shorten(b)).collect();
    let tags: Vec<&str> = issue.tags.iter().map(String::as_str).collect();

    let rows = vec![
        vec!["ID".to_string(), issue.id.num.to_string()],
        vec!["User".to_string(), issue.id.user.clone()],
        vec!["Status".to_string(), issue.status.to_string()],
        vec![
            "Created".to_string(),
            issue.created.format("%Y-%m-%d").to_string(),
        ],
        vec![
            "Updated".to_string(),
            issue.updated.format("%Y-%m-%d").to_string(),
        ],
        vec!["Tags".to_string(), tags.join(", ")],
        vec!["Blocked by".to_string(), blocked_by.join(", ")],
        vec!["Blocking".to_string(), blocking.join(", ")],
        vec!["Description".to_string(), issue.description.clone()],
    ];
    for line in table::render(None, &rows) {
        println!("{line}");
    }

    if !issue.comments.is_empty() {
        println!("Comments:");
        for comment in &issue.comments {
            println!();
            println!("{comment}");
        }
    }
    Ok(())
}
