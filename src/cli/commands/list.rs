//! List command implementation.

use crate::cli::ListArgs;
use crate::cli::table;
use crate::config::Config;
use crate::error::{IshuError, Result};
use crate::model::{Issue, StatusFilter, blocking_ids};
use crate::store::FsStore;
use std::collections::BTreeSet;

/// List issues matching the given filters.
///
/// # Errors
///
/// Returns an error for an invalid status filter or conflicting flags.
pub fn execute(args: &ListArgs, _config: &Config, store: &FsStore) -> Result<()> {
    if args.no_blocks && (args.blocked || args.blocking) {
        return Err(IshuError::validation(
            "filters",
            "--blocked or --blocking can't be used with --no-blocks",
        ));
    }
    let status: Option<StatusFilter> = args.status.as_deref().map(str::parse).transpose()?;
    let tags: BTreeSet<&str> = args.tags.iter().map(String::as_str).collect();
    let without_tags: BTreeSet<&str> = args.without_tags.iter().map(String::as_str).collect();

    let all = store.load_all_issues(None)?;
    let blocking = blocking_ids(&all);

    let mut rows = Vec::new();
    for issue in &all {
        if !matches_filters(issue, status, &tags, &without_tags) {
            continue;
        }
        let is_blocking = blocking.contains(&issue.id);
        if args.blocking && !is_blocking {
            continue;
        }
        if args.blocked && issue.blocked_by.is_empty() {
            continue;
        }
        if args.no_blocks && (is_blocking || !issue.blocked_by.is_empty()) {
            continue;
        }

        let date_fmt = "%Y-%m-%d %H:%M";
        let mut blocks = String::new();
        if !issue.blocked_by.is_empty() {
            blocks.push('b');
        }
        if is_blocking {
            blocks.push('B');
        }
        rows.push(vec![
            issue.id.num.to_string(),
            issue.id.user.clone(),
            capitalize(issue.status.as_str()),
            blocks,
            issue.created.format(date_fmt).to_string(),
            if issue.updated > issue.created {
                issue.updated.format(date_fmt).to_string()
            } else {
                String::new()
            },
            issue.comments.len().to_string(),
            issue.description.clone(),
        ]);
    }

    let titles = [
        "ID", "User", "Status", "Blocks", "Created", "Updated", "Comments", "Description",
    ];
    for line in table::render(Some(&titles), &rows) {
        println!("{line}");
    }
    Ok(())
}

fn matches_filters(
    issue: &Issue,
    status: Option<StatusFilter>,
    tags: &BTreeSet<&str>,
    without_tags: &BTreeSet<&str>,
) -> bool {
    if let Some(filter) = status {
        if !filter.matches(issue.status) {
            return false;
        }
    }
    // All requested tags must be present...
    if !tags.iter().all(|t| issue.tags.contains(*t)) {
        return false;
    }
    // ...and none of the excluded ones.
    if without_tags.iter().any(|t| issue.tags.contains(*t)) {
        return false;
    }
    true
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
