//! Tag registry and reconciliation operations.
//!
//! The registry is a persisted set of "known" tag names, independent of
//! what issues actually use: an issue may carry an unregistered tag
//! (flagged, not rejected) and a registered tag may be unused.
//! Destructive operations that would touch issues prompt for
//! confirmation through the [`Confirm`] seam; declining aborts the
//! whole batch with zero side effects.

use crate::error::{IshuError, Result};
use crate::model::Issue;
use crate::store::FsStore;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tracing::{debug, info};

/// Confirmation seam for destructive batch operations.
///
/// The CLI implements this over stdin; tests substitute canned answers.
pub trait Confirm {
    /// Ask the user; `false` aborts the whole operation.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirmation that always answers yes (`--yes` flag, tests).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// The persisted set of registered tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: BTreeSet<String>,
}

impl TagRegistry {
    /// Load the registry; a missing file means an empty registry.
    ///
    /// # Errors
    ///
    /// Returns `Corrupt` when the file exists but isn't a JSON array of
    /// strings.
    pub fn load(store: &FsStore) -> Result<Self> {
        let path = store.registered_tags_path();
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let tags: BTreeSet<String> =
            serde_json::from_str(&contents).map_err(|e| IshuError::Corrupt {
                path,
                reason: e.to_string(),
            })?;
        Ok(Self { tags })
    }

    /// Persist the registry as a sorted JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn save(&self, store: &FsStore) -> Result<()> {
        let sorted: Vec<&String> = self.tags.iter().collect();
        fs::write(
            store.registered_tags_path(),
            serde_json::to_string_pretty(&sorted)?,
        )?;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// One row of the tag listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub name: String,
    pub count: usize,
    pub registered: bool,
}

/// Usage-counted listing of every tag, registered or not.
///
/// Default order is alphabetical; `sort_by_usage` orders by descending
/// count with alphabetical tie-breaks. Registered-but-unused tags show
/// up with a zero count; used-but-unregistered tags are flagged.
#[must_use]
pub fn list_tags(registry: &TagRegistry, issues: &[Issue], sort_by_usage: bool) -> Vec<TagUsage> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for issue in issues {
        for tag in &issue.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    for tag in registry.tags() {
        counts.entry(tag.as_str()).or_default();
    }
    let mut rows: Vec<TagUsage> = counts
        .into_iter()
        .map(|(name, count)| TagUsage {
            name: name.to_string(),
            count,
            registered: registry.contains(name),
        })
        .collect();
    // BTreeMap iteration already gives the alphabetical order.
    if sort_by_usage {
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    }
    rows
}

/// Result of registering a batch of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Newly registered names.
    pub added: Vec<String>,
    /// Names that were already registered.
    pub skipped: Vec<String>,
}

/// Register new tags; already-registered names are reported as skipped.
///
/// # Errors
///
/// Returns an error when persisting the registry fails.
pub fn add_tags(
    store: &FsStore,
    registry: &mut TagRegistry,
    names: &BTreeSet<String>,
) -> Result<AddReport> {
    let mut report = AddReport::default();
    for name in names {
        if registry.tags.insert(name.clone()) {
            report.added.push(name.clone());
        } else {
            report.skipped.push(name.clone());
        }
    }
    if !report.added.is_empty() {
        registry.save(store)?;
        info!(added = report.added.len(), "Registered tags");
    }
    Ok(report)
}

/// Result of a tag removal batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveReport {
    /// Names not present in the registry (nothing done for these).
    pub unknown: Vec<String>,
    /// Names removed from the registry.
    pub removed: Vec<String>,
    /// Issues re-saved because a removed tag was stripped from them.
    pub modified_issues: usize,
    /// The whole batch was declined; nothing was changed.
    pub aborted: bool,
}

/// Unregister tags, stripping them from every issue that uses them.
///
/// For each tag in use, the user is asked once; a single decline
/// aborts the entire batch before anything is written. On
/// confirmation every affected issue is re-saved (each gaining its own
/// change-log entry) and the registry is updated last.
///
/// # Errors
///
/// Returns an error when an issue or the registry cannot be saved.
pub fn remove_tags(
    store: &FsStore,
    registry: &mut TagRegistry,
    issues: &mut [Issue],
    names: &BTreeSet<String>,
    confirm: &mut dyn Confirm,
) -> Result<RemoveReport> {
    let mut report = RemoveReport::default();
    let matched: BTreeSet<String> = names.intersection(&registry.tags).cloned().collect();
    report.unknown = names.difference(&registry.tags).cloned().collect();
    if matched.is_empty() {
        return Ok(report);
    }

    // All prompts happen before any mutation so a decline is free.
    for tag in &matched {
        let used_by = issues.iter().filter(|i| i.tags.contains(tag)).count();
        if used_by > 0 {
            let prompt = format!(
                "Tag '{tag}' is used in {used_by} issue{}. Remove it from all of them?",
                if used_by == 1 { "" } else { "s" }
            );
            if !confirm.confirm(&prompt) {
                debug!(tag = %tag, "Tag removal declined, aborting batch");
                report.aborted = true;
                return Ok(report);
            }
        }
    }

    for issue in issues.iter_mut() {
        if issue.remove_tags(&matched) {
            store.save_issue(issue)?;
            report.modified_issues += 1;
        }
    }
    for tag in &matched {
        registry.tags.remove(tag);
    }
    registry.save(store)?;
    report.removed = matched.into_iter().collect();
    info!(
        removed = report.removed.len(),
        modified = report.modified_issues,
        "Removed tags"
    );
    Ok(report)
}

/// Result of a tag rename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Issues re-saved with the tag swapped.
    pub modified_issues: usize,
    /// The rename was declined; nothing was changed.
    pub aborted: bool,
}

/// Rename a registered tag, updating every issue that uses it.
///
/// Requires the same confirm-or-abort-entirely behavior as removal
/// when issues are affected.
///
/// # Errors
///
/// - `Validation` when old and new names are identical, `old` isn't
///   registered, or `new` already is
/// - Propagates issue/registry save failures
pub fn rename_tag(
    store: &FsStore,
    registry: &mut TagRegistry,
    issues: &mut [Issue],
    old: &str,
    new: &str,
    confirm: &mut dyn Confirm,
) -> Result<RenameReport> {
    if old == new {
        return Err(IshuError::validation(
            "tag",
            "old name and new name are identical",
        ));
    }
    if !registry.contains(old) {
        return Err(IshuError::validation("tag", format!("unknown tag: {old}")));
    }
    if registry.contains(new) {
        return Err(IshuError::validation(
            "tag",
            format!("new tag already exists: {new}"),
        ));
    }

    let mut report = RenameReport::default();
    let used_by = issues.iter().filter(|i| i.tags.contains(old)).count();
    if used_by > 0 {
        let prompt = format!(
            "Tag '{old}' is used in {used_by} issue{}. Rename it to '{new}' in all of them?",
            if used_by == 1 { "" } else { "s" }
        );
        if !confirm.confirm(&prompt) {
            debug!(old, new, "Tag rename declined");
            report.aborted = true;
            return Ok(report);
        }
        for issue in issues.iter_mut() {
            if issue.tags.remove(old) {
                issue.tags.insert(new.to_string());
                store.save_issue(issue)?;
                report.modified_issues += 1;
            }
        }
    }

    registry.tags.remove(old);
    registry.tags.insert(new.to_string());
    registry.save(store)?;
    info!(old, new, modified = report.modified_issues, "Renamed tag");
    Ok(report)
}
