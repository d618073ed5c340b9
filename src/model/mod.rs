//! Core data types for `ishu`.
//!
//! This module defines the fundamental types used throughout the
//! application:
//! - `IssueId` - `(user, number)` pair identifying an issue
//! - `Status` - Issue lifecycle states (closed is a predicate, not a state)
//! - `Issue` - The core work item with tags and a blocking set
//! - `Comment` - Immutable issue comments
//! - `LogEntry` - Change-log entries recording previous field values
//! - `Snapshot` - Load-time field values used to compute the change log

use crate::error::{IshuError, Result};
use crate::util::time::stamp_format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifier of an issue: owning user plus a per-user number.
///
/// Numbers are assigned per user, monotonically, and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueId {
    pub user: String,
    pub num: u32,
}

impl IssueId {
    #[must_use]
    pub fn new(user: impl Into<String>, num: u32) -> Self {
        Self {
            user: user.into(),
            num,
        }
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.user, self.num)
    }
}

/// Wire shape of a blocking-graph edge endpoint (`{id, user}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub id: u32,
    pub user: String,
}

impl From<&IssueId> for BlockRef {
    fn from(id: &IssueId) -> Self {
        Self {
            id: id.num,
            user: id.user.clone(),
        }
    }
}

impl BlockRef {
    #[must_use]
    pub fn to_issue_id(&self) -> IssueId {
        IssueId::new(self.user.clone(), self.id)
    }
}

/// Encode a blocking set in its persisted order (ascending by number).
#[must_use]
pub fn encode_blocked_by(blocked_by: &BTreeSet<IssueId>) -> Vec<BlockRef> {
    let mut refs: Vec<BlockRef> = blocked_by.iter().map(BlockRef::from).collect();
    refs.sort_by_key(|r| r.id);
    refs
}

/// Issue lifecycle status.
///
/// "Closed" is deliberately not a variant: it is a query-time category
/// covering `Fixed` and `Wontfix`. See [`Status::is_closed`] and
/// [`StatusFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Open,
    Fixed,
    Wontfix,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Fixed => "fixed",
            Self::Wontfix => "wontfix",
        }
    }

    /// Whether this status counts as closed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Fixed | Self::Wontfix)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = IshuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "fixed" => Ok(Self::Fixed),
            "wontfix" => Ok(Self::Wontfix),
            other => Err(IshuError::validation(
                "status",
                format!("invalid status: {other}"),
            )),
        }
    }
}

/// Status criterion for listing: stored statuses plus the derived
/// `closed` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Closed,
    Fixed,
    Wontfix,
}

impl StatusFilter {
    /// Does an issue with the given status match this filter?
    #[must_use]
    pub const fn matches(self, status: Status) -> bool {
        match self {
            Self::Open => matches!(status, Status::Open),
            Self::Closed => status.is_closed(),
            Self::Fixed => matches!(status, Status::Fixed),
            Self::Wontfix => matches!(status, Status::Wontfix),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = IshuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "fixed" => Ok(Self::Fixed),
            "wontfix" => Ok(Self::Wontfix),
            other => Err(IshuError::validation(
                "status",
                format!("invalid status: {other} (one of: open, closed, fixed, wontfix)"),
            )),
        }
    }
}

/// A comment on an issue. Immutable once created; persisted as its own
/// file next to the issue document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub issue_id: IssueId,
    pub user: String,
    pub created: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{} - {}]",
            self.user,
            self.created.format("%Y-%m-%d %H:%M:%S")
        )?;
        write!(f, "{}", self.message)
    }
}

/// One change-log entry: the previous value of every field that changed
/// on a single save, plus the save timestamp. Unchanged fields stay
/// absent from the serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "stamp_format")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<Vec<BlockRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// The central entity: a trackable unit of work owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: IssueId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub blocked_by: BTreeSet<IssueId>,
    pub status: Status,
    /// Ordered by creation time ascending; derived from sibling files
    /// at load time, never stored inline.
    pub comments: Vec<Comment>,
    /// Append-only change log.
    pub log: Vec<LogEntry>,
}

/// Outcome of adding a blocking edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockChange {
    Added,
    AlreadyBlocked,
}

/// Outcome of removing a blocking edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnblockChange {
    Removed,
    NotBlocked,
}

impl Issue {
    /// Create a fresh issue in the `Open` state with an empty log.
    #[must_use]
    pub fn new(
        id: IssueId,
        description: impl Into<String>,
        tags: BTreeSet<String>,
        blocked_by: BTreeSet<IssueId>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            created,
            updated: created,
            description: description.into(),
            tags,
            blocked_by,
            status: Status::Open,
            comments: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Replace the description. Empty or identical values are ignored.
    ///
    /// Returns whether anything changed.
    pub fn set_description(&mut self, description: &str) -> bool {
        if description.is_empty() || description == self.description {
            return false;
        }
        self.description = description.to_string();
        true
    }

    /// Union tags into the tag set. Returns whether the set changed.
    pub fn add_tags(&mut self, tags: &BTreeSet<String>) -> bool {
        let before = self.tags.len();
        self.tags.extend(tags.iter().cloned());
        self.tags.len() != before
    }

    /// Subtract tags from the tag set. Tags the issue doesn't carry are
    /// ignored. Returns whether the set changed.
    pub fn remove_tags(&mut self, tags: &BTreeSet<String>) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| !tags.contains(t));
        self.tags.len() != before
    }

    /// Change the status. Returns whether it actually changed.
    pub fn set_status(&mut self, status: Status) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Mark this issue as blocked by `blocking`.
    ///
    /// Only the direct two-issue cycle is detected; longer cycles pass
    /// through unchecked.
    ///
    /// # Errors
    ///
    /// - `SelfBlock` when `blocking` is this issue
    /// - `BlockingLoop` when `blocking` is already blocked by this issue
    pub fn add_blocked_by(&mut self, blocking: &Self) -> Result<BlockChange> {
        if self.id == blocking.id {
            return Err(IshuError::SelfBlock {
                id: self.id.to_string(),
            });
        }
        if self.blocked_by.contains(&blocking.id) {
            return Ok(BlockChange::AlreadyBlocked);
        }
        if blocking.blocked_by.contains(&self.id) {
            return Err(IshuError::BlockingLoop {
                blocked: self.id.to_string(),
                blocking: blocking.id.to_string(),
            });
        }
        self.blocked_by.insert(blocking.id.clone());
        Ok(BlockChange::Added)
    }

    /// Remove a blocking edge. Absent edges are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SelfBlock` when `blocking_id` is this issue's own id.
    pub fn remove_blocked_by(&mut self, blocking_id: &IssueId) -> Result<UnblockChange> {
        if self.id == *blocking_id {
            return Err(IshuError::SelfBlock {
                id: self.id.to_string(),
            });
        }
        if self.blocked_by.remove(blocking_id) {
            Ok(UnblockChange::Removed)
        } else {
            Ok(UnblockChange::NotBlocked)
        }
    }
}

/// The set of issues currently blocking some other open issue.
///
/// An issue is "blocking" when another open issue's `blocked_by` set
/// contains it. Closed issues never block anything, whatever edges
/// still point at them.
#[must_use]
pub fn blocking_ids(issues: &[Issue]) -> BTreeSet<IssueId> {
    let closed: BTreeSet<&IssueId> = issues
        .iter()
        .filter(|i| i.status.is_closed())
        .map(|i| &i.id)
        .collect();
    issues
        .iter()
        .filter(|i| !i.status.is_closed())
        .flat_map(|i| i.blocked_by.iter())
        .filter(|id| !closed.contains(id))
        .cloned()
        .collect()
}

/// Field values captured when an issue was loaded (or last saved),
/// compared against current values to build the change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub description: String,
    pub tags: BTreeSet<String>,
    pub blocked_by: BTreeSet<IssueId>,
    pub status: Status,
}

impl Snapshot {
    /// Capture the loggable fields of an issue.
    #[must_use]
    pub fn of(issue: &Issue) -> Self {
        Self {
            description: issue.description.clone(),
            tags: issue.tags.clone(),
            blocked_by: issue.blocked_by.clone(),
            status: issue.status,
        }
    }

    /// Diff this snapshot against the issue's current state.
    ///
    /// Returns a log entry holding the *previous* value of every field
    /// that changed, or `None` when nothing did.
    #[must_use]
    pub fn diff(&self, issue: &Issue, timestamp: DateTime<Utc>) -> Option<LogEntry> {
        let mut entry = LogEntry {
            timestamp,
            description: None,
            tags: None,
            blocked_by: None,
            status: None,
        };
        let mut changed = false;
        if issue.description != self.description {
            entry.description = Some(self.description.clone());
            changed = true;
        }
        if issue.tags != self.tags {
            entry.tags = Some(self.tags.iter().cloned().collect());
            changed = true;
        }
        if issue.blocked_by != self.blocked_by {
            entry.blocked_by = Some(encode_blocked_by(&self.blocked_by));
            changed = true;
        }
        if issue.status != self.status {
            entry.status = Some(self.status);
            changed = true;
        }
        changed.then_some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time::parse_stamp;

    fn ts() -> DateTime<Utc> {
        parse_stamp("2026-02-01T12:00:00Z").unwrap()
    }

    fn issue(user: &str, num: u32) -> Issue {
        Issue::new(
            IssueId::new(user, num),
            format!("issue {num}"),
            BTreeSet::new(),
            BTreeSet::new(),
            ts(),
        )
    }

    #[test]
    fn test_status_closed_predicate() {
        assert!(!Status::Open.is_closed());
        assert!(Status::Fixed.is_closed());
        assert!(Status::Wontfix.is_closed());
    }

    #[test]
    fn test_status_filter_closed_matches_both_substates() {
        assert!(StatusFilter::Closed.matches(Status::Fixed));
        assert!(StatusFilter::Closed.matches(Status::Wontfix));
        assert!(!StatusFilter::Closed.matches(Status::Open));
        assert!(!StatusFilter::Fixed.matches(Status::Wontfix));
    }

    #[test]
    fn test_status_round_trips_through_json() {
        let json = serde_json::to_string(&Status::Wontfix).unwrap();
        assert_eq!(json, "\"wontfix\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Wontfix);
    }

    #[test]
    fn test_closed_is_not_a_stored_status() {
        assert!(serde_json::from_str::<Status>("\"closed\"").is_err());
    }

    #[test]
    fn test_set_description_ignores_empty_and_identical() {
        let mut a = issue("alice", 1);
        assert!(!a.set_description(""));
        assert!(!a.set_description("issue 1"));
        assert!(a.set_description("new text"));
        assert_eq!(a.description, "new text");
    }

    #[test]
    fn test_tag_mutation_change_detection() {
        let mut a = issue("alice", 1);
        let bug: BTreeSet<String> = ["bug".to_string()].into();
        assert!(a.add_tags(&bug));
        assert!(!a.add_tags(&bug), "re-adding present tag is a no-op");
        let absent: BTreeSet<String> = ["ui".to_string()].into();
        assert!(!a.remove_tags(&absent), "removing absent tag is a no-op");
        assert!(a.remove_tags(&bug));
        assert!(a.tags.is_empty());
    }

    #[test]
    fn test_self_block_rejected() {
        let mut a = issue("alice", 1);
        let a_clone = a.clone();
        let err = a.add_blocked_by(&a_clone).unwrap_err();
        assert!(matches!(err, IshuError::SelfBlock { .. }));
        assert!(a.blocked_by.is_empty());
    }

    #[test]
    fn test_two_cycle_rejected_and_leaves_sets_untouched() {
        let mut a = issue("alice", 1);
        let mut b = issue("bob", 1);
        assert_eq!(a.add_blocked_by(&b).unwrap(), BlockChange::Added);
        let err = b.add_blocked_by(&a).unwrap_err();
        assert!(matches!(err, IshuError::BlockingLoop { .. }));
        assert!(b.blocked_by.is_empty());
    }

    #[test]
    fn test_duplicate_edge_is_reported_not_added_twice() {
        let mut a = issue("alice", 1);
        let b = issue("bob", 1);
        assert_eq!(a.add_blocked_by(&b).unwrap(), BlockChange::Added);
        assert_eq!(a.add_blocked_by(&b).unwrap(), BlockChange::AlreadyBlocked);
        assert_eq!(a.blocked_by.len(), 1);
    }

    #[test]
    fn test_unblock_absent_edge_is_noop() {
        let mut a = issue("alice", 1);
        let b_id = IssueId::new("bob", 1);
        assert_eq!(
            a.remove_blocked_by(&b_id).unwrap(),
            UnblockChange::NotBlocked
        );
        a.blocked_by.insert(b_id.clone());
        assert_eq!(a.remove_blocked_by(&b_id).unwrap(), UnblockChange::Removed);
        assert!(a.blocked_by.is_empty());
    }

    #[test]
    fn test_blocking_view_gates_on_status() {
        let mut blocked = issue("alice", 1);
        let blocker = issue("bob", 1);
        blocked.blocked_by.insert(blocker.id.clone());

        let ids = blocking_ids(&[blocked.clone(), blocker.clone()]);
        assert!(ids.contains(&blocker.id));

        // A closed blocker no longer blocks anything.
        let mut closed_blocker = blocker.clone();
        closed_blocker.status = Status::Fixed;
        let ids = blocking_ids(&[blocked.clone(), closed_blocker]);
        assert!(ids.is_empty());

        // Edges from closed issues don't count either.
        let mut closed_blocked = blocked;
        closed_blocked.status = Status::Wontfix;
        let ids = blocking_ids(&[closed_blocked, blocker]);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_snapshot_diff_empty_when_unchanged() {
        let a = issue("alice", 1);
        let snap = Snapshot::of(&a);
        assert!(snap.diff(&a, ts()).is_none());
    }

    #[test]
    fn test_snapshot_diff_records_previous_values_only_for_changes() {
        let mut a = issue("alice", 1);
        a.tags.insert("bug".to_string());
        let snap = Snapshot::of(&a);

        a.set_description("rewritten");
        let entry = snap.diff(&a, ts()).unwrap();
        assert_eq!(entry.description.as_deref(), Some("issue 1"));
        assert!(entry.tags.is_none());
        assert!(entry.blocked_by.is_none());
        assert!(entry.status.is_none());

        a.set_status(Status::Fixed);
        a.tags.clear();
        let entry = snap.diff(&a, ts()).unwrap();
        assert_eq!(entry.status, Some(Status::Open));
        assert_eq!(entry.tags.as_deref(), Some(&["bug".to_string()][..]));
    }

    #[test]
    fn test_log_entry_serializes_only_changed_fields() {
        let entry = LogEntry {
            timestamp: ts(),
            description: Some("old".to_string()),
            tags: None,
            blocked_by: None,
            status: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["timestamp"], "2026-02-01T12:00:00Z");
        assert_eq!(obj["description"], "old");
    }

    #[test]
    fn test_encode_blocked_by_sorts_by_number() {
        let set: BTreeSet<IssueId> = [
            IssueId::new("zed", 1),
            IssueId::new("alice", 3),
            IssueId::new("bob", 2),
        ]
        .into();
        let refs = encode_blocked_by(&set);
        let nums: Vec<u32> = refs.iter().map(|r| r.id).collect();
        assert_eq!(nums, vec![1, 2, 3]);
    }
}
