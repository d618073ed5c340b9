//! Filesystem record store.
//!
//! Every record is its own JSON document under a per-user directory
//! tree:
//!
//! ```text
//! <root>/.ishu/
//!   user-<name>/
//!     issue-<num>/
//!       issue                        issue document
//!       comment-<stamp>[-<n>]        one file per comment
//!   registered_tags                  JSON array of tag names
//! ```
//!
//! Paths are computed, never stored. Writes are single-file only; there
//! is no cross-file transaction, and concurrent writers are
//! last-writer-wins.

use crate::error::{IshuError, Result};
use crate::model::{BlockRef, Comment, Issue, IssueId, LogEntry, Snapshot, Status, encode_blocked_by};
use crate::util::time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Filename of the issue document inside an issue directory.
const ISSUE_FNAME: &str = "issue";
/// Filename of the tag registry ("tags" would collide with ctags files).
const TAGS_FNAME: &str = "registered_tags";

/// Wire shape of the issue document.
#[derive(Debug, Serialize, Deserialize)]
struct IssueDoc {
    id: u32,
    user: String,
    created: String,
    updated: String,
    description: String,
    tags: Vec<String>,
    blocked_by: Vec<BlockRef>,
    status: Status,
    #[serde(default)]
    log: Vec<LogEntry>,
}

/// Wire shape of a comment document.
#[derive(Debug, Serialize, Deserialize)]
struct CommentDoc {
    issue_id: CommentIssueRef,
    user: String,
    created: String,
    message: String,
}

/// Comment documents carry the issue number as a JSON string; older
/// trees only ever contain that form. Reads accept a bare integer too.
#[derive(Debug, Serialize, Deserialize)]
struct CommentIssueRef {
    user: String,
    #[serde(
        serialize_with = "serialize_num_as_string",
        deserialize_with = "deserialize_lenient_num"
    )]
    num: u32,
}

fn serialize_num_as_string<S>(num: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(num)
}

fn deserialize_lenient_num<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u32),
        Str(String),
    }
    match Repr::deserialize(deserializer)? {
        Repr::Int(num) => Ok(num),
        Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Record store rooted at a concrete `.ishu` directory.
///
/// The root is threaded through the constructor; nothing here consults
/// process-global state.
#[derive(Debug, Clone)]
pub struct FsStore {
    ishu_dir: PathBuf,
}

impl FsStore {
    #[must_use]
    pub fn new(ishu_dir: impl Into<PathBuf>) -> Self {
        Self {
            ishu_dir: ishu_dir.into(),
        }
    }

    #[must_use]
    pub fn ishu_dir(&self) -> &Path {
        &self.ishu_dir
    }

    /// Whether the `.ishu` tree exists.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.ishu_dir.is_dir()
    }

    /// Create the `.ishu` tree.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if the tree already exists.
    pub fn init(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(IshuError::AlreadyInitialized {
                path: self.ishu_dir.clone(),
            });
        }
        fs::create_dir_all(&self.ishu_dir)?;
        debug!(path = %self.ishu_dir.display(), "Created ishu tree");
        Ok(())
    }

    // === Paths ===

    #[must_use]
    pub fn user_dir(&self, user: &str) -> PathBuf {
        self.ishu_dir.join(format!("user-{user}"))
    }

    #[must_use]
    pub fn issue_dir(&self, id: &IssueId) -> PathBuf {
        self.user_dir(&id.user).join(format!("issue-{}", id.num))
    }

    #[must_use]
    pub fn issue_path(&self, id: &IssueId) -> PathBuf {
        self.issue_dir(id).join(ISSUE_FNAME)
    }

    #[must_use]
    pub fn registered_tags_path(&self) -> PathBuf {
        self.ishu_dir.join(TAGS_FNAME)
    }

    /// Whether the issue document exists on disk.
    #[must_use]
    pub fn issue_exists(&self, id: &IssueId) -> bool {
        self.issue_path(id).is_file()
    }

    // === Users ===

    /// Every username with a directory under the tree.
    ///
    /// Users are implicit: a user exists exactly when a `user-<name>`
    /// directory does.
    ///
    /// # Errors
    ///
    /// Returns an error when the tree itself cannot be read.
    pub fn usernames(&self) -> Result<BTreeSet<String>> {
        let mut users = BTreeSet::new();
        if !self.is_initialized() {
            return Ok(users);
        }
        for entry in fs::read_dir(&self.ishu_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(user) = name.strip_prefix("user-") {
                users.insert(user.to_string());
            }
        }
        Ok(users)
    }

    /// Next unused issue number for a user (monotonic, never reused).
    ///
    /// # Errors
    ///
    /// Returns an error when the user directory exists but cannot be
    /// read.
    pub fn next_issue_number(&self, user: &str) -> Result<u32> {
        let dir = self.user_dir(user);
        if !dir.is_dir() {
            return Ok(1);
        }
        let mut max = 0;
        for entry in fs::read_dir(&dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if let Some(num) = name.strip_prefix("issue-").and_then(|n| n.parse().ok()) {
                max = max.max(num);
            }
        }
        Ok(max + 1)
    }

    // === Issues ===

    /// Load one issue and its comments.
    ///
    /// # Errors
    ///
    /// - `IssueNotFound` when the issue document is absent
    /// - `Corrupt` when any document fails to parse
    pub fn load_issue(&self, id: &IssueId) -> Result<Issue> {
        let path = self.issue_path(id);
        if !path.is_file() {
            return Err(IshuError::IssueNotFound { id: id.to_string() });
        }
        self.load_issue_at(&path)
    }

    fn load_issue_at(&self, path: &Path) -> Result<Issue> {
        let doc = read_issue_doc(path)?;
        let id = IssueId::new(doc.user.clone(), doc.id);
        let comments = self.load_comments(path.parent().unwrap_or(Path::new(".")), &id)?;
        let corrupt = |reason: String| IshuError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };
        Ok(Issue {
            created: time::parse_stamp(&doc.created).map_err(|e| corrupt(e.to_string()))?,
            updated: time::parse_stamp(&doc.updated).map_err(|e| corrupt(e.to_string()))?,
            id,
            description: doc.description,
            tags: doc.tags.into_iter().collect(),
            blocked_by: doc.blocked_by.iter().map(BlockRef::to_issue_id).collect(),
            status: doc.status,
            comments,
            log: doc.log,
        })
    }

    /// Load all issues, for one user or for everyone.
    ///
    /// A missing user directory yields an empty list, not an error.
    /// Records that fail to parse are skipped with a warning so one bad
    /// file can't hide every other issue.
    ///
    /// # Errors
    ///
    /// Returns an error only when a directory scan itself fails.
    pub fn load_all_issues(&self, user: Option<&str>) -> Result<Vec<Issue>> {
        let users = match user {
            Some(u) => {
                if !self.user_dir(u).is_dir() {
                    return Ok(Vec::new());
                }
                BTreeSet::from([u.to_string()])
            }
            None => self.usernames()?,
        };
        let mut issues = Vec::new();
        for user in &users {
            let dir = self.user_dir(user);
            let mut numbered: Vec<(u32, PathBuf)> = Vec::new();
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(num) = name.strip_prefix("issue-").and_then(|n| n.parse().ok()) {
                    numbered.push((num, entry.path().join(ISSUE_FNAME)));
                }
            }
            numbered.sort_by_key(|(num, _)| *num);
            for (_, path) in numbered {
                match self.load_issue_at(&path) {
                    Ok(issue) => issues.push(issue),
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable issue"),
                }
            }
        }
        Ok(issues)
    }

    /// Persist an issue, appending a change-log entry when any loggable
    /// field differs from the on-disk version.
    ///
    /// This is the sole place the change log grows. The previous
    /// document is re-read here so the diff always runs against what
    /// was actually loaded, without shadow fields in the persisted
    /// shape. Sets `updated` to the save time.
    ///
    /// # Errors
    ///
    /// Returns an error when the existing document is corrupt or the
    /// write fails.
    pub fn save_issue(&self, issue: &mut Issue) -> Result<()> {
        let path = self.issue_path(&issue.id);
        let now = time::now();

        if path.is_file() {
            let prior = read_issue_doc(&path)?;
            let snapshot = Snapshot {
                description: prior.description,
                tags: prior.tags.into_iter().collect(),
                blocked_by: prior.blocked_by.iter().map(BlockRef::to_issue_id).collect(),
                status: prior.status,
            };
            if let Some(entry) = snapshot.diff(issue, now) {
                issue.log.push(entry);
            }
        }

        issue.updated = now;
        let doc = IssueDoc {
            id: issue.id.num,
            user: issue.id.user.clone(),
            created: time::format_stamp(issue.created),
            updated: time::format_stamp(issue.updated),
            description: issue.description.clone(),
            tags: issue.tags.iter().cloned().collect(),
            blocked_by: encode_blocked_by(&issue.blocked_by),
            status: issue.status,
            log: issue.log.clone(),
        };

        fs::create_dir_all(self.issue_dir(&issue.id))?;
        fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        debug!(id = %issue.id, path = %path.display(), "Saved issue");
        Ok(())
    }

    // === Comments ===

    fn load_comments(&self, issue_dir: &Path, id: &IssueId) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        for entry in fs::read_dir(issue_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with("comment-") {
                continue;
            }
            comments.push(read_comment_doc(&entry.path(), id)?);
        }
        comments.sort_by_key(|c| c.created);
        Ok(comments)
    }

    /// Persist a comment as a new file named by its creation timestamp,
    /// with a numeric suffix when another comment landed in the same
    /// second. Comments are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` when the owning issue doesn't exist, or
    /// an error when the write fails.
    pub fn save_comment(&self, comment: &Comment) -> Result<PathBuf> {
        if !self.issue_exists(&comment.issue_id) {
            return Err(IshuError::IssueNotFound {
                id: comment.issue_id.to_string(),
            });
        }
        let dir = self.issue_dir(&comment.issue_id);
        let stamp = time::filename_stamp(comment.created);
        let mut suffix = 0u32;
        let path = loop {
            let fname = if suffix == 0 {
                format!("comment-{stamp}")
            } else {
                format!("comment-{stamp}-{suffix}")
            };
            let candidate = dir.join(fname);
            if !candidate.exists() {
                break candidate;
            }
            suffix += 1;
        };
        let doc = CommentDoc {
            issue_id: CommentIssueRef {
                user: comment.issue_id.user.clone(),
                num: comment.issue_id.num,
            },
            user: comment.user.clone(),
            created: time::format_stamp(comment.created),
            message: comment.message.clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        debug!(id = %comment.issue_id, path = %path.display(), "Saved comment");
        Ok(path)
    }
}

fn read_issue_doc(path: &Path) -> Result<IssueDoc> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| IshuError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_comment_doc(path: &Path, id: &IssueId) -> Result<Comment> {
    let corrupt = |reason: String| IshuError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };
    let contents = fs::read_to_string(path)?;
    let doc: CommentDoc = serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))?;
    if doc.issue_id.user != id.user || doc.issue_id.num != id.num {
        return Err(corrupt(format!(
            "comment belongs to {}#{}",
            doc.issue_id.user, doc.issue_id.num
        )));
    }
    Ok(Comment {
        issue_id: id.clone(),
        user: doc.user,
        created: time::parse_stamp(&doc.created).map_err(|e| corrupt(e.to_string()))?,
        message: doc.message,
    })
}
