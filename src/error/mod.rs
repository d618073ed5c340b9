//! Error types and handling for `ishu`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Structured variants for identifier-resolution and graph failures
//! - Provides recovery hints for user-facing errors
//! - All errors exit with code 1 when they reach `main`

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `ishu` operations.
#[derive(Error, Debug)]
pub enum IshuError {
    // === Identifier resolution ===
    /// Issue reference token doesn't match `<letters?><digits>`.
    #[error("Invalid issue ID format: '{token}'")]
    InvalidId { token: String },

    /// User prefix matches no known user.
    #[error("Unknown user: '{prefix}'")]
    UnknownUser { prefix: String },

    /// User prefix matches more than one known user.
    #[error("Ambiguous user '{prefix}' (can be one of: {})", candidates.join(", "))]
    AmbiguousUser {
        prefix: String,
        candidates: Vec<String>,
    },

    /// Referenced issue does not exist on disk.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Record store ===
    /// On-disk document failed to parse or is missing required fields.
    #[error("Corrupt record at '{path}': {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// No `.ishu` directory found under the resolved root.
    #[error("No .ishu directory found: run 'ishu init' first")]
    NotInitialized,

    /// `init` called where a tree already exists.
    #[error("There is already an ishu project in '{path}'")]
    AlreadyInitialized { path: PathBuf },

    // === Blocking graph ===
    /// An issue cannot be blocked by itself.
    #[error("Issue {id} can't block itself")]
    SelfBlock { id: String },

    /// Adding the edge would create a direct two-issue cycle.
    #[error("Blocking loop detected! Issue {blocking} is already blocked by {blocked}")]
    BlockingLoop { blocked: String, blocking: String },

    // === Validation / configuration ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Config value fails validation or the config file is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No config file yet; the username must be set before anything else.
    #[error("No valid config found: set your username with 'ishu conf --set user <name>'")]
    NoConfig,

    // === I/O ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IshuError {
    /// Can the user fix this without touching any files by hand?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidId { .. }
                | Self::UnknownUser { .. }
                | Self::AmbiguousUser { .. }
                | Self::IssueNotFound { .. }
                | Self::NotInitialized
                | Self::AlreadyInitialized { .. }
                | Self::SelfBlock { .. }
                | Self::BlockingLoop { .. }
                | Self::Validation { .. }
                | Self::NoConfig
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run: ishu init"),
            Self::NoConfig => Some("Run: ishu conf --set user <name>"),
            Self::AmbiguousUser { .. } => Some("Type more characters of the username"),
            Self::InvalidId { .. } => {
                Some("Issue references look like '12' or 'bob12' (user prefix + number)")
            }
            Self::SelfBlock { .. } => Some("An issue cannot be blocked by itself"),
            Self::BlockingLoop { .. } => Some("Remove the existing edge first with 'ishu unblock'"),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `IshuError`.
pub type Result<T> = std::result::Result<T, IshuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IshuError::IssueNotFound {
            id: "bob12".to_string(),
        };
        assert_eq!(err.to_string(), "Issue not found: bob12");
    }

    #[test]
    fn test_ambiguous_user_names_candidates() {
        let err = IshuError::AmbiguousUser {
            prefix: "a".to_string(),
            candidates: vec!["alice".to_string(), "albert".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous user 'a' (can be one of: alice, albert)"
        );
    }

    #[test]
    fn test_validation_error() {
        let err = IshuError::validation("user", "can only consist of a-z and A-Z");
        assert_eq!(
            err.to_string(),
            "Validation failed: user: can only consist of a-z and A-Z"
        );
    }

    #[test]
    fn test_suggestion() {
        assert_eq!(
            IshuError::NotInitialized.suggestion(),
            Some("Run: ishu init")
        );
        assert!(
            IshuError::Io(std::io::Error::other("boom"))
                .suggestion()
                .is_none()
        );
    }

    #[test]
    fn test_user_recoverable() {
        assert!(IshuError::NoConfig.is_user_recoverable());
        assert!(!IshuError::Io(std::io::Error::other("boom")).is_user_recoverable());
    }
}
