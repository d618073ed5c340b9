//! Issue reference resolution and abbreviation.
//!
//! A reference token is an optional user prefix (letters only) followed
//! by a run of digits: `12` means "my issue 12", `bob12` means bob's
//! issue 12, and `b12` works as long as only one known user starts
//! with `b`. The inverse operation produces the shortest reference
//! that still resolves unambiguously.

use crate::error::{IshuError, Result};
use crate::model::IssueId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<user>[a-zA-Z]+)?(?P<num>[0-9]+)$").expect("valid regex"));

/// Resolves abbreviated issue references against the set of known users.
#[derive(Debug, Clone)]
pub struct IdResolver<'a> {
    acting_user: &'a str,
    known_users: &'a BTreeSet<String>,
}

impl<'a> IdResolver<'a> {
    #[must_use]
    pub const fn new(acting_user: &'a str, known_users: &'a BTreeSet<String>) -> Self {
        Self {
            acting_user,
            known_users,
        }
    }

    /// Resolve a user-typed token into a fully-qualified [`IssueId`].
    ///
    /// With `restrict_to_own` the token must be digits only and always
    /// refers to the acting user's namespace. The `exists` check runs
    /// after user resolution so a well-formed reference to a missing
    /// issue fails with `IssueNotFound`.
    ///
    /// # Errors
    ///
    /// - `InvalidId` for malformed tokens
    /// - `UnknownUser` / `AmbiguousUser` for bad or ambiguous prefixes
    /// - `IssueNotFound` when the resolved issue doesn't exist
    pub fn resolve<F>(&self, token: &str, restrict_to_own: bool, exists: F) -> Result<IssueId>
    where
        F: Fn(&IssueId) -> bool,
    {
        let (user, num) = if restrict_to_own {
            let num = parse_num(token, token)?;
            (self.acting_user.to_string(), num)
        } else {
            let caps = TOKEN_RE.captures(token).ok_or_else(|| IshuError::InvalidId {
                token: token.to_string(),
            })?;
            let num = parse_num(&caps["num"], token)?;
            let user = match caps.name("user") {
                None => self.acting_user.to_string(),
                Some(prefix) => self.resolve_user(prefix.as_str())?,
            };
            (user, num)
        };

        let id = IssueId::new(user, num);
        if exists(&id) {
            Ok(id)
        } else {
            Err(IshuError::IssueNotFound { id: id.to_string() })
        }
    }

    /// Resolve a user prefix to a known username.
    ///
    /// Exact matches win; otherwise the prefix must select exactly one
    /// known user.
    fn resolve_user(&self, prefix: &str) -> Result<String> {
        if self.known_users.contains(prefix) {
            return Ok(prefix.to_string());
        }
        let candidates: Vec<&String> = self
            .known_users
            .iter()
            .filter(|u| u.starts_with(prefix))
            .collect();
        match candidates.as_slice() {
            [] => Err(IshuError::UnknownUser {
                prefix: prefix.to_string(),
            }),
            [only] => Ok((*only).clone()),
            many => Err(IshuError::AmbiguousUser {
                prefix: prefix.to_string(),
                candidates: many.iter().map(|u| (*u).clone()).collect(),
            }),
        }
    }

    /// Produce the shortest reference that resolves back to `id`.
    ///
    /// The acting user's own issues need no prefix. For other users
    /// the shortest unambiguous prefix is used, falling back to the
    /// full username when every shorter prefix stays ambiguous.
    #[must_use]
    pub fn shorten(&self, id: &IssueId) -> String {
        if id.user == self.acting_user {
            return id.num.to_string();
        }
        // Prefix lengths walk char boundaries: directory-derived
        // usernames aren't guaranteed ASCII.
        for (end, _) in id.user.char_indices().skip(1) {
            let prefix = &id.user[..end];
            let matches = self
                .known_users
                .iter()
                .filter(|u| u.starts_with(prefix))
                .count();
            if matches == 1 {
                return format!("{prefix}{}", id.num);
            }
        }
        format!("{}{}", id.user, id.num)
    }
}

fn parse_num(digits: &str, token: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IshuError::InvalidId {
            token: token.to_string(),
        });
    }
    digits.parse().map_err(|_| IshuError::InvalidId {
        token: token.to_string(),
    })
}
