//! Command implementations, one module per subcommand.

pub mod alias;
pub mod blocked;
pub mod comment;
pub mod conf;
pub mod edit;
pub mod fixed;
pub mod init;
pub mod list;
pub mod log;
pub mod open;
pub mod reopen;
pub mod show;
pub mod status;
pub mod tag;
pub mod unblock;
pub mod wontfix;

use crate::config::Config;
use crate::error::Result;
use crate::model::IssueId;
use crate::store::FsStore;
use crate::util::IdResolver;
use std::collections::BTreeSet;

/// Shared resolution context: the acting user plus every known user.
///
/// Built once per command so repeated resolve/shorten calls see the
/// same user set.
pub(crate) struct RefContext {
    acting_user: String,
    known_users: BTreeSet<String>,
}

impl RefContext {
    pub(crate) fn new(store: &FsStore, config: &Config) -> Result<Self> {
        Ok(Self {
            acting_user: config.user.clone(),
            known_users: store.usernames()?,
        })
    }

    pub(crate) fn resolver(&self) -> IdResolver<'_> {
        IdResolver::new(&self.acting_user, &self.known_users)
    }

    /// Resolve a token, checking existence against the store.
    pub(crate) fn resolve(
        &self,
        store: &FsStore,
        token: &str,
        restrict_to_own: bool,
    ) -> Result<IssueId> {
        self.resolver()
            .resolve(token, restrict_to_own, |id| store.issue_exists(id))
    }

    /// Shortest unambiguous display form of an id.
    pub(crate) fn shorten(&self, id: &IssueId) -> String {
        self.resolver().shorten(id)
    }
}
