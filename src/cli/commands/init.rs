//! Init command implementation.

use crate::error::{IshuError, Result};
use crate::store::FsStore;
use tracing::info;

/// Create the `.ishu` tree under the resolved root.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn execute(store: &FsStore) -> Result<()> {
    match store.init() {
        Ok(()) => {
            info!(path = %store.ishu_dir().display(), "Initialized ishu project");
            println!("Created ishu project in {}", store.ishu_dir().display());
            Ok(())
        }
        Err(IshuError::AlreadyInitialized { path }) => {
            println!("There is already an ishu project in {}", path.display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}
