//! Scoped working-tree snapshot directory.

use std::fs;
use std::path::{Path, PathBuf};

use codeglance_git_backend_models::GitBackendError;
use walkdir::WalkDir;

/// A materialized working tree at one commit.
///
/// The snapshot exclusively owns its directory. The directory is removed when
/// `close` is called or when the value is dropped, whichever comes first, so
/// every exit path of a comparison releases it. Removal tolerates read-only
/// entries (git object files are read-only) by forcing writable permissions
/// and retrying.
#[derive(Debug)]
pub struct Snapshot {
    path: PathBuf,
    released: bool,
}

impl Snapshot {
    /// Take ownership of a materialized directory.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    /// Path of the snapshot directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the snapshot directory eagerly.
    ///
    /// # Errors
    ///
    /// Returns `GitBackendError::Io` if the directory cannot be removed even
    /// after permissions are reset.
    pub fn close(mut self) -> Result<(), GitBackendError> {
        self.released = true;
        remove_tree(&self.path)
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_tree(&self.path) {
            log::warn!(
                "Failed to remove snapshot directory {}: {e}",
                self.path.display()
            );
        }
    }
}

/// Remove a directory tree, resetting permissions and retrying on failure.
fn remove_tree(path: &Path) -> Result<(), GitBackendError> {
    if !path.exists() {
        return Ok(());
    }

    if fs::remove_dir_all(path).is_ok() {
        return Ok(());
    }

    force_writable(path);
    fs::remove_dir_all(path).map_err(GitBackendError::from)
}

/// Make every entry under `root` writable (and directories traversable).
fn force_writable(root: &Path) {
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        make_writable(entry.path(), &metadata);
    }
}

#[cfg(unix)]
fn make_writable(path: &Path, metadata: &fs::Metadata) {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = metadata.permissions();
    let mode = if metadata.is_dir() {
        perms.mode() | 0o700
    } else {
        perms.mode() | 0o200
    };
    perms.set_mode(mode);
    let _ = fs::set_permissions(path, perms);
}

#[cfg(not(unix))]
fn make_writable(path: &Path, metadata: &fs::Metadata) {
    let mut perms = metadata.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    let _ = fs::set_permissions(path, perms);
}
