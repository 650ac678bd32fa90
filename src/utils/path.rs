//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Absolute form of `path`.
///
/// Canonicalizes when the path exists. Otherwise an absolute path is kept
/// as-is and a relative one is joined onto the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
