//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve URL to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: strip query and fragment, decode, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/site.0123456789ab.js"), "").unwrap();
        fs::write(dir.path().join("my cv.pdf"), "").unwrap();
        dir
    }

    #[test]
    fn test_root_maps_to_index() {
        let dir = site();
        let resolved = resolve_path("/", dir.path()).unwrap();
        assert!(resolved.ends_with("index.html"));
        assert!(resolve_path("/?v=2", dir.path()).is_some());
    }

    #[test]
    fn test_asset_and_encoded_names() {
        let dir = site();
        assert!(resolve_path("/assets/site.0123456789ab.js", dir.path()).is_some());
        assert!(resolve_path("/my%20cv.pdf", dir.path()).is_some());
        assert!(resolve_path("/missing.css", dir.path()).is_none());
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = site();
        let inner = dir.path().join("public");
        fs::create_dir(&inner).unwrap();
        assert!(resolve_path("/../index.html", &inner).is_none());
        assert!(resolve_path("/%2e%2e/index.html", &inner).is_none());
    }

    #[test]
    fn test_directory_without_index() {
        let dir = site();
        assert!(resolve_path("/assets/", dir.path()).is_none());
    }
}
