//! Embedded assets written with a content-hash filename.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::template::{TemplateVars, substitute};

/// Output subdirectory for embedded assets.
pub const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    JavaScript,
    Css,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Css => "css",
        }
    }
}

/// Compute a 12-char filename hash.
pub fn filename_hash(content: &[u8]) -> String {
    let hash = blake3::hash(content);
    hex::encode(&hash.as_bytes()[..6])
}

/// Static asset rendered with `V` and published as `assets/<name>.<hash>.<ext>`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            content,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Delete previously written versions of this asset.
    pub fn cleanup_old(&self, output_dir: &Path) -> io::Result<()> {
        let dir = output_dir.join(ASSETS_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        let prefix = format!("{}.", self.name);
        let suffix = format!(".{}", self.kind.extension());
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.starts_with(&prefix) && file_name.ends_with(&suffix) {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub fn render(&self, vars: &V) -> String {
        substitute(self.content, vars)
    }

    pub fn filename_with_vars(&self, vars: &V) -> String {
        let rendered = self.render(vars);
        self.filename_for(&rendered)
    }

    fn filename_for(&self, rendered: &str) -> String {
        format!(
            "{}.{}.{}",
            self.name,
            filename_hash(rendered.as_bytes()),
            self.kind.extension()
        )
    }

    /// Public URL under `base_path` (`""` or `/prefix`).
    pub fn url_path_with_vars(&self, base_path: &str, vars: &V) -> String {
        format!("{base_path}/{ASSETS_DIR}/{}", self.filename_with_vars(vars))
    }

    /// Render and write the asset. Returns the written path.
    pub fn write_with_vars(&self, output_dir: &Path, vars: &V) -> io::Result<PathBuf> {
        let rendered = self.render(vars);
        let dir = output_dir.join(ASSETS_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(self.filename_for(&rendered));
        fs::write(&path, rendered)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::NoVars;
    use tempfile::TempDir;

    const ASSET: EmbeddedAsset<NoVars> = EmbeddedAsset::new(AssetKind::Css, "demo", "body {}");

    #[test]
    fn test_filename_hash_is_stable() {
        assert_eq!(filename_hash(b"a"), filename_hash(b"a"));
        assert_ne!(filename_hash(b"a"), filename_hash(b"b"));
        assert_eq!(filename_hash(b"a").len(), 12);
    }

    #[test]
    fn test_url_path() {
        let url = ASSET.url_path_with_vars("/site", &NoVars);
        assert!(url.starts_with("/site/assets/demo."));
        assert!(url.ends_with(".css"));
    }

    #[test]
    fn test_write_and_cleanup() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("assets/demo.000000000000.css");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();
        let other = dir.path().join("assets/other.css");
        fs::write(&other, "keep").unwrap();

        ASSET.cleanup_old(dir.path()).unwrap();
        let written = ASSET.write_with_vars(dir.path(), &NoVars).unwrap();

        assert!(!stale.exists());
        assert!(other.exists());
        assert_eq!(fs::read_to_string(written).unwrap(), "body {}");
    }
}
