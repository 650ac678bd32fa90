//! Init target checks.
//!
//! `folio init` may run inside an existing directory (a fresh git clone, a
//! folder with a README) as long as nothing it scaffolds is already there.
//! `folio init <name>` always creates a new directory.

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::SECTIONS_DIR;

/// Where the site is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `folio init`: scaffold into the current directory
    CurrentDir,
    /// `folio init <name>`: create `<name>`, which must not exist
    NewDir,
}

/// Top-level paths `folio init` writes.
fn scaffold_paths(config: &SiteConfig) -> [PathBuf; 3] {
    [
        config.config_path.clone(),
        config.theme_definition_path(),
        config.build.content.join(SECTIONS_DIR),
    ]
}

/// Refuse to scaffold over an existing site.
///
/// In `CurrentDir` mode every colliding path is listed so the user can see
/// what an earlier init (or a hand-made site) left behind.
pub fn validate_target(config: &SiteConfig, mode: InitMode) -> Result<()> {
    let root = config.get_root();

    if mode == InitMode::NewDir {
        if root.exists() {
            bail!(
                "'{}' already exists; choose another name or run `folio init` inside it",
                root.display()
            );
        }
        return Ok(());
    }

    let existing: Vec<String> = scaffold_paths(config)
        .iter()
        .filter(|path| path.exists())
        .map(|path| config.root_relative(path).display().to_string())
        .collect();

    if !existing.is_empty() {
        bail!(
            "{} already contains a site ({}); use `folio init <name>` for a new one",
            root.display(),
            existing.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_at(root: &std::path::Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config.config_path = root.join("folio.toml");
        config.build.content = root.join("content");
        config.build.output = root.join("public");
        config
    }

    #[test]
    fn test_current_dir_allows_unrelated_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("README.md"), "# ada").unwrap();

        let config = config_at(temp.path());
        assert!(validate_target(&config, InitMode::CurrentDir).is_ok());
    }

    #[test]
    fn test_current_dir_lists_collisions() {
        let temp = TempDir::new().unwrap();
        let config = config_at(temp.path());
        fs::write(&config.config_path, "").unwrap();
        fs::create_dir_all(config.build.content.join(SECTIONS_DIR)).unwrap();

        let err = validate_target(&config, InitMode::CurrentDir)
            .unwrap_err()
            .to_string();
        assert!(err.contains("folio.toml"));
        assert!(err.contains("content/sections"));
        assert!(!err.contains("theme.yaml"));
    }

    #[test]
    fn test_new_dir_must_not_exist() {
        let temp = TempDir::new().unwrap();
        assert!(validate_target(&config_at(temp.path()), InitMode::NewDir).is_err());

        let fresh = config_at(&temp.path().join("portfolio"));
        assert!(validate_target(&fresh, InitMode::NewDir).is_ok());
    }
}
