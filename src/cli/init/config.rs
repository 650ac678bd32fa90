//! Configuration file generation.
//!
//! Creates folio.toml and ignore files for new sites.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::embed::init::{CONFIG_TOML, ConfigVars};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Write the default configuration with `title` filled in.
pub fn write_config(path: &Path, title: &str) -> Result<()> {
    let content = CONFIG_TOML.render(&ConfigVars { title });

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Write .gitignore and .ignore files
///
/// Patterns include:
/// - Output directory (e.g., `/public/`)
/// - Preference store directory (`/.folio/`)
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path, output_dir: &Path, preference_file: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let preference_pattern = preference_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(
            || Path::new("/").join(preference_file),
            |dir| Path::new("/").join(dir),
        );
    let patterns = [
        output_pattern.to_string_lossy().into_owned(),
        preference_pattern.to_string_lossy().into_owned(),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Never overwrite the user's ignore files
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
