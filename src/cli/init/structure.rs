//! Content scaffold: theme tokens and sample sections.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::SiteConfig;
use crate::content::SECTIONS_DIR;
use crate::embed::{NoVars, init};

/// File name every sample section is written as.
const SECTION_FILE: &str = "section.yaml";

/// Write `theme.yaml` and one folder per sample section under the content
/// directory. Returns the written paths.
pub fn create_structure(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let sections_dir = config.build.content.join(SECTIONS_DIR);
    let mut written = Vec::with_capacity(init::SECTIONS.len() + 1);

    let theme = config.theme_definition_path();
    write_file(&theme, &init::THEME_YAML.render(&NoVars))?;
    written.push(theme);

    for (name, template) in init::SECTIONS {
        let path = sections_dir.join(name).join(SECTION_FILE);
        write_file(&path, &template.render(&NoVars))?;
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write '{}'", path.display()))
}
