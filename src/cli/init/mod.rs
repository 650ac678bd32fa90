//! Site initialization module.
//!
//! Creates a new portfolio with default configuration, theme and sample
//! sections.
//!
//! # Module Structure
//!
//! - [`validate`]: Refuses to scaffold over an existing site
//! - [`structure`]: Content scaffold
//! - [`config`]: Configuration and ignore files

mod config;
mod structure;
mod validate;

use crate::{config::SiteConfig, log};
use anyhow::Result;

pub use validate::InitMode;

#[cfg(test)]
pub(crate) use structure::create_structure;

/// Create a new site with default structure
///
/// # Steps
/// 1. Validate target directory
/// 2. Write theme and sample sections
/// 3. Write configuration and ignore files
pub fn new_site(site_config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = site_config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    validate::validate_target(site_config, mode)?;

    let written = structure::create_structure(site_config)?;

    let title = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "My Portfolio".to_string());
    config::write_config(&site_config.config_path, &title)?;

    let output_dir = site_config.root_relative(&site_config.build.output);
    let preference_file = site_config.root_relative(site_config.preference_path());
    config::write_ignore_files(root, &output_dir, &preference_file)?;

    for path in &written {
        crate::debug!("init"; "wrote {}", site_config.root_relative(path).display());
    }
    log!("init"; "site initialized in {}", root.display());
    Ok(())
}
