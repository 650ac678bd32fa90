//! `folio scheme`: read or change the stored color scheme preference.

use anyhow::Result;

use crate::{
    cli::{SchemeAction, build::load_theme},
    config::SiteConfig,
    log,
    theme::{ColorSchemeSetting, ResolvedColorScheme},
};

/// What `get` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeReport {
    pub setting: ColorSchemeSetting,
    /// Scheme the built page starts with
    pub resolved: ResolvedColorScheme,
}

pub fn run_scheme(config: &SiteConfig, action: Option<&SchemeAction>) -> Result<()> {
    match action {
        None | Some(SchemeAction::Get) => {
            let report = current_scheme(config)?;
            if report.setting == ColorSchemeSetting::System {
                log!("scheme"; "system (follows the visitor's OS, {} before the page script runs)", report.resolved);
            } else {
                log!("scheme"; "{}", report.setting);
            }
        }
        Some(SchemeAction::Set { value }) => {
            let resolved = store_scheme(config, *value)?;
            log!(
                "scheme";
                "stored {} in {}",
                value,
                config.root_relative(config.preference_path()).display()
            );
            crate::debug!("scheme"; "page starts as {}", resolved);
        }
    }
    Ok(())
}

/// Stored setting, or the theme default when nothing valid is stored.
pub fn current_scheme(config: &SiteConfig) -> Result<SchemeReport> {
    let theme = load_theme(config)?;
    Ok(SchemeReport {
        setting: theme.setting(),
        resolved: theme.resolved(),
    })
}

/// Persist `setting` through the theme state.
pub fn store_scheme(config: &SiteConfig, setting: ColorSchemeSetting) -> Result<ResolvedColorScheme> {
    let mut theme = load_theme(config)?;
    theme.set_scheme(setting)?;
    Ok(theme.resolved())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_project;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_comes_from_theme() {
        let dir = TempDir::new().unwrap();
        let config = test_project(dir.path());

        let report = current_scheme(&config).unwrap();
        assert_eq!(report.setting, ColorSchemeSetting::System);
        assert_eq!(report.resolved, ResolvedColorScheme::Light);
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let config = test_project(dir.path());

        assert_eq!(
            store_scheme(&config, ColorSchemeSetting::Dark).unwrap(),
            ResolvedColorScheme::Dark
        );
        let report = current_scheme(&config).unwrap();
        assert_eq!(report.setting, ColorSchemeSetting::Dark);

        let stored = fs::read_to_string(config.preference_path()).unwrap();
        assert!(stored.contains("\"website-theme-preference\": \"dark\""));
    }

    #[test]
    fn test_invalid_stored_value_ignored() {
        let dir = TempDir::new().unwrap();
        let config = test_project(dir.path());
        let path = config.preference_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"website-theme-preference": "sepia"}"#).unwrap();

        assert_eq!(
            current_scheme(&config).unwrap().setting,
            ColorSchemeSetting::System
        );
    }
}
