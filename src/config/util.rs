//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Path component of a URL without surrounding slashes.
///
/// Port, credentials, query and fragment are ignored. Returns `None` if the
/// URL does not parse.
///
/// ```ignore
/// extract_url_path("https://ada.github.io/portfolio/") -> Some("portfolio")
/// extract_url_path("https://example.com")              -> Some("")
/// extract_url_path("invalid")                          -> None
/// ```
pub fn extract_url_path(url_str: &str) -> Option<String> {
    let parsed = url::Url::parse(url_str).ok()?;
    Some(parsed.path().trim_matches('/').to_string())
}

/// Find config file by searching upward from the current directory.
///
/// ```text
/// /home/ada/site/content/sections/  ← cwd
/// /home/ada/site/folio.toml         ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

fn find_upward(start: &Path, config_name: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}
