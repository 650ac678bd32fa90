//! Embedded static resources for folio.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `asset` - Embedded asset types with content-hash filenames
//! - `runtime` - Browser runtime (site.js, site.css) shipped with every page
//! - `init` - Scaffold files written by `folio init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::runtime::{SITE_JS, SiteJsVars};
//!
//! let vars = SiteJsVars::from_config(&config);
//! let url = SITE_JS.url_path_with_vars("/portfolio", &vars);
//! ```

mod asset;
mod template;

pub use asset::{ASSETS_DIR, AssetKind, EmbeddedAsset};
pub use template::{NoVars, Template, TemplateVars, placeholders, substitute};

pub mod runtime {
    use super::{AssetKind, EmbeddedAsset, NoVars, Template, TemplateVars};
    use crate::config::SiteConfig;
    use crate::tracker::MARKER_RATIO;
    use crate::ui::OPTIONS;

    /// Variables for site.js.
    pub struct SiteJsVars {
        pub storage_key: String,
        pub marker_ratio: f64,
    }

    impl SiteJsVars {
        pub fn new(storage_key: &str) -> Self {
            Self {
                storage_key: storage_key.to_string(),
                marker_ratio: MARKER_RATIO,
            }
        }

        pub fn from_config(config: &SiteConfig) -> Self {
            Self::new(&config.theme.preference_key)
        }
    }

    impl TemplateVars for SiteJsVars {
        fn bindings(&self) -> Vec<(&'static str, String)> {
            // serde_json quoting keeps arbitrary keys valid JS literals
            let key = serde_json::to_string(&self.storage_key)
                .unwrap_or_else(|_| "\"website-theme-preference\"".to_string());
            let settings: Vec<&str> = OPTIONS.iter().map(|o| o.value.as_str()).collect();
            vec![
                ("STORAGE_KEY", key),
                ("MARKER_RATIO", self.marker_ratio.to_string()),
                ("SETTINGS", serde_json::to_string(&settings).unwrap_or_else(|_| "[]".into())),
            ]
        }
    }

    /// Theme preference, active-section tracking, toggle and nav behavior.
    pub const SITE_JS: EmbeddedAsset<SiteJsVars> =
        EmbeddedAsset::new(AssetKind::JavaScript, "site", include_str!("runtime/site.js"));

    /// Inlined at the top of `<head>`: settles `data-color-scheme` from the
    /// visitor's stored or OS preference before first paint.
    pub const SCHEME_BOOT: Template<SiteJsVars> =
        Template::new(include_str!("runtime/scheme-boot.js"));

    /// Base layout and component styles over the theme variables.
    pub const SITE_CSS: EmbeddedAsset<NoVars> =
        EmbeddedAsset::new(AssetKind::Css, "site", include_str!("runtime/site.css"));
}

pub mod init {
    use super::{NoVars, Template, TemplateVars};

    /// Variables for folio.toml.
    pub struct ConfigVars<'a> {
        pub title: &'a str,
    }

    impl TemplateVars for ConfigVars<'_> {
        fn bindings(&self) -> Vec<(&'static str, String)> {
            let title = self.title.replace('\\', "\\\\").replace('"', "\\\"");
            vec![("TITLE", title)]
        }
    }

    pub const CONFIG_TOML: Template<ConfigVars<'static>> =
        Template::new(include_str!("init/folio.toml"));

    pub const THEME_YAML: Template<NoVars> = Template::new(include_str!("init/theme.yaml"));

    /// Sample sections as `(directory name, section.yaml)`.
    pub const SECTIONS: [(&str, Template<NoVars>); 2] = [
        (
            "about",
            Template::new(include_str!("init/sections/about/section.yaml")),
        ),
        (
            "publications",
            Template::new(include_str!("init/sections/publications/section.yaml")),
        ),
    ];
}

use crate::config::SiteConfig;
use anyhow::Result;
use std::path::Path;

/// Public URLs of the written runtime assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    pub script: String,
    pub stylesheet: String,
}

/// URLs the page links to, without writing anything.
pub fn asset_urls(config: &SiteConfig) -> AssetUrls {
    use runtime::{SITE_CSS, SITE_JS, SiteJsVars};

    let base = config.build.url_prefix();
    AssetUrls {
        script: SITE_JS.url_path_with_vars(&base, &SiteJsVars::from_config(config)),
        stylesheet: SITE_CSS.url_path_with_vars(&base, &NoVars),
    }
}

/// Write site.js and site.css into `output_dir/assets`, replacing older
/// versions.
pub fn write_embedded_assets(config: &SiteConfig, output_dir: &Path) -> Result<AssetUrls> {
    use runtime::{SITE_CSS, SITE_JS, SiteJsVars};

    std::fs::create_dir_all(output_dir)?;

    let vars = SiteJsVars::from_config(config);
    SITE_JS.cleanup_old(output_dir)?;
    SITE_JS.write_with_vars(output_dir, &vars)?;

    SITE_CSS.cleanup_old(output_dir)?;
    SITE_CSS.write_with_vars(output_dir, &NoVars)?;

    Ok(asset_urls(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::parse_section;
    use crate::theme::ThemeDefinition;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_js_vars() {
        let vars = runtime::SiteJsVars {
            storage_key: "my-key".into(),
            marker_ratio: 0.35,
        };
        let rendered = runtime::SITE_JS.render(&vars);
        assert!(rendered.contains("\"my-key\""));
        assert!(rendered.contains("0.35"));
        assert!(rendered.contains(r#"const SETTINGS = ["light","system","dark"];"#));
        assert!(placeholders(&rendered).is_empty());
        assert!(placeholders(&runtime::SITE_CSS.render(&NoVars)).is_empty());
        assert!(runtime::SCHEME_BOOT.unbound(&vars).is_empty());
    }

    #[test]
    fn test_asset_urls_use_base_path() {
        let mut config = test_parse_config("");
        config.build.base_path = "portfolio".into();
        let urls = asset_urls(&config);
        assert!(urls.script.starts_with("/portfolio/assets/site."));
        assert!(urls.script.ends_with(".js"));
        assert!(urls.stylesheet.starts_with("/portfolio/assets/site."));
        assert!(urls.stylesheet.ends_with(".css"));
    }

    #[test]
    fn test_write_embedded_assets() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");

        let urls = write_embedded_assets(&config, dir.path()).unwrap();
        let script = dir.path().join(urls.script.trim_start_matches('/'));
        let stylesheet = dir.path().join(urls.stylesheet.trim_start_matches('/'));
        assert!(script.is_file());
        assert!(stylesheet.is_file());

        // Rewriting keeps exactly one version per asset
        write_embedded_assets(&config, dir.path()).unwrap();
        let count = fs::read_dir(dir.path().join(ASSETS_DIR)).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_config_template_escapes_title() {
        let rendered = init::CONFIG_TOML.render(&init::ConfigVars {
            title: "Ada \"The Countess\" Lovelace",
        });
        let config: SiteConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(config.site.title, "Ada \"The Countess\" Lovelace");
    }

    #[test]
    fn test_init_files_are_valid() {
        let vars = init::ConfigVars { title: "Ada" };
        assert!(init::CONFIG_TOML.unbound(&vars).is_empty());

        ThemeDefinition::parse(Path::new("theme.yaml"), init::THEME_YAML.content()).unwrap();
        for (name, template) in init::SECTIONS {
            let record = parse_section(Path::new(name), template.content()).unwrap();
            assert_eq!(record.id, name);
        }
    }
}
