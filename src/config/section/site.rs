//! `[site]` section configuration.
//!
//! Page metadata written into the document head.
//!
//! ```toml
//! [site]
//! title = "Ada Lovelace"
//! description = "Research and publications"
//! author = "Ada Lovelace"
//! url = "https://ada.github.io/portfolio"   # path becomes the base path
//! lang = "en"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Page title.
    pub title: String,

    /// Meta description.
    pub description: String,

    /// Author name.
    pub author: Option<String>,

    /// Public site URL.
    pub url: Option<String>,

    /// Document language.
    pub lang: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: None,
            url: None,
            lang: "en".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const FIELD_TITLE: FieldPath = FieldPath::new("site.title");
    pub const FIELD_URL: FieldPath = FieldPath::new("site.url");
    pub const FIELD_LANG: FieldPath = FieldPath::new("site.lang");

    /// # Checks
    /// - `title` is not empty
    /// - `url`, when set, is an absolute http(s) URL
    /// - `lang` is not empty
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::FIELD_TITLE, "site title is empty");
        }

        if let Some(url) = &self.url {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => diag.error(
                    Self::FIELD_URL,
                    format!("unsupported scheme `{}`", parsed.scheme()),
                ),
                Err(e) => diag.error_with_hint(
                    Self::FIELD_URL,
                    format!("invalid URL `{url}`: {e}"),
                    "use a full URL such as https://example.com/",
                ),
            }
        }

        if self.lang.trim().is_empty() {
            diag.error(Self::FIELD_LANG, "language code is empty");
        }
    }
}
