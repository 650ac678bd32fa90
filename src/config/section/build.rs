//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "content"   # section and theme files
//! output = "public"     # generated site
//! base_path = ""        # URL prefix, overridden by the path of site.url
//! minify = true
//! clean = false
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content directory.
    pub content: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// URL prefix for assets, e.g. `portfolio` for `/portfolio/assets/...`.
    pub base_path: String,

    /// Drop whitespace between tags in generated HTML.
    pub minify: bool,

    /// Empty the output directory before building.
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            base_path: String::new(),
            minify: true,
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    pub const FIELD_CONTENT: FieldPath = FieldPath::new("build.content");
    pub const FIELD_OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const FIELD_BASE_PATH: FieldPath = FieldPath::new("build.base_path");

    /// Base path as a URL prefix: `""` or `/a/b`.
    pub fn url_prefix(&self) -> String {
        let trimmed = self.base_path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Expects already-normalized (absolute) paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.content == self.output {
            diag.error_with_hint(
                Self::FIELD_OUTPUT,
                "output directory is the content directory",
                "building would overwrite your content; choose another `output`",
            );
        } else if self.content.starts_with(&self.output) {
            diag.error(
                Self::FIELD_OUTPUT,
                "content directory lies inside the output directory",
            );
        }

        if self.base_path.contains(['?', '#', ' ']) {
            diag.error(
                Self::FIELD_BASE_PATH,
                format!("`{}` is not a plain URL path", self.base_path),
            );
        }
    }
}
