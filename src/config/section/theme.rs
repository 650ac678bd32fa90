//! `[theme]` section configuration.
//!
//! ```toml
//! [theme]
//! definition = "theme.yaml"                     # relative to build.content
//! preference_key = "website-theme-preference"
//! preference_file = ".folio/preferences.json"   # relative to the project root
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::theme::PREFERENCE_KEY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Theme token file, relative to the content directory.
    pub definition: PathBuf,

    /// Key the color scheme setting is stored under.
    pub preference_key: String,

    /// JSON file backing the preference store.
    pub preference_file: PathBuf,
}

impl Default for ThemeSectionConfig {
    fn default() -> Self {
        Self {
            definition: "theme.yaml".into(),
            preference_key: PREFERENCE_KEY.into(),
            preference_file: ".folio/preferences.json".into(),
        }
    }
}

impl ThemeSectionConfig {
    pub const FIELD_PREFERENCE_KEY: FieldPath = FieldPath::new("theme.preference_key");
    pub const FIELD_DEFINITION: FieldPath = FieldPath::new("theme.definition");
    pub const FIELD_PREFERENCE_FILE: FieldPath = FieldPath::new("theme.preference_file");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.preference_key.trim().is_empty() {
            diag.error(Self::FIELD_PREFERENCE_KEY, "preference key is empty");
        } else if self.preference_key.trim() != self.preference_key {
            diag.warn(
                Self::FIELD_PREFERENCE_KEY,
                "leading or trailing spaces become part of the localStorage key",
            );
        }

        if self.definition.as_os_str().is_empty() {
            diag.error(Self::FIELD_DEFINITION, "theme definition path is empty");
        } else if !matches!(
            self.definition.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        ) {
            diag.error_with_hint(
                Self::FIELD_DEFINITION,
                format!("`{}` is not a YAML file", self.definition.display()),
                "theme tokens are read from a .yaml file such as theme.yaml",
            );
        }

        if self.preference_file.as_os_str().is_empty() {
            diag.error(Self::FIELD_PREFERENCE_FILE, "preference file path is empty");
        }
    }
}
