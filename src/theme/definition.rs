//! Theme token tree parsed from `theme.yaml`.
//!
//! Both palettes share one struct, so a color role missing from either
//! scheme is a parse error rather than a lookup miss at resolution time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ThemeError;
use super::scheme::{ColorSchemeSetting, ResolvedColorScheme};

/// Shadow token every scheme must define.
pub const REQUIRED_SHADOW: &str = "medium";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    #[serde(default)]
    pub default_scheme: ColorSchemeSetting,
    pub schemes: Schemes,
    pub typography: Typography,
    #[serde(default)]
    pub spacing: BTreeMap<String, f64>,
    #[serde(default)]
    pub radii: BTreeMap<String, f64>,
    pub layout: LayoutTokens,
    /// Shared shadows; per-scheme shadows override these by name.
    #[serde(default)]
    pub shadows: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schemes {
    pub light: SchemeTokens,
    pub dark: SchemeTokens,
}

impl Schemes {
    pub const fn get(&self, scheme: ResolvedColorScheme) -> &SchemeTokens {
        match scheme {
            ResolvedColorScheme::Light => &self.light,
            ResolvedColorScheme::Dark => &self.dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeTokens {
    pub colors: ColorPalette,
    #[serde(default)]
    pub shadows: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub background: String,
    pub surface: String,
    pub surface_alt: String,
    pub text: String,
    pub text_muted: String,
    pub primary: String,
    pub primary_contrast: String,
    pub accent: String,
    pub border: String,
}

impl ColorPalette {
    /// `(role, value)` pairs, role in kebab-case as used by style variables.
    pub fn roles(&self) -> [(&'static str, &str); 9] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("surface-alt", &self.surface_alt),
            ("text", &self.text),
            ("text-muted", &self.text_muted),
            ("primary", &self.primary),
            ("primary-contrast", &self.primary_contrast),
            ("accent", &self.accent),
            ("border", &self.border),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub heading_family: String,
    pub base_size: f64,
    #[serde(default)]
    pub line_heights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTokens {
    pub content_width: f64,
    pub section_gap: f64,
    pub nav_height: f64,
    pub max_width_narrow: f64,
}

impl ThemeDefinition {
    /// Load and validate a definition file.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text =
            fs::read_to_string(path).map_err(|err| ThemeError::Io(path.to_path_buf(), err))?;
        Self::parse(path, &text)
    }

    /// Parse and validate definition text. `path` is only used in errors.
    pub fn parse(path: &Path, text: &str) -> Result<Self, ThemeError> {
        let definition: Self = serde_yaml::from_str(text).map_err(|error| ThemeError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        definition.validate(path)?;
        Ok(definition)
    }

    fn validate(&self, path: &Path) -> Result<(), ThemeError> {
        for scheme in [ResolvedColorScheme::Light, ResolvedColorScheme::Dark] {
            let has_medium = self.schemes.get(scheme).shadows.contains_key(REQUIRED_SHADOW)
                || self.shadows.contains_key(REQUIRED_SHADOW);
            if !has_medium {
                return Err(ThemeError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("schemes.{scheme}.shadows.{REQUIRED_SHADOW} is required"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Complete theme used across theme/ui tests.
    pub const THEME_YAML: &str = r##"
defaultScheme: system
schemes:
  light:
    colors:
      background: "#ffffff"
      surface: "#f7f7f8"
      surfaceAlt: "#eeeef0"
      text: "#1b1b1f"
      textMuted: "#5b5b66"
      primary: "#2b59c3"
      primaryContrast: "#ffffff"
      accent: "#d9480f"
      border: "#dcdce0"
    shadows:
      medium: "0 4px 12px rgba(0,0,0,0.08)"
  dark:
    colors:
      background: "#111114"
      surface: "#1a1a1f"
      surfaceAlt: "#232329"
      text: "#ececf1"
      textMuted: "#a0a0ab"
      primary: "#7aa2ff"
      primaryContrast: "#0b0b0e"
      accent: "#ff922b"
      border: "#2e2e36"
    shadows:
      medium: "0 4px 12px rgba(0,0,0,0.5)"
typography:
  fontFamily: "Inter, sans-serif"
  headingFamily: "Georgia, serif"
  baseSize: 16
  lineHeights:
    snug: 1.3
spacing:
  sm: 8
  md: 16
radii:
  md: 10
layout:
  contentWidth: 960
  sectionGap: 96
  navHeight: 64
  maxWidthNarrow: 720
shadows:
  soft: "0 1px 2px rgba(0,0,0,0.05)"
"##;
}

#[cfg(test)]
mod tests {
    use super::fixtures::THEME_YAML;
    use super::*;

    fn parse(text: &str) -> Result<ThemeDefinition, ThemeError> {
        ThemeDefinition::parse(Path::new("theme.yaml"), text)
    }

    #[test]
    fn test_parse_full_definition() {
        let def = parse(THEME_YAML).unwrap();
        assert_eq!(def.default_scheme, ColorSchemeSetting::System);
        assert_eq!(def.schemes.dark.colors.primary, "#7aa2ff");
        assert_eq!(def.typography.base_size, 16.0);
        assert_eq!(def.spacing.get("md"), Some(&16.0));
        assert_eq!(def.layout.nav_height, 64.0);
    }

    #[test]
    fn test_default_scheme_falls_back_to_system() {
        let text = THEME_YAML.replace("defaultScheme: system\n", "");
        let def = parse(&text).unwrap();
        assert_eq!(def.default_scheme, ColorSchemeSetting::System);
    }

    #[test]
    fn test_missing_color_role_is_parse_error() {
        let text = THEME_YAML.replacen("      accent: \"#ff922b\"\n", "", 1);
        assert!(matches!(parse(&text), Err(ThemeError::Parse { .. })));
    }

    #[test]
    fn test_missing_medium_shadow_is_rejected() {
        let text = THEME_YAML.replace(
            "      medium: \"0 4px 12px rgba(0,0,0,0.5)\"\n",
            "      glow: \"none\"\n",
        );
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("schemes.dark.shadows.medium"));
    }

    #[test]
    fn test_palette_roles_cover_every_color() {
        let def = parse(THEME_YAML).unwrap();
        let roles = def.schemes.light.colors.roles();
        assert_eq!(roles.len(), 9);
        assert!(roles.contains(&("surface-alt", "#eeeef0")));
    }
}
