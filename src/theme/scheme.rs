//! Color scheme setting and its resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Concrete scheme the page is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedColorScheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedColorScheme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Map a `prefers-color-scheme: dark` match to a scheme.
    pub const fn from_dark_preference(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ResolvedColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSchemeSetting {
    Light,
    Dark,
    #[default]
    System,
}

impl ColorSchemeSetting {
    /// Menu order of the theme toggle.
    pub const ALL: [Self; 3] = [Self::Light, Self::System, Self::Dark];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a stored value. Anything but the three literals is `None`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSchemeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSchemeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_stored(s.trim())
            .ok_or_else(|| format!("invalid color scheme `{s}` (expected light, dark or system)"))
    }
}

impl From<ResolvedColorScheme> for ColorSchemeSetting {
    fn from(scheme: ResolvedColorScheme) -> Self {
        match scheme {
            ResolvedColorScheme::Light => Self::Light,
            ResolvedColorScheme::Dark => Self::Dark,
        }
    }
}

/// `system` follows the OS; explicit settings win.
#[inline]
pub const fn resolve_scheme(
    setting: ColorSchemeSetting,
    system: ResolvedColorScheme,
) -> ResolvedColorScheme {
    match setting {
        ColorSchemeSetting::System => system,
        ColorSchemeSetting::Light => ResolvedColorScheme::Light,
        ColorSchemeSetting::Dark => ResolvedColorScheme::Dark,
    }
}
