//! Theme tokens → CSS custom properties.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::definition::ThemeDefinition;
use super::scheme::ResolvedColorScheme;

const DEFAULT_LINE_HEIGHT_SNUG: f64 = 1.25;
const DEFAULT_LINE_HEIGHT_NORMAL: f64 = 1.6;

/// Flat, ordered set of `--name: value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleVars(Vec<(String, String)>);

impl StyleVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing an earlier value of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as CSS declarations, one per line, indented by `indent`.
    pub fn to_declarations(&self, indent: &str) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            let _ = writeln!(out, "{indent}{name}: {value};");
        }
        out
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Map every token of `scheme` plus the shared scales to style variables.
pub fn style_variables(definition: &ThemeDefinition, scheme: ResolvedColorScheme) -> StyleVars {
    let tokens = definition.schemes.get(scheme);
    let typography = &definition.typography;
    let layout = &definition.layout;
    let mut vars = StyleVars::new();

    for (role, value) in tokens.colors.roles() {
        vars.set(format!("--color-{role}"), value);
    }

    vars.set("--font-family-base", typography.font_family.as_str());
    vars.set("--font-family-heading", typography.heading_family.as_str());
    vars.set("--font-size-base", px(typography.base_size));
    let line_height = |name: &str, fallback: f64| {
        typography
            .line_heights
            .get(name)
            .copied()
            .unwrap_or(fallback)
            .to_string()
    };
    vars.set("--line-height-snug", line_height("snug", DEFAULT_LINE_HEIGHT_SNUG));
    vars.set(
        "--line-height-normal",
        line_height("normal", DEFAULT_LINE_HEIGHT_NORMAL),
    );

    vars.set("--layout-content-width", px(layout.content_width));
    vars.set("--layout-max-width-narrow", px(layout.max_width_narrow));
    vars.set("--layout-section-gap", px(layout.section_gap));
    vars.set("--layout-nav-height", px(layout.nav_height));

    for (token, value) in &definition.spacing {
        vars.set(format!("--space-{token}"), px(*value));
    }
    for (token, value) in &definition.radii {
        vars.set(format!("--radius-{token}"), px(*value));
    }

    let mut shadows: BTreeMap<&str, &str> = definition
        .shadows
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    for (token, value) in &tokens.shadows {
        shadows.insert(token.as_str(), value.as_str());
    }
    for (token, value) in shadows {
        vars.set(format!("--shadow-{token}"), value);
    }

    vars
}

/// Stylesheet carrying both schemes, keyed on the root `data-color-scheme`.
pub fn scheme_stylesheet(definition: &ThemeDefinition) -> String {
    let mut css = String::new();
    for scheme in [ResolvedColorScheme::Light, ResolvedColorScheme::Dark] {
        let vars = style_variables(definition, scheme);
        let _ = writeln!(css, ":root[data-color-scheme=\"{scheme}\"] {{");
        css.push_str(&vars.to_declarations("  "));
        let _ = writeln!(css, "  color-scheme: {scheme};\n}}");
    }
    css
}
