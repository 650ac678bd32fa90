//! Theme state: the persisted setting, the observed OS scheme, and the
//! style target the resolved tokens are written to.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;

use super::definition::ThemeDefinition;
use super::error::ThemeError;
use super::preference::{PreferenceStore, read_stored_scheme};
use super::scheme::{ColorSchemeSetting, ResolvedColorScheme, resolve_scheme};
use super::system::SystemScheme;
use super::tokens::{StyleVars, style_variables};

/// Root attribute carrying the resolved scheme.
pub const SCHEME_ATTRIBUTE: &str = "data-color-scheme";

/// Something the resolved token set can be written onto.
pub trait StyleTarget {
    /// Replace all theme properties in one step.
    fn apply_theme(&mut self, scheme: ResolvedColorScheme, vars: &StyleVars);
}

// ============================================================================
// Root element
// ============================================================================

/// In-memory document root. At build time its state becomes the
/// attributes of `<html>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootElement {
    properties: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    writes: usize,
}

impl RootElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Number of theme applications so far.
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Inline `style` attribute value.
    pub fn style_attr(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl StyleTarget for RootElement {
    fn apply_theme(&mut self, scheme: ResolvedColorScheme, vars: &StyleVars) {
        let mut properties: BTreeMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        properties.insert("color-scheme".to_string(), scheme.as_str().to_string());

        self.properties = properties;
        self.attributes
            .insert(SCHEME_ATTRIBUTE.to_string(), scheme.as_str().to_string());
        self.writes += 1;
    }
}

// ============================================================================
// Theme state
// ============================================================================

/// Owns the color scheme setting and keeps the style target in sync with it.
///
/// Holds a subscription to the OS scheme for its whole lifetime; dropping the
/// state releases it.
pub struct ThemeState<R: StyleTarget = RootElement> {
    definition: Arc<ThemeDefinition>,
    store: Arc<dyn PreferenceStore>,
    key: String,
    setting: ColorSchemeSetting,
    os: ResolvedColorScheme,
    system: watch::Receiver<ResolvedColorScheme>,
    resolved: watch::Sender<ResolvedColorScheme>,
    applied: Option<ResolvedColorScheme>,
    root: R,
}

impl<R: StyleTarget> ThemeState<R> {
    /// Build the state and apply the initial scheme to `root`.
    ///
    /// A valid stored setting wins over the definition default.
    pub fn new(
        definition: Arc<ThemeDefinition>,
        store: Arc<dyn PreferenceStore>,
        key: impl Into<String>,
        system: &SystemScheme,
        root: R,
    ) -> Self {
        let key = key.into();
        let setting =
            read_stored_scheme(store.as_ref(), &key).unwrap_or(definition.default_scheme);
        let mut rx = system.subscribe();
        let os = *rx.borrow_and_update();
        let (resolved, _) = watch::channel(resolve_scheme(setting, os));

        let mut state = Self {
            definition,
            store,
            key,
            setting,
            os,
            system: rx,
            resolved,
            applied: None,
            root,
        };
        state.refresh();
        crate::debug!("theme"; "initial scheme {} (setting {})", state.resolved(), setting);
        state
    }

    pub const fn setting(&self) -> ColorSchemeSetting {
        self.setting
    }

    pub fn resolved(&self) -> ResolvedColorScheme {
        *self.resolved.borrow()
    }

    pub const fn os_scheme(&self) -> ResolvedColorScheme {
        self.os
    }

    pub fn definition(&self) -> &ThemeDefinition {
        &self.definition
    }

    pub const fn root(&self) -> &R {
        &self.root
    }

    /// Observe the resolved scheme.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedColorScheme> {
        self.resolved.subscribe()
    }

    /// Persist `setting` and re-resolve.
    pub fn set_scheme(&mut self, setting: ColorSchemeSetting) -> Result<(), ThemeError> {
        self.store.set(&self.key, setting.as_str())?;
        self.setting = setting;
        self.refresh();
        Ok(())
    }

    /// Take in a new OS scheme. Returns whether the root was rewritten.
    pub fn set_system_scheme(&mut self, os: ResolvedColorScheme) -> bool {
        self.os = os;
        self.refresh()
    }

    /// Pull a pending OS change from the subscription, if any.
    pub fn sync_system(&mut self) -> bool {
        if !self.system.has_changed().unwrap_or(false) {
            return false;
        }
        let os = *self.system.borrow_and_update();
        self.set_system_scheme(os)
    }

    /// Wait for the next OS change and apply it. Returns `false` once the
    /// source is gone.
    pub async fn next_system_change(&mut self) -> bool {
        if self.system.changed().await.is_err() {
            return false;
        }
        let os = *self.system.borrow_and_update();
        self.set_system_scheme(os);
        true
    }

    fn refresh(&mut self) -> bool {
        let scheme = resolve_scheme(self.setting, self.os);
        self.resolved.send_if_modified(|current| {
            let changed = *current != scheme;
            *current = scheme;
            changed
        });
        self.apply(scheme)
    }

    /// Write the token set for `scheme` unless it is already applied.
    fn apply(&mut self, scheme: ResolvedColorScheme) -> bool {
        if self.applied == Some(scheme) {
            return false;
        }
        let vars = style_variables(&self.definition, scheme);
        self.root.apply_theme(scheme, &vars);
        self.applied = Some(scheme);
        true
    }
}
