//! Color scheme resolution and theme token application.
//!
//! ```text
//! setting (stored) ─┐
//!                   ├─ resolve_scheme ─► ResolvedColorScheme ─► style_variables ─► root
//! OS scheme ────────┘
//! ```

pub(crate) mod definition;
mod error;
mod preference;
mod scheme;
mod state;
mod system;
mod tokens;

pub use definition::ThemeDefinition;
pub use error::ThemeError;
pub use preference::{
    FilePreferenceStore, MemoryPreferenceStore, PREFERENCE_KEY, PreferenceStore,
    read_stored_scheme,
};
pub use scheme::{ColorSchemeSetting, ResolvedColorScheme, resolve_scheme};
pub use state::{RootElement, SCHEME_ATTRIBUTE, StyleTarget, ThemeState};
pub use system::SystemScheme;
pub use tokens::{StyleVars, scheme_stylesheet, style_variables};
