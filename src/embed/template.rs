//! `__FOLIO_NAME__` placeholders in embedded files.
//!
//! Runtime assets and init scaffolds carry placeholders such as
//! `__FOLIO_STORAGE_KEY__`. A [`TemplateVars`] set binds names to values;
//! anything it does not bind is left in place and reported by
//! [`Template::unbound`].

use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__FOLIO_([A-Z0-9_]+?)__").unwrap());

/// Values for a template's placeholders.
pub trait TemplateVars {
    /// `(NAME, value)` pairs; `NAME` fills `__FOLIO_NAME__`.
    fn bindings(&self) -> Vec<(&'static str, String)>;
}

/// Files without placeholders.
pub struct NoVars;

impl TemplateVars for NoVars {
    fn bindings(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Replace every bound placeholder in `content`.
pub fn substitute(content: &str, vars: &impl TemplateVars) -> String {
    let bindings = vars.bindings();
    if bindings.is_empty() {
        return content.to_string();
    }

    PLACEHOLDER
        .replace_all(content, |caps: &regex::Captures<'_>| {
            bindings
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.clone())
        })
        .into_owned()
}

/// Placeholder names still present in `content`, in order, deduplicated.
pub fn placeholders(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(content) {
        if !names.iter().any(|name| name == &caps[1]) {
            names.push(caps[1].to_string());
        }
    }
    names
}

/// Embedded text file rendered with `V`.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        substitute(self.content, vars)
    }

    /// Placeholders `vars` leaves unfilled.
    pub fn unbound(&self, vars: &V) -> Vec<String> {
        placeholders(&self.render(vars))
    }
}
