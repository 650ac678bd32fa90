//! HTML utility functions.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `minify()` - drop whitespace-only text between tags

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Escape HTML attribute values.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Minify
// =============================================================================

/// Elements whose content is copied verbatim.
const VERBATIM_ELEMENTS: &[&str] = &["script", "style", "pre", "textarea"];

/// Check if an element's text must not be touched by `minify`.
pub fn is_verbatim_element(tag: &str) -> bool {
    VERBATIM_ELEMENTS.contains(&tag)
}

/// Remove line-breaking whitespace-only text between tags.
///
/// Whitespace on a single line is kept so inline elements stay separated.
/// Content of `script`, `style`, `pre` and `textarea` is left as is.
pub fn minify(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        push_text(&mut out, &rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('>') else {
            out.push_str(tail);
            return out;
        };
        let tag = &tail[..=close];
        out.push_str(tag);
        rest = &tail[close + 1..];

        if let Some(name) = opening_tag_name(tag)
            && is_verbatim_element(&name)
        {
            let end = format!("</{name}");
            let split = rest.find(&end).unwrap_or(rest.len());
            out.push_str(&rest[..split]);
            rest = &rest[split..];
        }
    }
    push_text(&mut out, rest);
    out
}

fn push_text(out: &mut String, text: &str) {
    if text.trim().is_empty() && text.contains('\n') {
        return;
    }
    out.push_str(text);
}

fn opening_tag_name(tag: &str) -> Option<String> {
    let inner = tag.strip_prefix('<')?;
    if inner.starts_with(['/', '!', '?']) {
        return None;
    }
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}
