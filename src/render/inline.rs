//! Inline text markup: `[label](https://...)` links and hard line breaks.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::html::{escape, escape_attr};

static RE_INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap());

/// Render a text run to HTML.
///
/// Links open in a new tab; `\n` becomes `<br>`. Everything else is escaped.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in RE_INLINE_LINK.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        push_lines(&mut out, &text[last..whole.start()]);
        out.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noreferrer noopener">{}</a>"#,
            escape_attr(url.as_str()),
            escape(label.as_str())
        ));
        last = whole.end();
    }
    push_lines(&mut out, &text[last..]);
    out
}

fn push_lines(out: &mut String, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<br>");
        }
        out.push_str(&escape(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(render_inline("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render_inline("see [docs](https://example.com/a) now"),
            r#"see <a href="https://example.com/a" target="_blank" rel="noreferrer noopener">docs</a> now"#
        );
    }

    #[test]
    fn test_non_http_link_stays_text() {
        assert_eq!(render_inline("[x](ftp://host)"), "[x](ftp://host)");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(render_inline("one\ntwo\n"), "one<br>two<br>");
    }

    #[test]
    fn test_links_and_breaks() {
        let html = render_inline("[a](http://a.io)\n[b](http://b.io)");
        assert_eq!(html.matches("<a ").count(), 2);
        assert!(html.contains("</a><br><a "));
    }
}
