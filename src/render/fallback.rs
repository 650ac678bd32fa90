//! Placeholder shown while a section's renderer is pending.

use crate::utils::html::escape_attr;

pub fn render_fallback(title: &str) -> String {
    format!(
        concat!(
            "<section class=\"section section--fallback\" aria-busy=\"true\" aria-label=\"{}\">\n",
            "<div class=\"section__inner\">\n",
            "<div class=\"skeleton\"></div>\n",
            "<div class=\"skeleton skeleton--wide\"></div>\n",
            "</div>\n",
            "</section>\n"
        ),
        escape_attr(title)
    )
}
