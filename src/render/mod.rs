//! Section renderers and shared markup helpers.

mod fallback;
mod inline;
mod publications;
mod rich_text;

pub use fallback::render_fallback;
pub use inline::render_inline;
pub use publications::{PublicationListRenderer, render_publications};
pub use rich_text::{RichTextRenderer, heading_level, render_rich_text};

/// Class list of a `<section>` landmark.
pub(crate) fn section_class(modifier: &str, is_active: bool) -> String {
    if is_active {
        format!("section {modifier} section--active")
    } else {
        format!("section {modifier}")
    }
}
