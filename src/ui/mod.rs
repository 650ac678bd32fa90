//! Navigation bar, theme toggle and the page shell.
//!
//! The widgets are plain state machines driven by [`Key`] and pointer
//! events; `render` methods produce the markup the browser runtime attaches
//! to.

mod nav;
mod page;
mod toggle;

pub use nav::{NavigationBar, NavigationItem};
pub use page::{PageMeta, render_loading_page, render_not_found, render_page};
pub use toggle::{Focus, OPTIONS, PointerTarget, ThemeToggle, ToggleOption};

/// Keys the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }
}
