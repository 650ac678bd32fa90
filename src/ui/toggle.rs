//! Three-way color scheme menu.
//!
//! Keyboard model: on the trigger ArrowDown, Enter and Space open the menu
//! with focus on the current setting. Inside the menu the arrows move focus
//! circularly, Home/End jump to the ends, Escape closes and returns focus
//! to the trigger, Tab closes and lets focus move on.
//!
//! The build renders the menu markup and, through [`OPTIONS`], the setting
//! list `site.js` accepts. The focus machine below is the reference for the
//! script's keyboard handling.

use crate::theme::{ColorSchemeSetting, ResolvedColorScheme, StyleTarget, ThemeError, ThemeState};
use crate::utils::html::escape_attr;

use super::Key;

#[derive(Debug, Clone, Copy)]
pub struct ToggleOption {
    pub value: ColorSchemeSetting,
    pub label: &'static str,
    icon: &'static str,
}

/// Menu entries in display order.
pub const OPTIONS: [ToggleOption; 3] = [
    ToggleOption {
        value: ColorSchemeSetting::Light,
        label: "Light",
        icon: SUN_ICON,
    },
    ToggleOption {
        value: ColorSchemeSetting::System,
        label: "Auto",
        icon: SYSTEM_ICON,
    },
    ToggleOption {
        value: ColorSchemeSetting::Dark,
        label: "Dark",
        icon: MOON_ICON,
    },
];

const SUN_ICON: &str = concat!(
    "<circle cx=\"12\" cy=\"12\" r=\"4\"/>",
    "<path d=\"M12 3v2\"/><path d=\"M12 19v2\"/>",
    "<path d=\"M5.22 5.22 6.64 6.64\"/><path d=\"M17.36 17.36 18.78 18.78\"/>",
    "<path d=\"M3 12h2\"/><path d=\"M19 12h2\"/>",
    "<path d=\"M5.22 18.78 6.64 17.36\"/><path d=\"M17.36 6.64 18.78 5.22\"/>"
);

const MOON_ICON: &str = concat!(
    "<path d=\"M21 12.8A9 9 0 1 1 11.2 3a7 7 0 0 0 9.8 9.8Z\"/>",
    "<path d=\"M15.5 6.5a3 3 0 0 0 3 3\"/>"
);

const SYSTEM_ICON: &str = concat!(
    "<rect x=\"3\" y=\"4\" width=\"18\" height=\"13\" rx=\"2\"/>",
    "<path d=\"M8 21h8\"/><path d=\"M12 17v4\"/>"
);

fn svg(class: &str, body: &str) -> String {
    format!(
        "<svg class=\"{class}\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" \
         stroke-width=\"1.6\" stroke-linecap=\"round\" stroke-linejoin=\"round\" \
         aria-hidden=\"true\" focusable=\"false\">{body}</svg>"
    )
}

fn option_index(setting: ColorSchemeSetting) -> usize {
    OPTIONS
        .iter()
        .position(|option| option.value == setting)
        .unwrap_or(0)
}

/// Where keyboard focus is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Somewhere else on the page.
    Elsewhere,
    Trigger,
    /// Menu item at this index of [`OPTIONS`].
    Option(usize),
}

/// Target of a pointer press while the menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Trigger,
    Menu,
    Outside,
}

#[derive(Debug, Clone)]
pub struct ThemeToggle {
    open: bool,
    focus: Focus,
}

impl Default for ThemeToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeToggle {
    pub const fn new() -> Self {
        Self {
            open: false,
            focus: Focus::Elsewhere,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Focus the trigger (e.g. by tabbing onto it).
    pub fn focus_trigger(&mut self) {
        self.focus = Focus::Trigger;
    }

    /// Open with focus on the current setting. No-op when already open.
    pub fn open(&mut self, current: ColorSchemeSetting) {
        if self.open {
            return;
        }
        self.open = true;
        self.focus = Focus::Option(option_index(current));
    }

    /// Close and return focus to the trigger. No-op when closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.focus = Focus::Trigger;
    }

    pub fn click_trigger(&mut self, current: ColorSchemeSetting) {
        if self.open {
            self.close();
        } else {
            self.open(current);
        }
    }

    /// Key pressed on the trigger. Returns whether the key was consumed.
    pub fn trigger_key(&mut self, key: Key, current: ColorSchemeSetting) -> bool {
        match key {
            Key::ArrowDown | Key::Enter | Key::Space => {
                self.open(current);
                true
            }
            _ => false,
        }
    }

    /// Key pressed inside the menu. Returns whether the key was consumed.
    pub fn menu_key(&mut self, key: Key) -> bool {
        if !self.open {
            return false;
        }

        let last = OPTIONS.len() - 1;
        let index = match self.focus {
            Focus::Option(index) => Some(index),
            _ => None,
        };

        let next = match key {
            Key::Tab => {
                self.open = false;
                self.focus = Focus::Elsewhere;
                return false;
            }
            Key::Escape => {
                self.close();
                return true;
            }
            Key::ArrowDown => index.map_or(0, |i| (i + 1) % OPTIONS.len()),
            Key::ArrowUp => match index {
                None | Some(0) => last,
                Some(i) => i - 1,
            },
            Key::Home => 0,
            Key::End => last,
            _ => return false,
        };

        self.focus = Focus::Option(next);
        true
    }

    /// Pointer press anywhere on the page.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if self.open && target == PointerTarget::Outside {
            self.open = false;
            self.focus = Focus::Elsewhere;
        }
    }

    /// Pick an option: persist it through `theme` and close.
    pub fn select<R: StyleTarget>(
        &mut self,
        value: ColorSchemeSetting,
        theme: &mut ThemeState<R>,
    ) -> Result<(), ThemeError> {
        theme.set_scheme(value)?;
        self.close();
        Ok(())
    }

    /// Pick the focused option, as Enter or Space on a menu item does.
    pub fn select_focused<R: StyleTarget>(
        &mut self,
        theme: &mut ThemeState<R>,
    ) -> Result<bool, ThemeError> {
        match self.focus {
            Focus::Option(index) if self.open => {
                self.select(OPTIONS[index].value, theme)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn render(&self, setting: ColorSchemeSetting, resolved: ResolvedColorScheme) -> String {
        const TRIGGER_ID: &str = "theme-toggle-trigger";
        const MENU_ID: &str = "theme-toggle-menu";

        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"theme-toggle{}\">\n",
            if self.open { " is-open" } else { "" }
        ));
        html.push_str(&format!(
            "<button id=\"{TRIGGER_ID}\" type=\"button\" class=\"theme-toggle__trigger\" \
             aria-haspopup=\"menu\" aria-expanded=\"{}\" aria-controls=\"{MENU_ID}\" \
             aria-label=\"Change color theme\" data-resolved=\"{}\">",
            self.open,
            resolved.as_str()
        ));
        // Both icons ship; the stylesheet shows the one matching data-resolved
        html.push_str(&svg("theme-toggle__icon icon-light", SUN_ICON));
        html.push_str(&svg("theme-toggle__icon icon-dark", MOON_ICON));
        html.push_str("</button>\n");

        html.push_str(&format!(
            "<div id=\"{MENU_ID}\" role=\"menu\" class=\"theme-toggle__menu\" \
             aria-labelledby=\"{TRIGGER_ID}\" aria-hidden=\"{}\">\n",
            !self.open
        ));
        for option in &OPTIONS {
            let selected = option.value == setting;
            html.push_str(&format!(
                "<button type=\"button\" role=\"menuitemradio\" aria-checked=\"{selected}\" \
                 tabindex=\"-1\" class=\"theme-toggle__item{}\" data-theme-option=\"{}\">{}\
                 <span class=\"theme-toggle__item-label\">{}</span></button>\n",
                if selected { " is-selected" } else { "" },
                option.value.as_str(),
                svg("theme-toggle__item-icon", option.icon),
                escape_attr(option.label),
            ));
        }
        html.push_str("</div>\n</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::definition::fixtures::THEME_YAML;
    use crate::theme::{
        MemoryPreferenceStore, PREFERENCE_KEY, RootElement, SystemScheme, ThemeDefinition,
    };
    use std::path::Path;
    use std::sync::Arc;

    fn theme_state() -> ThemeState {
        let definition =
            Arc::new(ThemeDefinition::parse(Path::new("theme.yaml"), THEME_YAML).unwrap());
        let system = SystemScheme::new(ResolvedColorScheme::Light);
        ThemeState::new(
            definition,
            Arc::new(MemoryPreferenceStore::new()),
            PREFERENCE_KEY,
            &system,
            RootElement::new(),
        )
    }

    #[test]
    fn test_option_order_and_labels() {
        let labels: Vec<_> = OPTIONS.iter().map(|o| (o.value.as_str(), o.label)).collect();
        assert_eq!(
            labels,
            [("light", "Light"), ("system", "Auto"), ("dark", "Dark")]
        );
    }

    #[test]
    fn test_trigger_keys_open_on_current_setting() {
        for key in [Key::ArrowDown, Key::Enter, Key::Space] {
            let mut toggle = ThemeToggle::new();
            toggle.focus_trigger();
            assert!(toggle.trigger_key(key, ColorSchemeSetting::Dark));
            assert!(toggle.is_open());
            assert_eq!(toggle.focus(), Focus::Option(2));
        }

        let mut toggle = ThemeToggle::new();
        assert!(!toggle.trigger_key(Key::Home, ColorSchemeSetting::Dark));
        assert!(!toggle.is_open());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut toggle = ThemeToggle::new();
        toggle.open(ColorSchemeSetting::Dark);

        toggle.menu_key(Key::ArrowDown);
        assert_eq!(toggle.focus(), Focus::Option(0));
        toggle.menu_key(Key::ArrowUp);
        assert_eq!(toggle.focus(), Focus::Option(2));
        toggle.menu_key(Key::Home);
        assert_eq!(toggle.focus(), Focus::Option(0));
        toggle.menu_key(Key::End);
        assert_eq!(toggle.focus(), Focus::Option(2));
    }

    #[test]
    fn test_escape_returns_focus_to_trigger() {
        let mut toggle = ThemeToggle::new();
        toggle.open(ColorSchemeSetting::System);
        assert!(toggle.menu_key(Key::Escape));
        assert!(!toggle.is_open());
        assert_eq!(toggle.focus(), Focus::Trigger);
    }

    #[test]
    fn test_tab_closes_without_trapping_focus() {
        let mut toggle = ThemeToggle::new();
        toggle.open(ColorSchemeSetting::System);
        assert!(!toggle.menu_key(Key::Tab));
        assert!(!toggle.is_open());
        assert_eq!(toggle.focus(), Focus::Elsewhere);
    }

    #[test]
    fn test_pointer_outside_closes() {
        let mut toggle = ThemeToggle::new();
        toggle.open(ColorSchemeSetting::Light);
        toggle.pointer_down(PointerTarget::Menu);
        assert!(toggle.is_open());
        toggle.pointer_down(PointerTarget::Trigger);
        assert!(toggle.is_open());
        toggle.pointer_down(PointerTarget::Outside);
        assert!(!toggle.is_open());
    }

    #[test]
    fn test_select_sets_scheme_and_closes() {
        let mut theme = theme_state();
        let mut toggle = ThemeToggle::new();
        toggle.open(theme.setting());
        toggle.menu_key(Key::End);

        assert!(toggle.select_focused(&mut theme).unwrap());
        assert_eq!(theme.setting(), ColorSchemeSetting::Dark);
        assert_eq!(theme.resolved(), ResolvedColorScheme::Dark);
        assert!(!toggle.is_open());
        assert_eq!(toggle.focus(), Focus::Trigger);
    }

    #[test]
    fn test_render_marks_selected_option() {
        let toggle = ThemeToggle::new();
        let html = toggle.render(ColorSchemeSetting::System, ResolvedColorScheme::Dark);

        assert_eq!(html.matches("role=\"menuitemradio\"").count(), 3);
        assert!(html.contains("data-resolved=\"dark\""));
        assert!(html.contains(
            "aria-checked=\"true\" tabindex=\"-1\" class=\"theme-toggle__item is-selected\" \
             data-theme-option=\"system\""
        ));
        assert!(html.contains("aria-expanded=\"false\""));
        let light = html.find("data-theme-option=\"light\"").unwrap();
        let auto = html.find("data-theme-option=\"system\"").unwrap();
        let dark = html.find("data-theme-option=\"dark\"").unwrap();
        assert!(light < auto && auto < dark);
    }
}
