//! Fixed navigation bar with a mobile drawer.
//!
//! The build renders the bar from [`NavigationBar`]. Drawer and `navigate`
//! state are the reference model for the click and Escape handling in
//! `embed/runtime/site.js`.

use crate::content::{SectionRecord, SectionStore};
use crate::tracker::{ActiveSectionTracker, ScrollTarget};
use crate::utils::html::{escape, escape_attr};

use super::Key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub slug: String,
    pub title: String,
}

impl From<&SectionRecord> for NavigationItem {
    fn from(record: &SectionRecord) -> Self {
        Self {
            slug: record.data.slug.clone(),
            title: record.data.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationBar {
    items: Vec<NavigationItem>,
    drawer_open: bool,
}

impl NavigationBar {
    pub fn new(items: Vec<NavigationItem>) -> Self {
        Self {
            items,
            drawer_open: false,
        }
    }

    /// One item per section, in page order.
    pub fn from_store(store: &SectionStore) -> Self {
        Self::new(store.get_all().iter().map(NavigationItem::from).collect())
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub const fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Menu button.
    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Window key handler. Escape closes the drawer.
    pub fn key(&mut self, key: Key) {
        if key == Key::Escape {
            self.drawer_open = false;
        }
    }

    /// Jump to `slug`: close the drawer, make it the active section and
    /// scroll it into view. Does nothing if the section is not mounted.
    pub fn navigate<V: ScrollTarget>(
        &mut self,
        slug: &str,
        tracker: &mut ActiveSectionTracker,
        viewport: &mut V,
    ) -> bool {
        if viewport.element_top(slug).is_none() {
            return false;
        }
        self.drawer_open = false;
        tracker.set_active_id(slug);
        viewport.scroll_into_view(slug)
    }

    /// Header markup. `toggle` is the rendered theme toggle placed in the
    /// drawer after the links.
    pub fn render(&self, active: Option<&str>, toggle: &str) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<header class=\"nav{}\">\n<div class=\"nav__inner\">\n",
            if self.drawer_open { " nav--open" } else { "" }
        ));
        html.push_str("<nav class=\"nav__primary\" aria-label=\"Primary\">\n");
        html.push_str(&format!(
            "<button class=\"nav__toggle\" type=\"button\" aria-expanded=\"{}\" \
             aria-controls=\"nav-drawer\"><span class=\"nav__toggle-icon\" aria-hidden=\"true\">\
             </span><span class=\"nav__toggle-label\">Menu</span></button>\n",
            self.drawer_open
        ));
        html.push_str("<div id=\"nav-drawer\" class=\"nav__drawer\">\n<ul class=\"nav__list\">\n");

        for item in &self.items {
            let is_active = active == Some(item.slug.as_str());
            html.push_str(&format!(
                "<li><a class=\"nav__link{}\" href=\"#{}\" data-nav-target=\"{}\"{}>{}</a></li>\n",
                if is_active { " is-active" } else { "" },
                escape_attr(&item.slug),
                escape_attr(&item.slug),
                if is_active {
                    " aria-current=\"page\""
                } else {
                    ""
                },
                escape(&item.title),
            ));
        }

        html.push_str("</ul>\n");
        html.push_str(toggle);
        html.push_str("</div>\n</nav>\n</div>\n</header>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{SectionLayout, Viewport};

    fn bar() -> NavigationBar {
        NavigationBar::new(vec![
            NavigationItem {
                slug: "about".into(),
                title: "About".into(),
            },
            NavigationItem {
                slug: "publications".into(),
                title: "Papers & Talks".into(),
            },
        ])
    }

    #[test]
    fn test_render_marks_active_item() {
        let html = bar().render(Some("publications"), "");

        assert!(html.contains(
            "<a class=\"nav__link\" href=\"#about\" data-nav-target=\"about\">About</a>"
        ));
        assert!(html.contains(
            "<a class=\"nav__link is-active\" href=\"#publications\" \
             data-nav-target=\"publications\" aria-current=\"page\">Papers &amp; Talks</a>"
        ));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn test_drawer_toggle_and_escape() {
        let mut nav = bar();
        nav.toggle_drawer();
        assert!(nav.is_drawer_open());
        assert!(nav.render(None, "").contains("nav nav--open"));

        nav.key(Key::Tab);
        assert!(nav.is_drawer_open());
        nav.key(Key::Escape);
        assert!(!nav.is_drawer_open());
    }

    #[test]
    fn test_navigate_scrolls_and_overrides_tracker() {
        let mut nav = bar();
        let mut tracker = ActiveSectionTracker::new(vec!["about".into(), "publications".into()]);
        let mut layout = SectionLayout::new(1000.0)
            .with_section("about", 0.0)
            .with_section("publications", 1200.0);
        nav.toggle_drawer();

        assert!(nav.navigate("publications", &mut tracker, &mut layout));
        assert!(!nav.is_drawer_open());
        assert_eq!(tracker.active_id().as_deref(), Some("publications"));
        assert_eq!(layout.scroll_y(), 1200.0);
    }

    #[test]
    fn test_navigate_to_unmounted_section_is_ignored() {
        let mut nav = bar();
        let mut tracker = ActiveSectionTracker::new(vec!["about".into()]);
        let mut layout = SectionLayout::new(1000.0).with_section("about", 0.0);
        nav.toggle_drawer();

        assert!(!nav.navigate("missing", &mut tracker, &mut layout));
        assert!(nav.is_drawer_open());
        assert_eq!(tracker.active_id().as_deref(), Some("about"));
    }
}
