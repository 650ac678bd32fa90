//! Layout queries the tracker needs.

use rustc_hash::FxHashMap;

/// Scroll position, viewport size and element offsets.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn inner_height(&self) -> f64;
    /// Document-relative top of the element with `id`, `None` if not mounted.
    fn element_top(&self, id: &str) -> Option<f64>;
}

/// Viewport that can be scrolled programmatically.
pub trait ScrollTarget: Viewport {
    /// Align the top of `id` with the top of the viewport. Returns `false`
    /// if the element is not mounted.
    fn scroll_into_view(&mut self, id: &str) -> bool;
}

/// Fixed layout snapshot.
#[derive(Debug, Clone, Default)]
pub struct SectionLayout {
    scroll_y: f64,
    inner_height: f64,
    tops: FxHashMap<String, f64>,
}

impl SectionLayout {
    pub fn new(inner_height: f64) -> Self {
        Self {
            inner_height,
            ..Self::default()
        }
    }

    pub fn with_section(mut self, id: impl Into<String>, top: f64) -> Self {
        self.tops.insert(id.into(), top);
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn resize(&mut self, inner_height: f64) {
        self.inner_height = inner_height;
    }

    pub fn remove(&mut self, id: &str) {
        self.tops.remove(id);
    }
}

impl Viewport for SectionLayout {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_height(&self) -> f64 {
        self.inner_height
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.tops.get(id).copied()
    }
}

impl ScrollTarget for SectionLayout {
    fn scroll_into_view(&mut self, id: &str) -> bool {
        match self.tops.get(id) {
            Some(&top) => {
                self.scroll_y = top;
                true
            }
            None => false,
        }
    }
}
