//! Active section tracking from scroll position.
//!
//! A section becomes active once its top passes a marker line 35% down the
//! viewport. Scroll and resize events only schedule work; the active id is
//! recomputed once per frame.
//!
//! The build renders the first active id from this module. In the browser
//! the same model runs as `embed/runtime/site.js`, which takes
//! [`MARKER_RATIO`] from here; the frame and override rules below are the
//! reference that script follows.

mod frame;
mod viewport;

use tokio::sync::watch;

pub use frame::FrameScheduler;
pub use viewport::{ScrollTarget, SectionLayout, Viewport};

/// Marker position as a fraction of the viewport height.
pub const MARKER_RATIO: f64 = 0.35;

/// Last id whose top is at or above the marker.
///
/// Starts from the first id; ids without an element are skipped and the
/// walk stops at the first top below the marker.
pub fn compute_active(ids: &[String], viewport: &dyn Viewport) -> Option<String> {
    let first = ids.first()?;
    let marker = viewport.scroll_y() + viewport.inner_height() * MARKER_RATIO;
    let mut candidate = first;

    for id in ids {
        let Some(top) = viewport.element_top(id) else {
            continue;
        };
        if top <= marker {
            candidate = id;
        } else {
            break;
        }
    }
    Some(candidate.clone())
}

pub struct ActiveSectionTracker {
    ids: Vec<String>,
    active: watch::Sender<Option<String>>,
    frame: FrameScheduler,
    attached: bool,
}

impl ActiveSectionTracker {
    /// Attach to `ids`. The first id is active until the first frame runs.
    pub fn new(ids: Vec<String>) -> Self {
        let (active, _) = watch::channel(ids.first().cloned());
        let mut tracker = Self {
            ids,
            active,
            frame: FrameScheduler::new(),
            attached: true,
        };
        tracker.request_update();
        tracker
    }

    pub fn section_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn active_id(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.active.subscribe()
    }

    pub const fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn on_scroll(&mut self) -> bool {
        self.request_update()
    }

    pub fn on_resize(&mut self) -> bool {
        self.request_update()
    }

    /// Schedule a recomputation. No-op while one is pending or detached.
    fn request_update(&mut self) -> bool {
        if !self.attached || self.ids.is_empty() {
            return false;
        }
        self.frame.request()
    }

    /// Run the pending frame against `viewport`. Returns whether the active
    /// id changed.
    pub fn run_frame(&mut self, viewport: &dyn Viewport) -> bool {
        if !self.frame.take() {
            return false;
        }
        match compute_active(&self.ids, viewport) {
            Some(next) => self.set_if_changed(Some(next)),
            None => false,
        }
    }

    /// Replace the tracked ids, keeping the active id if it is still listed.
    pub fn set_section_ids(&mut self, ids: Vec<String>) {
        let current = self.active_id();
        let next = match current {
            Some(id) if ids.contains(&id) => Some(id),
            _ => ids.first().cloned(),
        };
        self.ids = ids;
        self.set_if_changed(next);
        self.frame.cancel();
        self.request_update();
    }

    /// Manual override. The id is not checked against the tracked list.
    pub fn set_active_id(&mut self, id: impl Into<String>) -> bool {
        self.set_if_changed(Some(id.into()))
    }

    /// Cancel the pending frame and stop reacting to events.
    pub fn teardown(&mut self) {
        self.frame.cancel();
        self.attached = false;
    }

    fn set_if_changed(&self, next: Option<String>) -> bool {
        self.active.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }
}

impl Drop for ActiveSectionTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}
