//! Single-slot frame scheduling.

/// At most one pending frame. Requests while pending are dropped.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Schedule a frame. Returns `false` if one is already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending frame, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}
