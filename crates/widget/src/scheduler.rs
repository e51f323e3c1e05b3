//! Coalescing of visual updates into animation frames.
use crate::host::{FrameCallback, FrameId, Host};

/// Coalesces visual updates into at most one pending frame request.
///
/// Scheduling while a request is pending cancels the unfired request and
/// replaces it, so rapid successive triggers — many scroll events within one
/// frame — collapse into a single visual pass reflecting the latest state.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameId>,
}

impl FrameScheduler {
    /// Creates an idle [`FrameScheduler`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `callback` for the next frame, cancelling any unfired
    /// request first (latest write wins).
    pub fn schedule<H: Host>(&mut self, host: &H, callback: FrameCallback) {
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }

        self.pending = Some(host.request_frame(callback));
    }

    /// Marks the pending request as fired. Must be called from inside the
    /// frame callback before scheduling anew.
    pub fn acknowledge(&mut self) {
        self.pending = None;
    }

    /// Cancels the pending request, if any.
    pub fn cancel<H: Host>(&mut self, host: &H) {
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }
    }

    /// Returns whether a frame request is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
