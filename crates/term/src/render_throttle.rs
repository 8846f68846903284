//! Frame throttling keyed on the snapshot fingerprint.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    heartbeat_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    dirty: bool,
}

impl RenderThrottle {
    /// `heartbeat_ms` bounds how long an unchanged frame may go unredrawn.
    pub fn new(heartbeat_ms: u64) -> Self {
        Self {
            heartbeat_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            dirty: true,
        }
    }

    /// Force the next frame (resize, front-end state change).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Decide whether to render a new frame.
    ///
    /// Renders when invalidated, when the fingerprint changed, or once per
    /// heartbeat otherwise.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = self.dirty
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.heartbeat_ms;
        if due {
            self.dirty = false;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }
}
