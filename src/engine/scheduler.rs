//! Rate limiting for page events.
//!
//! Both policies hold at most one pending task and collapse repeats into it.

use std::time::{Duration, Instant};

/// Delay before a resize burst is acted on.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Trailing-edge debounce with a single pending deadline.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record a trigger at `now`, pushing any pending deadline back.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `true` once when the quiet period has elapsed at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// At most one animation-frame task in flight.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer {
    pending: bool,
}

impl FrameCoalescer {
    /// Ask for a frame. Returns `false` when one is already queued.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the queued frame, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
