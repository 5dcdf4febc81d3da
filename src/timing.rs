//! Time-driven UI affordances
//!
//! These never touch [`QueryState`](crate::tea::QueryState). They are polled
//! from the event loop with the current instant, which keeps them
//! deterministic under tokio's paused test clock.

use tokio::time::{Duration, Instant};

/// Default quiet period before the typing indicator clears
pub const DEFAULT_TYPING_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default delay between input blur and hiding suggestions. Must exceed the
/// time a suggestion click takes to be handled.
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);

/// Single-shot cancellable timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShotTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl OneShotTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// Start the timer, replacing any pending deadline
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Debounced "user is typing" signal
#[derive(Debug, Clone)]
pub struct TypingIndicator {
    timer: OneShotTimer,
    typing: bool,
}

impl TypingIndicator {
    pub fn new(debounce: Duration) -> Self {
        Self {
            timer: OneShotTimer::new(debounce),
            typing: false,
        }
    }

    /// Record an input change. A non-empty value raises the indicator;
    /// any change while raised restarts the quiet window.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        if !text.is_empty() {
            self.typing = true;
        }
        if self.typing {
            self.timer.arm(now);
        }
    }

    /// Advance to `now`; returns true if the indicator just dropped
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.typing = false;
            return true;
        }
        false
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// When the indicator will drop if no further input arrives
    pub fn settles_at(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_DEBOUNCE)
    }
}

/// Delayed hide of the suggestion panel after the input loses focus
#[derive(Debug, Clone)]
pub struct BlurGrace {
    timer: OneShotTimer,
}

impl BlurGrace {
    pub fn new(grace: Duration) -> Self {
        Self {
            timer: OneShotTimer::new(grace),
        }
    }

    /// Input lost focus: schedule the hide
    pub fn on_blur(&mut self, now: Instant) {
        self.timer.arm(now);
    }

    /// Input regained focus: the panel stays
    pub fn on_focus(&mut self) {
        self.timer.cancel();
    }

    /// A suggestion was picked: the hide already happened
    pub fn on_select(&mut self) {
        self.timer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Returns true when the panel should now be hidden
    pub fn tick(&mut self, now: Instant) -> bool {
        self.timer.fire_if_due(now)
    }
}

impl Default for BlurGrace {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_GRACE)
    }
}
