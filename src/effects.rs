use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source for transient overlays.
pub trait Clock: Debug + Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand. Used for deterministic rendering and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `d`.
    pub fn advance(&self, d: Duration) {
        self.millis
            .fetch_add(d.as_millis() as u64, Ordering::Relaxed);
    }

    /// Jump to `t`.
    pub fn set(&self, t: Duration) {
        self.millis.store(t.as_millis() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::Relaxed))
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Expiring overlay triggered by a transition into a capture action.
///
/// The flash starts when the current action differs from the previously observed one and begins
/// with the capture marker. Expiry is checked lazily against the clock on each frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameraFlash {
    last_action: Option<String>,
    visible_until: Option<Duration>,
}

impl CameraFlash {
    /// Record the current frame's action and report whether the flash is visible at `now`.
    pub fn observe(
        &mut self,
        action: Option<&str>,
        now: Duration,
        marker: &str,
        duration: Duration,
    ) -> bool {
        if action != self.last_action.as_deref() {
            self.last_action = action.map(str::to_owned);
            if action.is_some_and(|a| a.trim_start().starts_with(marker)) {
                self.visible_until = Some(now + duration);
            }
        }
        self.is_visible(now)
    }

    /// Whether the flash is visible at `now`, without observing a new action.
    pub fn is_visible(&self, now: Duration) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    /// Forget the last action and any active flash.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Waypoint argument of a `(take-image <rover> <objective> <waypoint> ...)` action, if present.
pub fn capture_waypoint(action: &str) -> Option<&str> {
    action
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split_whitespace()
        .nth(3)
}

#[cfg(test)]
#[path = "../tests/unit/effects.rs"]
mod tests;
