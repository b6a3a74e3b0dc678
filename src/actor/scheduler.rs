//! Scheduler boundary: delayed callbacks that run on the UI thread.
//!
//! The view core never owns a timer. Widgets and hosts that want
//! time-based behavior (a blinking caret, a message that dismisses itself)
//! schedule a callback through a [`Scheduler`]; when it fires, the callback
//! gets the [`ViewTree`] and calls the usual invalidation entry points.

use crate::view::ViewTree;
use std::collections::BTreeMap;
use std::time::Duration;

/// A callback run once, on the UI thread, when its timer fires.
pub type TimerCallback = Box<dyn FnOnce(&mut ViewTree)>;

/// Identifies a scheduled callback so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub(crate) u64);

/// Something that can run callbacks after a delay.
pub trait Scheduler {
    /// Run `callback` once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a pending callback. Returns `false` if it already ran or was
    /// cancelled before.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A scheduler driven by a virtual clock.
///
/// Nothing fires until [`ManualScheduler::advance`] moves the clock, which
/// makes timer-driven behavior deterministic under test.
#[derive(Default)]
pub struct ManualScheduler {
    /// Virtual time since creation.
    now: Duration,
    /// Next handle id.
    next_id: u64,
    /// Pending callbacks ordered by deadline, then by scheduling order.
    pending: BTreeMap<(Duration, TimerHandle), TimerCallback>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of callbacks still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and run every callback that came due, in
    /// deadline order. Returns how many ran.
    pub fn advance(&mut self, by: Duration, tree: &mut ViewTree) -> usize {
        self.now += by;
        let mut fired = 0;
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let callback = entry.remove();
            callback(tree);
            fired += 1;
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, handle), callback);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self.pending.keys().find(|(_, h)| *h == handle).copied();
        key.is_some_and(|key| self.pending.remove(&key).is_some())
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}
