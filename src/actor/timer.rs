//! Timer Actor: Dedicated thread that tracks deadlines.
//!
//! The thread only ever sees deadlines and handles. When a deadline passes
//! it sends the handle back over a channel, and the host loop runs the
//! matching callback on the UI thread with [`TimerActor::run_fired`]. The
//! callbacks themselves never leave the UI thread.

use super::scheduler::{Scheduler, TimerCallback, TimerHandle};
use crate::view::ViewTree;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest the thread sleeps before re-checking for shutdown.
const IDLE_WAIT: Duration = Duration::from_millis(50);

#[derive(Debug)]
enum TimerRequest {
    Schedule { handle: TimerHandle, deadline: Instant },
    Cancel(TimerHandle),
}

/// Scheduler backed by a timer thread.
pub struct TimerActor {
    /// Handle to the timer thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Requests to the timer thread.
    requests: Sender<TimerRequest>,
    /// Handles whose deadline passed.
    fired: Receiver<TimerHandle>,
    /// Callbacks waiting for their handle to fire.
    callbacks: HashMap<TimerHandle, TimerCallback>,
    /// Next handle id.
    next_id: u64,
}

impl TimerActor {
    /// Spawn the timer thread.
    pub fn spawn() -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let (request_tx, request_rx) = unbounded();
        let (fired_tx, fired_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("trellis-timer".to_string())
            .spawn(move || {
                Self::run_loop(&request_rx, &fired_tx, &shutdown_clone);
            })
            .expect("Failed to spawn timer thread");

        Self {
            handle: Some(handle),
            shutdown,
            requests: request_tx,
            fired: fired_rx,
            callbacks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Receiver of fired handles, for use with `select!`.
    ///
    /// Pass a received handle to [`TimerActor::fire`].
    #[inline]
    pub const fn receiver(&self) -> &Receiver<TimerHandle> {
        &self.fired
    }

    /// Run the callback for a fired handle. Returns `false` if the handle
    /// was cancelled or already ran.
    pub fn fire(&mut self, handle: TimerHandle, tree: &mut ViewTree) -> bool {
        self.callbacks.remove(&handle).is_some_and(|callback| {
            callback(tree);
            true
        })
    }

    /// Run every callback whose handle has fired so far.
    pub fn run_fired(&mut self, tree: &mut ViewTree) -> usize {
        let mut ran = 0;
        while let Ok(handle) = self.fired.try_recv() {
            if self.fire(handle, tree) {
                ran += 1;
            }
        }
        ran
    }

    /// Number of callbacks still waiting.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    /// Signal the timer thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the timer thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        requests: &Receiver<TimerRequest>,
        fired: &Sender<TimerHandle>,
        shutdown: &AtomicBool,
    ) {
        let mut deadlines: BinaryHeap<Reverse<(Instant, TimerHandle)>> = BinaryHeap::new();
        let mut cancelled: HashSet<TimerHandle> = HashSet::new();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let wait = deadlines
                .peek()
                .map_or(IDLE_WAIT, |Reverse((deadline, _))| {
                    deadline.saturating_duration_since(Instant::now())
                })
                .min(IDLE_WAIT);

            match requests.recv_timeout(wait) {
                Ok(TimerRequest::Schedule { handle, deadline }) => {
                    deadlines.push(Reverse((deadline, handle)));
                }
                Ok(TimerRequest::Cancel(handle)) => {
                    cancelled.insert(handle);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            while let Some(Reverse((deadline, handle))) = deadlines.peek().copied() {
                if deadline > now {
                    break;
                }
                deadlines.pop();
                if !cancelled.remove(&handle) && fired.send(handle).is_err() {
                    return;
                }
            }
        }
    }
}

impl Scheduler for TimerActor {
    fn schedule_after(&mut self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline = Instant::now() + delay;
        if self
            .requests
            .send(TimerRequest::Schedule { handle, deadline })
            .is_err()
        {
            tracing::warn!(?handle, "timer thread has exited, callback dropped");
            return handle;
        }
        self.callbacks.insert(handle, callback);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.callbacks.remove(&handle).is_none() {
            return false;
        }
        let _ = self.requests.send(TimerRequest::Cancel(handle));
        true
    }
}

impl Drop for TimerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_timer_fires_on_ui_thread() {
        let mut tree = ViewTree::new(10, 5);
        let mut timers = TimerActor::spawn();
        let ran = Rc::new(Cell::new(0));
        let counter = ran.clone();
        timers.schedule_after(
            Duration::from_millis(10),
            Box::new(move |_| counter.set(counter.get() + 1)),
        );

        let handle = timers.receiver().recv_timeout(Duration::from_secs(2));
        assert!(handle.is_ok());
        assert!(timers.fire(handle.unwrap(), &mut tree));
        assert_eq!(ran.get(), 1);
        assert_eq!(timers.pending(), 0);

        timers.join();
    }

    #[test]
    fn test_cancelled_timer_does_not_run() {
        let mut tree = ViewTree::new(10, 5);
        let mut timers = TimerActor::spawn();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let handle = timers.schedule_after(
            Duration::from_millis(20),
            Box::new(move |_| flag.set(true)),
        );
        assert!(timers.cancel(handle));

        thread::sleep(Duration::from_millis(80));
        assert_eq!(timers.run_fired(&mut tree), 0);
        assert!(!ran.get());

        timers.join();
    }

    #[test]
    fn test_schedule_after_thread_exit_keeps_nothing() {
        let mut timers = TimerActor::spawn();
        timers.shutdown();
        if let Some(thread) = timers.handle.take() {
            thread.join().unwrap();
        }

        let handle = timers.schedule_after(Duration::from_millis(1), Box::new(|_| {}));

        assert_eq!(timers.pending(), 0);
        assert!(!timers.cancel(handle));
    }
}
