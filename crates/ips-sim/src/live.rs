//! Live-feed pacing.
//!
//! The live dashboard wants one row every `update_interval`.  Instead of an
//! endless loop inside the core, [`Paced`] wraps any row iterator and sleeps
//! between items.  Cancellation is cooperative and only ever happens between
//! steps: stop pulling from the iterator, or trip a [`StopHandle`] (which
//! can be shared with, say, a Ctrl-C handler).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Cloneable cancellation flag checked before every paced step.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Iterator adapter that pauses between items.
///
/// The first item is yielded immediately; every later item waits
/// `interval` first.  With no interval it is a plain pass-through with a
/// stop flag.
pub struct Paced<I> {
    inner:    I,
    interval: Option<Duration>,
    stop:     StopHandle,
    started:  bool,
}

impl<I: Iterator> Paced<I> {
    pub fn new(inner: I, interval: Option<Duration>) -> Self {
        Self {
            inner,
            interval,
            stop: StopHandle::new(),
            started: false,
        }
    }

    /// Use an externally owned stop flag.
    pub fn with_stop(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// A handle that ends the feed before its next step.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

impl<I: Iterator> Iterator for Paced<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.stop.is_stopped() {
            return None;
        }
        if self.started {
            if let Some(interval) = self.interval {
                thread::sleep(interval);
            }
            // Stop may have been requested while sleeping.
            if self.stop.is_stopped() {
                return None;
            }
        }
        self.started = true;
        self.inner.next()
    }
}
