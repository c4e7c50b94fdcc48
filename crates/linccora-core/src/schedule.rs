// Cancellable repeating timers for the rotating screens (slideshow, landing hero)
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// A callback firing every `period` until cancelled
///
/// Dropping the handle cancels the task, so a view that owns one stops
/// ticking the moment the view goes away.
#[derive(Debug)]
pub struct RepeatingTask {
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Start ticking; the first tick lands one full `period` from now.
    /// Must be called from inside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Cancelling repeating task");
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Wrap-around cursor over `len` slides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotation {
    len: usize,
    index: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Jump to a slide; out-of-range picks are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// Change the slide count, keeping the cursor in range
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_task_ticks_repeatedly() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();

        let task = RepeatingTask::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(task.is_active());
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticks() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();

        let mut task = RepeatingTask::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(35)).await;
        task.cancel();
        assert!(!task.is_active());

        // Let any in-flight tick settle, then make sure nothing else fires
        tokio::time::sleep(Duration::from_millis(5)).await;
        let after_cancel = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();

        let task = RepeatingTask::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(task);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut rotation = Rotation::new(3);
        rotation.advance();
        rotation.advance();
        assert_eq!(rotation.current(), 2);
        rotation.advance();
        assert_eq!(rotation.current(), 0);
    }

    #[test]
    fn test_empty_rotation_stays_put() {
        let mut rotation = Rotation::new(0);
        rotation.advance();
        assert_eq!(rotation.current(), 0);
        assert!(rotation.is_empty());
    }

    #[test]
    fn test_rotation_select_and_resize() {
        let mut rotation = Rotation::new(5);
        rotation.select(4);
        assert_eq!(rotation.current(), 4);
        rotation.select(9);
        assert_eq!(rotation.current(), 4);

        rotation.resize(3);
        assert_eq!(rotation.current(), 0);
        assert_eq!(rotation.len(), 3);
    }
}
