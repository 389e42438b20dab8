//! Auto-advance driver for the trending carousel.
//!
//! One repeating interval per rotator. The timer is cancelled and recreated
//! whenever the underlying item list changes, and unconditionally cancelled
//! on drop; no dangling timer survives teardown.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct CarouselRotator {
    period: Duration,
    index_tx: watch::Sender<usize>,
    timer: Option<JoinHandle<()>>,
}

impl CarouselRotator {
    /// A rotator with no items; idle until [`Self::set_len`] is called.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let (index_tx, _) = watch::channel(0);
        Self {
            period,
            index_tx,
            timer: None,
        }
    }

    /// Swap in a new item list of `len` entries. Any running timer is
    /// cancelled first; the active index resets to the head. A single item
    /// (or none) leaves the rotator idle.
    pub fn set_len(&mut self, len: usize) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        self.index_tx.send_replace(0);

        if len < 2 {
            return;
        }

        let tx = self.index_tx.clone();
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                tx.send_modify(|index| *index = (*index + 1) % len);
            }
        }));
    }

    /// Index of the currently active item.
    #[must_use]
    pub fn active_index(&self) -> usize {
        *self.index_tx.borrow()
    }

    /// Receiver observing every advance.
    #[must_use]
    pub fn watch_index(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }
}

impl Drop for CarouselRotator {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn advances_cyclically() {
        let mut rotator = CarouselRotator::new(Duration::from_millis(10));
        rotator.set_len(3);
        let mut rx = rotator.watch_index();

        let mut seen = Vec::new();
        for _ in 0..4 {
            timeout(Duration::from_secs(1), rx.changed())
                .await
                .expect("advance timed out")
                .expect("rotator closed");
            seen.push(*rx.borrow());
        }

        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[tokio::test]
    async fn list_change_resets_and_recreates_timer() {
        let mut rotator = CarouselRotator::new(Duration::from_millis(10));
        rotator.set_len(5);

        let mut rx = rotator.watch_index();
        timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("advance timed out")
            .expect("rotator closed");

        rotator.set_len(2);
        assert_eq!(rotator.active_index(), 0);

        let mut rx = rotator.watch_index();
        timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("advance timed out")
            .expect("rotator closed");
        assert!(rotator.active_index() < 2);
    }

    #[tokio::test]
    async fn idle_with_one_item() {
        let mut rotator = CarouselRotator::new(Duration::from_millis(5));
        rotator.set_len(1);

        sleep(Duration::from_millis(30)).await;
        assert_eq!(rotator.active_index(), 0);
    }

    #[tokio::test]
    async fn drop_cancels_timer() {
        let mut rotator = CarouselRotator::new(Duration::from_millis(5));
        rotator.set_len(3);
        let mut rx = rotator.watch_index();

        drop(rotator);

        // Sender dropped with the rotator: the channel reports closed once
        // any in-flight change is drained.
        sleep(Duration::from_millis(30)).await;
        let final_value = *rx.borrow_and_update();
        sleep(Duration::from_millis(30)).await;
        assert_eq!(*rx.borrow(), final_value);
        assert!(rx.changed().await.is_err());
    }
}
