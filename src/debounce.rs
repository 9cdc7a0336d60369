use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Coalesces bursts of messages into one, delivered after a quiet window.
///
/// Each [`Debouncer::schedule`] replaces whatever was pending and restarts
/// the window; only the last message of a burst reaches the channel. The
/// timer is owned by the debouncer, so dropping it cancels delivery.
#[derive(Debug)]
pub struct Debouncer<M> {
    window: Duration,
    tx: mpsc::UnboundedSender<M>,
    timer: Option<JoinHandle<()>>,
}

impl<M: Send + 'static> Debouncer<M> {
    pub fn new(window: Duration, tx: mpsc::UnboundedSender<M>) -> Self {
        Self {
            window,
            tx,
            timer: None,
        }
    }

    /// Deliver `msg` once the window passes without another call.
    pub fn schedule(&mut self, msg: M) {
        self.cancel();
        let tx = self.tx.clone();
        // The window runs from this call, not from when the task is polled.
        let deadline = Instant::now() + self.window;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tx.send(msg).ok();
        }));
    }

    /// Drop the pending message, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl<M> Drop for Debouncer<M> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, sleep};

    // Let spawned timer tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    fn drain<M>(rx: &mut mpsc::UnboundedReceiver<M>) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        for text in ["a", "ab", "abc"] {
            debouncer.schedule(text.to_string());
            sleep(Duration::from_millis(60)).await;
        }
        assert!(drain(&mut rx).is_empty());

        advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(drain(&mut rx), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_delivered_before_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000), tx);

        debouncer.schedule(1u32);
        advance(Duration::from_millis(999)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());
        assert!(debouncer.is_pending());

        advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(drain(&mut rx), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_deliver_separately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule(1u32);
        sleep(Duration::from_millis(150)).await;
        debouncer.schedule(2u32);
        sleep(Duration::from_millis(150)).await;
        settle().await;

        assert_eq!(drain(&mut rx), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule(1u32);
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);
            debouncer.schedule(1u32);
        }
        sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());
    }
}
