//! Turns inbound stream payloads into the dashboard's published state.
//!
//! One consumer per active view. It owns the latest snapshot and the rolling
//! history; nothing else mutates them. All calls happen on the app's event
//! loop, one event at a time, so no locking is involved.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::history::{HistoryBuffer, HistorySample};
use crate::types::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsumerState {
    Uninitialized,
    Connecting,
    Live(Arc<Snapshot>),
    Closed,
}

pub struct StreamConsumer {
    state: ConsumerState,
    latest: Option<Arc<Snapshot>>,
    history: HistoryBuffer,
    alive: bool,
    publisher: watch::Sender<Option<Arc<Snapshot>>>,
    published: u64,
    dropped: u64,
}

impl StreamConsumer {
    pub fn new(history: HistoryBuffer) -> Self {
        let (publisher, _) = watch::channel(None);
        Self {
            state: ConsumerState::Uninitialized,
            latest: None,
            history,
            alive: false,
            publisher,
            published: 0,
            dropped: 0,
        }
    }

    /// The view became active and the connection is being opened.
    pub fn start(&mut self) {
        if matches!(self.state, ConsumerState::Uninitialized) {
            self.state = ConsumerState::Connecting;
            self.alive = true;
        }
    }

    /// Handle one inbound payload. Returns the newly published snapshot, or
    /// `None` when the message was ignored (malformed, or after teardown).
    pub fn on_message(&mut self, payload: &str, now: Instant) -> Option<Arc<Snapshot>> {
        if !self.alive {
            trace!("ignoring message after teardown");
            return None;
        }
        let snapshot = match Snapshot::from_json(payload) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                self.dropped += 1;
                debug!(dropped = self.dropped, "{e}");
                return None;
            }
        };
        self.history.push(HistorySample::from_snapshot(&snapshot, now));
        self.state = ConsumerState::Live(Arc::clone(&snapshot));
        self.latest = Some(Arc::clone(&snapshot));
        self.published += 1;
        self.publisher.send_replace(Some(Arc::clone(&snapshot)));
        Some(snapshot)
    }

    /// The transport ended. The last snapshot stays on screen.
    pub fn on_disconnect(&mut self) {
        debug!(published = self.published, "stream ended; keeping last snapshot");
    }

    /// The view is going away: stop accepting messages for good.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.state = ConsumerState::Closed;
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.publisher.subscribe()
    }

    /// Latest snapshot, `None` until the first message arrives. Survives
    /// teardown so the final frame can still be drawn.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_deref()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn state(&self) -> &ConsumerState {
        &self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::snapshot_json;

    fn live_consumer() -> StreamConsumer {
        let mut c = StreamConsumer::new(HistoryBuffer::new(120));
        c.start();
        c
    }

    #[test]
    fn lifecycle_transitions() {
        let mut c = StreamConsumer::new(HistoryBuffer::default());
        assert_eq!(c.state(), &ConsumerState::Uninitialized);
        assert!(c.latest().is_none());
        c.start();
        assert_eq!(c.state(), &ConsumerState::Connecting);
        c.on_message(&snapshot_json(20.0), Instant::now());
        assert!(matches!(c.state(), ConsumerState::Live(_)));
        c.teardown();
        assert_eq!(c.state(), &ConsumerState::Closed);
        assert!(!c.is_alive());
    }

    #[test]
    fn three_messages_fill_history_in_order() {
        let mut c = live_consumer();
        for cpu in [10.0, 50.0, 90.0] {
            assert!(c.on_message(&snapshot_json(cpu), Instant::now()).is_some());
        }
        let cpus: Vec<f64> = c.history().samples().map(|s| s.cpu).collect();
        assert_eq!(cpus, [10.0, 50.0, 90.0]);
        assert_eq!(c.latest().map(|s| s.cpu_percent), Some(90.0));
        assert_eq!(c.published(), 3);
    }

    #[test]
    fn malformed_message_keeps_last_state() {
        let mut c = live_consumer();
        c.on_message(&snapshot_json(33.0), Instant::now());
        assert!(c.on_message("{\"cpu_percent\":", Instant::now()).is_none());
        assert!(c.on_message("{}", Instant::now()).is_none());
        assert_eq!(c.latest().map(|s| s.cpu_percent), Some(33.0));
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.published(), 1);
        assert_eq!(c.dropped(), 2);
    }

    #[test]
    fn malformed_first_message_stays_connecting() {
        let mut c = live_consumer();
        assert!(c.on_message("garbage", Instant::now()).is_none());
        assert_eq!(c.state(), &ConsumerState::Connecting);
        assert!(c.latest().is_none());
    }

    #[test]
    fn late_messages_after_teardown_are_ignored() {
        let mut c = live_consumer();
        c.on_message(&snapshot_json(10.0), Instant::now());
        c.teardown();
        assert!(c.on_message(&snapshot_json(99.0), Instant::now()).is_none());
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.published(), 1);
        assert_eq!(c.latest().map(|s| s.cpu_percent), Some(10.0));
    }

    #[test]
    fn messages_before_start_are_ignored() {
        let mut c = StreamConsumer::new(HistoryBuffer::default());
        assert!(c.on_message(&snapshot_json(10.0), Instant::now()).is_none());
        assert!(c.history().is_empty());
    }

    #[test]
    fn closed_is_terminal() {
        let mut c = live_consumer();
        c.teardown();
        c.start();
        assert_eq!(c.state(), &ConsumerState::Closed);
        assert!(c.on_message(&snapshot_json(1.0), Instant::now()).is_none());
    }

    #[test]
    fn disconnect_keeps_live_snapshot() {
        let mut c = live_consumer();
        c.on_message(&snapshot_json(42.0), Instant::now());
        c.on_disconnect();
        assert!(c.is_alive());
        assert_eq!(c.latest().map(|s| s.cpu_percent), Some(42.0));
    }

    #[test]
    fn one_publication_per_successful_message() {
        let mut c = live_consumer();
        let mut rx = c.subscribe();
        assert!(!rx.has_changed().unwrap());
        c.on_message(&snapshot_json(5.0), Instant::now());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().map(|s| s.cpu_percent), Some(5.0));
        c.on_message("nope", Instant::now());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn published_snapshot_is_shared_not_copied() {
        let mut c = live_consumer();
        let published = c.on_message(&snapshot_json(7.0), Instant::now()).unwrap();
        let seen = c.subscribe().borrow().clone().unwrap();
        assert!(Arc::ptr_eq(&published, &seen));
    }
}
