//! Outbound intent queue.
//!
//! Single producer (the gesture thread), single consumer (the sender duty).
//! Unbounded: intents are rare compared to the frame rate. `Shutdown` is the
//! only way the consumer is told to stop; items pushed after it are never
//! looked at.

use handcue_core::Intent;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// A queue element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Intent(Intent),
    /// No more intents will be produced.
    Shutdown,
}

/// Create a connected producer/consumer pair.
pub fn intent_queue() -> (IntentSender, IntentReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentSender { tx }, IntentReceiver { rx })
}

/// Producer half. Pushing never blocks, and works from any thread.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl IntentSender {
    /// Queue an intent. Returns false if the consumer half is gone.
    pub fn push(&self, intent: Intent) -> bool {
        self.send(Outbound::Intent(intent))
    }

    fn send(&self, item: Outbound) -> bool {
        if self.tx.send(item).is_err() {
            tracing::warn!("intent queue consumer dropped, item discarded");
            return false;
        }
        true
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct IntentReceiver {
    rx: mpsc::UnboundedReceiver<Outbound>,
}

impl IntentReceiver {
    /// Wait for the next element. A closed channel reads as `Shutdown`.
    pub async fn next(&mut self) -> Outbound {
        self.rx.recv().await.unwrap_or(Outbound::Shutdown)
    }

    /// Elements waiting to be drained.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// The exit trigger. Any holder may call `stop`; the shutdown sentinel is
/// queued exactly once.
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<watch::Sender<bool>>,
    queue: IntentSender,
}

impl StopHandle {
    /// Stop handle that queues its sentinel on `queue`.
    pub fn new(queue: IntentSender) -> Self {
        Self {
            stopped: Arc::new(watch::Sender::new(false)),
            queue,
        }
    }

    /// Request shutdown. Only the first call queues the sentinel.
    pub fn stop(&self) {
        let first = self.stopped.send_if_modified(|stopped| !std::mem::replace(stopped, true));
        if first {
            tracing::info!("stop requested, queueing shutdown");
            self.queue.send(Outbound::Shutdown);
        }
    }

    /// Whether `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolves once `stop` has been called.
    pub async fn stopped(&self) {
        let mut rx = self.stopped.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}
