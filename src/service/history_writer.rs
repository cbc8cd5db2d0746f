//! Off-critical-path writes to the search ledger.
//!
//! [`HistoryWriter`] hands successful lookups to a background task over a
//! bounded [`tokio::sync::mpsc`] channel. Enqueueing never blocks and never
//! fails the caller; ledger errors are logged and skipped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::WeatherReading;
use crate::persistence::SearchLedger;

/// A search waiting to be written.
#[derive(Debug, Clone)]
struct PendingSearch {
    city: String,
    temperature: f64,
    description: String,
}

/// Cloneable sending side of the history queue.
#[derive(Debug, Clone)]
pub struct HistoryWriter {
    tx: mpsc::Sender<PendingSearch>,
}

/// Owns the background writer task.
///
/// The task exits once every [`HistoryWriter`] clone has been dropped and
/// the queue is empty.
#[derive(Debug)]
pub struct HistoryWriterHandle {
    task: JoinHandle<u64>,
}

impl HistoryWriter {
    /// Spawns the writer task on the current Tokio runtime.
    ///
    /// `capacity` bounds the number of queued searches (minimum 1).
    #[must_use]
    pub fn spawn(ledger: Arc<dyn SearchLedger>, capacity: usize) -> (Self, HistoryWriterHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(run_writer(ledger, rx));
        (Self { tx }, HistoryWriterHandle { task })
    }

    /// Queues `reading` for recording.
    ///
    /// Returns `false` if the record was dropped because the queue is full
    /// or the writer has stopped.
    pub fn enqueue(&self, reading: &WeatherReading) -> bool {
        let pending = PendingSearch {
            city: reading.city.clone(),
            temperature: reading.temperature,
            description: reading.description.clone(),
        };
        match self.tx.try_send(pending) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(p)) => {
                tracing::warn!(city = %p.city, "history queue full; search not recorded");
                false
            }
            Err(mpsc::error::TrySendError::Closed(p)) => {
                tracing::warn!(city = %p.city, "history writer stopped; search not recorded");
                false
            }
        }
    }
}

impl HistoryWriterHandle {
    /// Waits up to `timeout` for queued searches to be written.
    ///
    /// Call after every [`HistoryWriter`] has been dropped. Returns the
    /// number of searches recorded, or `None` if the deadline passed and
    /// the remaining writes were abandoned.
    pub async fn drain(self, timeout: Duration) -> Option<u64> {
        match tokio::time::timeout(timeout, self.task).await {
            Ok(Ok(written)) => {
                tracing::info!(written, "history writer drained");
                Some(written)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "history writer task failed");
                None
            }
            Err(_) => {
                tracing::error!(
                    timeout_secs = timeout.as_secs(),
                    "history writer did not drain in time; pending searches abandoned"
                );
                None
            }
        }
    }
}

async fn run_writer(ledger: Arc<dyn SearchLedger>, mut rx: mpsc::Receiver<PendingSearch>) -> u64 {
    let mut written = 0_u64;
    while let Some(search) = rx.recv().await {
        match ledger
            .record(&search.city, search.temperature, &search.description)
            .await
        {
            Ok(record) => {
                written = written.saturating_add(1);
                tracing::debug!(id = record.id, city = %record.city, "search recorded");
            }
            Err(e) => {
                tracing::warn!(city = %search.city, error = %e, "failed to record search");
            }
        }
    }
    written
}
