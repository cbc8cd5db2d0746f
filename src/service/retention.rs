//! Optional retention policy for the search ledger.
//!
//! History grows without bound unless `HISTORY_RETENTION_DAYS` is set; a
//! positive value starts a periodic sweep deleting older records.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::error::GatewayError;
use crate::persistence::SearchLedger;

/// Deletes records older than `retention_days` before `now`.
///
/// # Errors
///
/// Returns [`GatewayError::StoreUnavailable`] if the ledger fails.
pub async fn purge_expired(
    ledger: &dyn SearchLedger,
    retention_days: u64,
    now: DateTime<Utc>,
) -> Result<u64, GatewayError> {
    let days = i64::try_from(retention_days).unwrap_or(i64::MAX);
    let cutoff = chrono::Duration::try_days(days)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    ledger.purge_older_than(cutoff).await
}

/// Spawns the periodic retention sweep.
///
/// Returns `None` when `retention_days` is 0 (retention disabled).
#[must_use]
pub fn spawn_retention_task(
    ledger: Arc<dyn SearchLedger>,
    retention_days: u64,
    interval: Duration,
) -> Option<JoinHandle<()>> {
    if retention_days == 0 {
        return None;
    }
    let period = interval.max(Duration::from_secs(1));
    tracing::info!(retention_days, interval_secs = period.as_secs(), "history retention enabled");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match purge_expired(ledger.as_ref(), retention_days, Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "expired searches purged"),
                Err(e) => tracing::warn!(error = %e, "history retention sweep failed"),
            }
        }
    }))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryLedger;

    #[tokio::test]
    async fn purges_records_past_retention() {
        let ledger = MemoryLedger::new();
        let _ = ledger.record("London", 10.0, "fog").await;
        let _ = ledger.record("Paris", 12.0, "mist").await;

        let later = Utc::now() + chrono::Duration::days(31);
        let Ok(removed) = purge_expired(&ledger, 30, later).await else {
            panic!("purge failed");
        };
        assert_eq!(removed, 2);
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn keeps_records_within_retention() {
        let ledger = MemoryLedger::new();
        let _ = ledger.record("London", 10.0, "fog").await;

        let later = Utc::now() + chrono::Duration::days(29);
        assert_eq!(purge_expired(&ledger, 30, later).await.ok(), Some(0));
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn huge_retention_never_purges() {
        let ledger = MemoryLedger::new();
        let _ = ledger.record("London", 10.0, "fog").await;
        assert_eq!(purge_expired(&ledger, u64::MAX, Utc::now()).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn zero_days_disables_task() {
        let ledger: Arc<dyn SearchLedger> = Arc::new(MemoryLedger::new());
        assert!(spawn_retention_task(ledger, 0, Duration::from_secs(60)).is_none());
    }
}
