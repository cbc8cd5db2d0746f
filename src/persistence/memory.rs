//! In-process search ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::SearchLedger;
use super::models::SearchRecord;
use crate::error::GatewayError;

/// Search ledger held in memory behind a [`tokio::sync::RwLock`].
///
/// Used when `PERSISTENCE_ENABLED=false` and as a test double. Records are
/// kept in insertion order; history is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: Vec<SearchRecord>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Returns `true` if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl SearchLedger for MemoryLedger {
    async fn record(
        &self,
        city: &str,
        temperature: f64,
        description: &str,
    ) -> Result<SearchRecord, GatewayError> {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.saturating_add(1);
        let record = SearchRecord {
            id: inner.next_id,
            city: city.to_string(),
            temperature,
            description: description.to_string(),
            search_date: Utc::now(),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<SearchRecord>, GatewayError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GatewayError> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.search_date >= cutoff);
        Ok((before - inner.records.len()) as u64)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_assigns_increasing_ids() {
        let ledger = MemoryLedger::new();
        let Ok(a) = ledger.record("London", 15.3, "light rain").await else {
            panic!("record failed");
        };
        let Ok(b) = ledger.record("Paris", 18.0, "clear sky").await else {
            panic!("record failed");
        };
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.search_date >= a.search_date);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let ledger = MemoryLedger::new();
        for _ in 0..3 {
            let _ = ledger.record("London", 15.3, "light rain").await;
        }
        assert_eq!(ledger.len().await, 3);
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let ledger = MemoryLedger::new();
        for i in 0..12 {
            let _ = ledger.record(&format!("city-{i}"), f64::from(i), "clear").await;
        }
        let Ok(rows) = ledger.recent(10).await else {
            panic!("recent failed");
        };
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].city, "city-11");
        assert_eq!(rows[9].city, "city-2");
        assert!(rows.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn recent_on_empty_ledger() {
        let ledger = MemoryLedger::new();
        assert!(ledger.is_empty().await);
        assert_eq!(ledger.recent(10).await.ok(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn purge_removes_only_older_records() {
        let ledger = MemoryLedger::new();
        let _ = ledger.record("London", 10.0, "fog").await;
        let cutoff = Utc::now() + chrono::Duration::seconds(1);

        let Ok(removed) = ledger.purge_older_than(cutoff).await else {
            panic!("purge failed");
        };
        assert_eq!(removed, 1);
        assert!(ledger.is_empty().await);

        let _ = ledger.record("Paris", 12.0, "mist").await;
        let past = Utc::now() - chrono::Duration::days(1);
        assert_eq!(ledger.purge_older_than(past).await.ok(), Some(0));
        assert_eq!(ledger.len().await, 1);
    }
}
