//! Persistence layer: the search ledger.
//!
//! [`SearchLedger`] records every successful current-conditions lookup and
//! serves the most recent ones. [`PostgresLedger`] is the production
//! implementation; [`MemoryLedger`] backs deployments with persistence
//! disabled and doubles as a test fake.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GatewayError;

pub use memory::MemoryLedger;
pub use models::SearchRecord;
pub use postgres::PostgresLedger;

/// Append-only store of past searches.
///
/// Every method reports store failures as
/// [`GatewayError::StoreUnavailable`].
#[async_trait]
pub trait SearchLedger: Send + Sync + Debug {
    /// Appends a record. The store assigns `id` and `search_date`.
    ///
    /// Identical searches produce separate rows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn record(
        &self,
        city: &str,
        temperature: f64,
        description: &str,
    ) -> Result<SearchRecord, GatewayError>;

    /// Returns up to `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn recent(&self, limit: u32) -> Result<Vec<SearchRecord>, GatewayError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] if it is not.
    async fn ping(&self) -> Result<(), GatewayError>;

    /// Deletes records older than `cutoff` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GatewayError>;
}
