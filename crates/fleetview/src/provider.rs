//! Record providers and the snapshots they produce.
//!
//! A [`RecordProvider`] is the only source of records for a list view. The
//! view never talks to it directly: a [`crate::mount::Mount`] runs one fetch
//! and publishes [`Snapshot`]s for the view to render.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::Storage;

/// One observed `{records, loading}` pair.
///
/// `records` carries no meaning while `loading` is true. `error` is set only
/// on a terminal snapshot whose fetch failed; such a snapshot has no records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Records in provider order.
    pub records: Vec<Record>,
    /// Whether the fetch is still in flight.
    pub loading: bool,
    /// Failure message of a terminal snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Snapshot {
    /// A snapshot for a fetch that is still in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// A terminal snapshot holding the fetched records.
    #[must_use]
    pub fn resolved(records: Vec<Record>) -> Self {
        Self {
            records,
            loading: false,
            error: None,
        }
    }

    /// A terminal snapshot for a failed fetch.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            error: Some(message.into()),
        }
    }

    /// Build the terminal snapshot for a fetch result.
    #[must_use]
    pub fn from_result(result: Result<Vec<Record>>) -> Self {
        match result {
            Ok(records) => Self::resolved(records),
            Err(err) => Self::failed(err.to_string()),
        }
    }

    /// Whether this snapshot ends the fetch attempt.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.loading
    }
}

/// A source of records.
///
/// Implementations decide how records are obtained; callers only see the
/// collection or an error.
#[async_trait::async_trait]
pub trait RecordProvider: Send + Sync {
    /// The name of this provider (for logging and error messages).
    fn name(&self) -> &'static str;

    /// Fetch the current collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be produced.
    async fn fetch(&self) -> Result<Vec<Record>>;
}

/// A provider backed by a fixed vector of records.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Vec<Record>,
    latency: Option<Duration>,
    failure: Option<String>,
}

impl MemoryProvider {
    /// Create a provider that yields the given records.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            latency: None,
            failure: None,
        }
    }

    /// Delay every fetch by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every fetch fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait::async_trait]
impl RecordProvider for MemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(Error::fetch(self.name(), message.clone()));
        }

        Ok(self.records.clone())
    }
}

/// A provider that reads records from [`Storage`].
///
/// Queries run on tokio's blocking pool and are bounded by a timeout.
#[derive(Debug, Clone)]
pub struct StorageProvider {
    storage: Arc<Mutex<Storage>>,
    filter: Option<String>,
    timeout: Duration,
}

impl StorageProvider {
    /// Create a provider over shared storage.
    #[must_use]
    pub fn new(storage: Arc<Mutex<Storage>>, timeout: Duration) -> Self {
        Self {
            storage,
            filter: None,
            timeout,
        }
    }

    /// Only yield records whose name, make or model contains `query`.
    #[must_use]
    pub fn with_filter(mut self, query: impl Into<String>) -> Self {
        self.filter = Some(query.into());
        self
    }
}

#[async_trait::async_trait]
impl RecordProvider for StorageProvider {
    fn name(&self) -> &'static str {
        "storage"
    }

    #[instrument(skip(self), fields(provider = self.name()))]
    async fn fetch(&self) -> Result<Vec<Record>> {
        let storage = Arc::clone(&self.storage);
        let filter = self.filter.clone();

        let query = tokio::task::spawn_blocking(move || {
            let storage = storage
                .lock()
                .map_err(|_| Error::internal("storage lock poisoned"))?;
            match filter.as_deref() {
                Some(query) => storage.search(query),
                None => storage.list(),
            }
        });

        let records = tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| Error::Timeout {
                operation: format!("fetch from {}", self.name()),
            })?
            .map_err(|e| Error::fetch(self.name(), e.to_string()))??;

        debug!("Fetched {} records", records.len());
        Ok(records)
    }
}
