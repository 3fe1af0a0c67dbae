use crate::domain::ports::{BarcodeReader, CameraPermissions, ScanOptions, TransactionLog};
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Camera permission with a preset answer.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    already_granted: bool,
    grant_on_request: bool,
    requests: AtomicUsize,
}

impl StaticPermissions {
    /// Permission was granted before the scan started.
    pub fn granted() -> Self {
        Self {
            already_granted: true,
            grant_on_request: true,
            ..Self::default()
        }
    }

    /// Not yet granted; the user accepts when asked.
    pub fn grant_on_request() -> Self {
        Self {
            grant_on_request: true,
            ..Self::default()
        }
    }

    /// Not granted; the user refuses when asked.
    pub fn denied() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraPermissions for StaticPermissions {
    async fn has_permission(&self) -> bool {
        self.already_granted
    }

    async fn request_permission(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.grant_on_request
    }
}

/// Barcode reader that "decodes" a preset payload. `None` models a cancelled scan.
#[derive(Debug, Default)]
pub struct FixedPayloadReader {
    payload: Option<String>,
    reads: AtomicUsize,
    last_options: Mutex<Option<ScanOptions>>,
}

impl FixedPayloadReader {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<ScanOptions> {
        self.last_options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl BarcodeReader for FixedPayloadReader {
    async fn read(&self, options: &ScanOptions) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        *self
            .last_options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(options.clone());
        Ok(self.payload.clone())
    }
}

/// A thread-safe in-memory transaction history.
///
/// Keeps insertion order; recording a transaction whose id is already known
/// replaces the earlier entry.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        match transactions.iter_mut().find(|existing| existing.id == tx.id) {
            Some(existing) => *existing = tx,
            None => transactions.push(tx),
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }
}
