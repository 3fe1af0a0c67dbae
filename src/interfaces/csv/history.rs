use crate::domain::ports::TransactionLog;
use crate::domain::transaction::Transaction;
use crate::error::{Result, ScanPayError};
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Append-only CSV file of payment attempts.
///
/// The header row is written only when the file is new or empty, so several
/// runs can share one history file.
pub struct CsvTransactionLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvTransactionLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransactionLog for CsvTransactionLog {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let _guard = self.lock.lock().await;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(tx)?;
        writer.flush()?;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let _guard = self.lock.lock().await;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file)
            .into_deserialize()
            .map(|row| row.map_err(ScanPayError::from))
            .collect()
    }
}
