use crate::domain::ports::{BarcodeReader, CameraPermissions, ScanOptions, Scanner};
use crate::error::{Result, ScanPayError};
use async_trait::async_trait;

/// QR scanner built on a camera permission gate and a barcode reader.
///
/// Permission is requested at most once per scan; the reader is only
/// activated after access has been granted.
pub struct QrScanner<P, R> {
    permissions: P,
    reader: R,
    options: ScanOptions,
}

impl<P: CameraPermissions, R: BarcodeReader> QrScanner<P, R> {
    pub fn new(permissions: P, reader: R) -> Self {
        Self {
            permissions,
            reader,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    async fn ensure_permission(&self) -> Result<()> {
        if self.permissions.has_permission().await {
            return Ok(());
        }
        if self.permissions.request_permission().await {
            Ok(())
        } else {
            Err(ScanPayError::PermissionDenied)
        }
    }
}

#[async_trait]
impl<P: CameraPermissions, R: BarcodeReader> Scanner for QrScanner<P, R> {
    async fn scan(&self) -> Result<String> {
        self.ensure_permission().await?;

        match self.reader.read(&self.options).await? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ScanPayError::NoCodeDetected),
        }
    }
}
