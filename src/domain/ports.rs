use super::payment::PaymentDetails;
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeFormat {
    QrCode,
}

/// Presentation of the camera overlay while a scan is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub formats: Vec<BarcodeFormat>,
    pub message: String,
    pub show_flip_camera_button: bool,
    pub prefer_front_camera: bool,
    pub show_torch_button: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            formats: vec![BarcodeFormat::QrCode],
            message: "Place the QR code inside the scan area".to_string(),
            show_flip_camera_button: false,
            prefer_front_camera: false,
            show_torch_button: true,
        }
    }
}

#[async_trait]
pub trait CameraPermissions: Send + Sync {
    async fn has_permission(&self) -> bool;
    async fn request_permission(&self) -> bool;
}

/// Camera and barcode decoder. Suspends until a frame decodes or the user cancels.
#[async_trait]
pub trait BarcodeReader: Send + Sync {
    async fn read(&self, options: &ScanOptions) -> Result<Option<String>>;
}

/// Produces the raw text of one scanned code.
#[async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self) -> Result<String>;
}

/// Submits payment details; `Ok(true)` only when the API accepted them.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn submit(&self, details: &PaymentDetails) -> Result<bool>;
}

#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn record(&self, tx: Transaction) -> Result<()>;
    async fn all(&self) -> Result<Vec<Transaction>>;
}

macro_rules! forward_camera_impls {
    ($($wrapper:ident),*) => {$(
        #[async_trait]
        impl<T: CameraPermissions + ?Sized> CameraPermissions for $wrapper<T> {
            async fn has_permission(&self) -> bool {
                (**self).has_permission().await
            }

            async fn request_permission(&self) -> bool {
                (**self).request_permission().await
            }
        }

        #[async_trait]
        impl<T: BarcodeReader + ?Sized> BarcodeReader for $wrapper<T> {
            async fn read(&self, options: &ScanOptions) -> Result<Option<String>> {
                (**self).read(options).await
            }
        }
    )*};
}

// One device usually backs both the permission gate and the reader.
forward_camera_impls!(Arc, Box);

pub type ScannerBox = Box<dyn Scanner>;
pub type PaymentApiBox = Box<dyn PaymentApi>;
pub type TransactionLogBox = Box<dyn TransactionLog>;
