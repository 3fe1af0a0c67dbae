use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanPayError>;

/// Failures surfaced by the scan-to-payment pipeline.
///
/// Display strings are shown to the user as-is, so they stay short and free of
/// transport detail.
#[derive(Error, Debug)]
pub enum ScanPayError {
    #[error("Camera permission is required")]
    PermissionDenied,
    #[error("No QR code detected")]
    NoCodeDetected,
    #[error("Invalid QR code format")]
    MalformedPayload,
    #[error("Payment processing failed. Please try again.")]
    PaymentFailed,
    #[error("Payment was interrupted")]
    Interrupted,
    #[error("{0}")]
    InvalidAmount(String),
    #[error("QR encoding error: {0}")]
    QrEncoding(#[from] qrcode::types::QrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
