use crate::config::ApiConfig;
use crate::domain::payment::PaymentDetails;
use crate::domain::ports::PaymentApi;
use crate::error::{Result, ScanPayError};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Payment API client speaking JSON over HTTP.
///
/// Only `200 OK` counts as an accepted payment. Transport errors are logged
/// and reported as [`ScanPayError::PaymentFailed`], never verbatim.
pub struct HttpPaymentApi {
    url: String,
    client: reqwest::Client,
}

impl HttpPaymentApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &ApiConfig, client: reqwest::Client) -> Self {
        Self {
            url: config.payments_url(),
            client,
        }
    }
}

#[async_trait]
impl PaymentApi for HttpPaymentApi {
    async fn submit(&self, details: &PaymentDetails) -> Result<bool> {
        let response = self
            .client
            .post(&self.url)
            .json(details)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.url, error = %e, "payment processing error");
                ScanPayError::PaymentFailed
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            tracing::info!(merchant = %details.merchant_id, amount = %details.amount, "payment accepted");
            Ok(true)
        } else {
            tracing::warn!(url = %self.url, status = status.as_u16(), "payment rejected");
            Ok(false)
        }
    }
}
