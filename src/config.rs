pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAYMENTS_ENDPOINT: &str = "/payments";

/// Location of the payment API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub payments_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            payments_endpoint: DEFAULT_PAYMENTS_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, payments_endpoint: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            payments_endpoint: payments_endpoint.into(),
        }
    }

    /// The full URL payments are posted to: plain concatenation of base and endpoint.
    pub fn payments_url(&self) -> String {
        format!("{}{}", self.base_url, self.payments_endpoint)
    }
}
