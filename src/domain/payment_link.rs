use super::payment::{AMOUNT_PARAM, DESCRIPTION_PARAM, MERCHANT_PARAM};
use crate::error::{Result, ScanPayError};
use qrcode::{Color, EcLevel, QrCode};
use rust_decimal::Decimal;

pub const DEFAULT_LINK_BASE: &str = "https://sellekna.com/pay";

const DARK_MODULE: &str = "██";
const LIGHT_MODULE: &str = "  ";

/// Merchant-side counterpart of the parser: the URL encoded into a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLink {
    merchant_id: String,
    amount: Decimal,
    description: String,
}

impl PaymentLink {
    pub fn new(
        merchant_id: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(ScanPayError::InvalidAmount(
                "Amount must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            merchant_id: merchant_id.into(),
            amount: amount.normalize(),
            description: description.into(),
        })
    }

    pub fn to_url(&self, base: &str) -> String {
        format!(
            "{base}?{MERCHANT_PARAM}={}&{AMOUNT_PARAM}={}&{DESCRIPTION_PARAM}={}",
            urlencoding::encode(&self.merchant_id),
            self.amount,
            urlencoding::encode(&self.description)
        )
    }

    /// Renders the link as a high error-correction QR code, two characters
    /// per module and one line per row.
    pub fn to_qr_text(&self, base: &str) -> Result<String> {
        let code = QrCode::with_error_correction_level(self.to_url(base), EcLevel::H)?;
        let width = code.width();

        let mut rendered = String::new();
        for row in code.to_colors().chunks(width) {
            for module in row {
                rendered.push_str(match module {
                    Color::Dark => DARK_MODULE,
                    Color::Light => LIGHT_MODULE,
                });
            }
            rendered.push('\n');
        }
        Ok(rendered)
    }
}
