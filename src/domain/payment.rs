use crate::error::{Result, ScanPayError};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MERCHANT_PARAM: &str = "merchant";
pub const AMOUNT_PARAM: &str = "amount";
pub const DESCRIPTION_PARAM: &str = "desc";

/// Payment parameters carried by a scanned QR code.
///
/// Serialized as the JSON body of the payment request, with `amount` as a
/// plain JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub merchant_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

/// Extracts [`PaymentDetails`] from the query string of a payment URL.
///
/// Missing `merchant` or `desc` become empty strings. A missing, non-numeric
/// or out-of-range `amount` becomes zero; that fallback is logged at `warn`
/// so it never passes unnoticed. Anything that is not a URL fails with
/// [`ScanPayError::MalformedPayload`].
pub fn parse_payment_url(payload: &str) -> Result<PaymentDetails> {
    let url = Url::parse(payload).map_err(|e| {
        tracing::debug!(error = %e, "QR payload is not a URL");
        ScanPayError::MalformedPayload
    })?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    let merchant_id = param(MERCHANT_PARAM).unwrap_or_default();
    let description = param(DESCRIPTION_PARAM).unwrap_or_default();
    let raw_amount = param(AMOUNT_PARAM);

    let amount = match raw_amount.as_deref().map(parse_amount) {
        Some(Ok(amount)) => amount,
        Some(Err(AmountError::OutOfRange)) => {
            tracing::warn!(
                merchant = %merchant_id,
                raw_amount = ?raw_amount,
                "amount out of range, defaulting to 0"
            );
            Decimal::ZERO
        }
        Some(Err(AmountError::NotNumeric)) | None => {
            tracing::warn!(
                merchant = %merchant_id,
                raw_amount = ?raw_amount,
                "amount missing or not numeric, defaulting to 0"
            );
            Decimal::ZERO
        }
    };

    Ok(PaymentDetails {
        merchant_id,
        amount,
        description,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmountError {
    NotNumeric,
    /// A well-formed number that `Decimal` cannot hold.
    OutOfRange,
}

fn parse_amount(raw: &str) -> std::result::Result<Decimal, AmountError> {
    let raw = raw.trim();
    // Decimal tolerates digit separators; plain numbers do not.
    if raw.is_empty() || raw.contains('_') {
        return Err(AmountError::NotNumeric);
    }
    if let Ok(amount) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Ok(amount.normalize());
    }
    match raw.parse::<f64>() {
        Ok(value) if !value.is_nan() => Err(AmountError::OutOfRange),
        _ => Err(AmountError::NotNumeric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_full_payload() {
        let details = parse_payment_url("pay://x?merchant=ACME&amount=25.5&desc=Coffee").unwrap();
        assert_eq!(
            details,
            PaymentDetails {
                merchant_id: "ACME".to_string(),
                amount: dec!(25.5),
                description: "Coffee".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let details = parse_payment_url("https://shop.test/pay?merchant=M1&desc=Tea").unwrap();
        assert_eq!(details.amount, Decimal::ZERO);
        assert_eq!(details.merchant_id, "M1");
    }

    #[test]
    fn test_non_numeric_amount_defaults_to_zero() {
        let details = parse_payment_url("pay://x?merchant=M1&amount=lots").unwrap();
        assert_eq!(details.amount, Decimal::ZERO);

        let details = parse_payment_url("pay://x?merchant=M1&amount=").unwrap();
        assert_eq!(details.amount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_merchant_and_description_are_empty() {
        let details = parse_payment_url("pay://x?amount=3").unwrap();
        assert_eq!(details.merchant_id, "");
        assert_eq!(details.description, "");
        assert_eq!(details.amount, dec!(3));

        let details = parse_payment_url("pay://x").unwrap();
        assert_eq!(details, PaymentDetails::default());
    }

    #[test]
    fn test_negative_amount_is_not_rejected() {
        let details = parse_payment_url("pay://x?amount=-4.25").unwrap();
        assert_eq!(details.amount, dec!(-4.25));
    }

    #[test]
    fn test_amount_is_normalized_and_trimmed() {
        let details = parse_payment_url("pay://x?amount=%2010.50%20").unwrap();
        assert_eq!(details.amount.to_string(), "10.5");

        let details = parse_payment_url("pay://x?amount=1e3").unwrap();
        assert_eq!(details.amount, dec!(1000));
    }

    #[test]
    fn test_first_occurrence_wins_and_values_are_decoded() {
        let details =
            parse_payment_url("pay://x?merchant=A%26B&merchant=other&desc=Iced+latte").unwrap();
        assert_eq!(details.merchant_id, "A&B");
        assert_eq!(details.description, "Iced latte");
    }

    #[test]
    fn test_digit_separators_are_not_numeric() {
        assert_eq!(parse_amount("1_000"), Err(AmountError::NotNumeric));

        let details = parse_payment_url("pay://x?amount=1_000").unwrap();
        assert_eq!(details.amount, Decimal::ZERO);
    }

    #[test]
    fn test_amounts_beyond_decimal_range_are_out_of_range() {
        for raw in ["1e30", "99999999999999999999999999999999", "-1e40"] {
            assert_eq!(parse_amount(raw), Err(AmountError::OutOfRange), "{raw}");
        }

        let details = parse_payment_url("pay://x?amount=1e30").unwrap();
        assert_eq!(details.amount, Decimal::ZERO);
    }

    #[test]
    fn test_amount_classification() {
        assert_eq!(parse_amount(" 7.10 "), Ok(dec!(7.1)));
        assert_eq!(parse_amount("abc"), Err(AmountError::NotNumeric));
        assert_eq!(parse_amount("NaN"), Err(AmountError::NotNumeric));
        assert_eq!(parse_amount(""), Err(AmountError::NotNumeric));
    }

    #[test]
    fn test_malformed_payload() {
        for payload in ["", "not a url", "merchant=ACME&amount=1", "://missing-scheme"] {
            assert!(
                matches!(
                    parse_payment_url(payload),
                    Err(ScanPayError::MalformedPayload)
                ),
                "payload {payload:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_json_body_shape() {
        let details = PaymentDetails {
            merchant_id: "ACME".to_string(),
            amount: dec!(25.5),
            description: "Coffee".to_string(),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"merchantId": "ACME", "amount": 25.5, "description": "Coffee"})
        );
    }
}
