use crate::domain::payment::PaymentDetails;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum TransactionStatus {
    Success,
    Failed,
    #[default]
    Pending,
}

/// Historical record of one payment attempt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub merchant_name: String,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Opens a pending record for details about to be submitted.
    pub fn pending(details: &PaymentDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: details.amount,
            merchant_name: details.merchant_id.clone(),
            status: TransactionStatus::Pending,
            timestamp: Utc::now(),
        }
    }

    /// Settles a pending record. Already settled records are left untouched.
    pub fn settle(&mut self, succeeded: bool) {
        if self.status != TransactionStatus::Pending {
            return;
        }
        self.status = if succeeded {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        };
    }
}
