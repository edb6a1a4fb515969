//! Transaction models

use serde::{Deserialize, Serialize};

/// Transaction payload sent to `POST /transactions`
///
/// Every field is optional so that records decoded from untrusted input still
/// reach [`crate::validation::validate`] and get a precise diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// ISO-style 3 letter code, e.g. `USD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Date/time string, usually RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TransactionRecord {
    /// Create a record with every field set
    pub fn new(
        transaction_id: impl Into<String>,
        user_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        country: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            user_id: Some(user_id.into()),
            amount: Some(amount),
            currency: Some(currency.into()),
            country: Some(country.into()),
            timestamp: Some(timestamp.into()),
        }
    }
}
