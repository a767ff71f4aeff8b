// Normalized transaction record forwarded downstream
// API response models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub wallet_address: String,
    pub tx_id: String,
    pub tx_hash: String,
    pub amount: f64,
    pub currency: String,
}

/// Outcome of one relay cycle.
#[derive(Debug, Clone, Serialize)]
pub struct RelayReport {
    pub status: u16,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub transactions_seen: usize,
    #[serde(skip)]
    pub total_amount: f64,
}

impl RelayReport {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}
