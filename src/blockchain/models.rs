use crate::models::TransactionRecord;
use serde::Deserialize;
use thiserror::Error;

/// Envelope returned by the explorer's `/<address>/tx` endpoint.
#[derive(Debug, Deserialize)]
pub struct ExplorerResponse {
    #[serde(default)]
    pub err_no: i64,
    #[serde(default)]
    pub err_msg: Option<String>,
    pub data: Option<AddressTransactions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressTransactions {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub list: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    pub balance_diff: i64,
    #[serde(default)]
    pub inputs: Vec<RawInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInput {
    #[serde(default)]
    pub prev_addresses: Vec<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("transaction {0} has no input address")]
    MissingInputAddress(String),
}

/// Convert an explorer transaction into the record sent to the update API.
///
/// The sending wallet is taken from the first previous address of the first
/// input; the amount is the balance delta expressed in major units.
pub fn to_record(
    tx: &RawTransaction,
    subdivision: u64,
    currency: &str,
) -> Result<TransactionRecord, MappingError> {
    let wallet_address = tx
        .inputs
        .first()
        .and_then(|input| input.prev_addresses.first())
        .ok_or_else(|| MappingError::MissingInputAddress(tx.hash.clone()))?;

    Ok(TransactionRecord {
        wallet_address: wallet_address.clone(),
        tx_id: tx.hash.clone(),
        tx_hash: tx.hash.clone(),
        amount: to_major_units(tx.balance_diff, subdivision),
        currency: currency.to_string(),
    })
}

pub fn to_major_units(balance_diff: i64, subdivision: u64) -> f64 {
    balance_diff as f64 / subdivision as f64
}
