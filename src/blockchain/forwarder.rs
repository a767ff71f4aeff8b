use crate::models::TransactionRecord;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("status was {}", .0.as_u16())]
    Status(StatusCode),
}

/// Posts normalized records to the downstream update API.
#[derive(Clone)]
pub struct UpdateForwarder {
    http: Client,
    update_url: String,
}

impl UpdateForwarder {
    pub fn new(update_url: &str, http: Client) -> Self {
        Self {
            http,
            update_url: update_url.to_string(),
        }
    }

    pub async fn forward(&self, record: &TransactionRecord) -> Result<(), ForwardError> {
        let response = self.http.post(&self.update_url).json(record).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ForwardError::Status(status));
        }

        info!(
            "Updated {} successfully for sending wallet {} and amount {}",
            record.tx_hash, record.wallet_address, record.amount
        );
        Ok(())
    }
}
