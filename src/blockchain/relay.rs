use crate::blockchain::client::{ClientError, ExplorerClient};
use crate::blockchain::forwarder::UpdateForwarder;
use crate::blockchain::models::{to_record, RawTransaction};
use crate::cache::{self, SeenCache};
use crate::config::RelayConfig;
use crate::models::{RelayReport, TransactionRecord};
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info, warn};

/// What happened while processing one deposit address.
#[derive(Debug, Default)]
struct AddressOutcome {
    fetch_failed: bool,
    errors: Vec<String>,
    transactions_seen: usize,
    total_amount: f64,
}

/// Fetches each deposit address from the explorer and forwards every
/// transaction found to the update API.
pub struct Relay {
    config: RelayConfig,
    explorer: ExplorerClient,
    forwarder: UpdateForwarder,
    seen: Option<SeenCache>,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let explorer = ExplorerClient::new(&config.explorer_url, http.clone());
        let forwarder = UpdateForwarder::new(&config.update_url, http);
        let seen = config
            .seen_window
            .map(|ttl| cache::init_seen_cache(ttl, config.seen_window_capacity));

        info!(
            "Relay configured for {} deposit addresses, forwarding to {}",
            config.deposit_addresses.len(),
            config.update_url
        );

        Ok(Self {
            config,
            explorer,
            forwarder,
            seen,
        })
    }

    pub fn addresses(&self) -> &[String] {
        &self.config.deposit_addresses
    }

    /// Run one relay cycle over every configured address.
    ///
    /// Fetches run concurrently; each address joins its own forwards before
    /// reporting, so the result reflects every forward outcome.
    pub async fn relay(&self) -> RelayReport {
        let outcomes = join_all(
            self.config
                .deposit_addresses
                .iter()
                .map(|address| self.process_address(address)),
        )
        .await;

        let mut errors = Vec::new();
        let mut fetch_failed = false;
        let mut transactions_seen = 0;
        let mut total_amount = 0.0;

        for outcome in outcomes {
            fetch_failed |= outcome.fetch_failed;
            transactions_seen += outcome.transactions_seen;
            total_amount += outcome.total_amount;
            errors.extend(outcome.errors);
        }

        let failed = fetch_failed || (self.config.strict_forwarding && !errors.is_empty());
        let status = if failed { 500 } else { 200 };

        info!(
            "Relay cycle finished: {} transactions seen, total amount {}, {} errors",
            transactions_seen,
            total_amount,
            errors.len()
        );

        RelayReport {
            status,
            errors,
            transactions_seen,
            total_amount,
        }
    }

    async fn process_address(&self, address: &str) -> AddressOutcome {
        let mut outcome = AddressOutcome::default();

        let data = match self.explorer.fetch_address_transactions(address).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to fetch transactions for {}: {}", address, e);
                outcome.fetch_failed = true;
                outcome.errors.push(format!(
                    "Error while updating transactions for {} address {} - {}",
                    self.config.currency, address, e
                ));
                return outcome;
            }
        };

        if data.total_count == 0 || data.list.is_empty() {
            info!("Address {} has zero transactions", address);
            return outcome;
        }

        let mut records = Vec::with_capacity(data.list.len());
        for tx in &data.list {
            outcome.transactions_seen += 1;
            match self.prepare(address, tx) {
                Ok(Some(record)) => {
                    outcome.total_amount += record.amount;
                    records.push(record);
                }
                Ok(None) => {}
                Err(message) => outcome.errors.push(message),
            }
        }

        let results = join_all(records.iter().map(|record| self.forward(address, record))).await;
        outcome.errors.extend(results.into_iter().flatten());

        outcome
    }

    /// Map a raw transaction, returning `None` when it was already forwarded.
    fn prepare(&self, address: &str, tx: &RawTransaction) -> Result<Option<TransactionRecord>, String> {
        let record = to_record(tx, self.config.subdivision, &self.config.currency).map_err(|e| {
            warn!("Skipping transaction for {}: {}", address, e);
            format!("Error while mapping transaction for address {} - {}", address, e)
        })?;

        if let Some(seen) = &self.seen {
            if seen.contains_key(&cache::generate_cache_key(address, &record.tx_hash)) {
                debug!("Transaction {} already forwarded, skipping", record.tx_hash);
                return Ok(None);
            }
        }

        Ok(Some(record))
    }

    /// Forward one record, returning the error entry on failure.
    async fn forward(&self, address: &str, record: &TransactionRecord) -> Option<String> {
        match self.forwarder.forward(record).await {
            Ok(()) => {
                if let Some(seen) = &self.seen {
                    seen.insert(cache::generate_cache_key(address, &record.tx_hash), ())
                        .await;
                }
                None
            }
            Err(e) => {
                warn!(
                    "txn update {} for wallet {} failed with error: {}",
                    record.tx_hash, record.wallet_address, e
                );
                Some(format!(
                    "Error while updating transaction {} for wallet {} - {}",
                    record.tx_hash, record.wallet_address, e
                ))
            }
        }
    }
}
