use crate::blockchain::models::{AddressTransactions, ExplorerResponse};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {0}")]
    Status(StatusCode),

    #[error("Explorer error {code}: {message}")]
    Explorer { code: i64, message: String },

    #[error("Explorer returned no data")]
    EmptyPayload,
}

/// Thin client over the block explorer's address endpoint.
#[derive(Clone)]
pub struct ExplorerClient {
    http: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str, http: Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Initializing explorer client with endpoint: {}", base_url);

        Self { http, base_url }
    }

    pub fn transactions_url(&self, address: &str) -> String {
        format!("{}/{}/tx", self.base_url, address)
    }

    /// Get the transaction list for a deposit address
    pub async fn fetch_address_transactions(
        &self,
        address: &str,
    ) -> Result<AddressTransactions, ClientError> {
        let url = self.transactions_url(address);
        info!("Checking for transactions at address {} using URL {}", address, url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body: ExplorerResponse = response.json().await?;
        if body.err_no != 0 {
            return Err(ClientError::Explorer {
                code: body.err_no,
                message: body.err_msg.unwrap_or_default(),
            });
        }

        let data = body.data.ok_or(ClientError::EmptyPayload)?;
        debug!("Explorer reported {} transactions for {}", data.total_count, address);

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDRESS: &str = "bitcoincash:qp3wjpa3tjlj042z2wv7hahsldgwhwy0rq9sywjpyy";

    #[test]
    fn test_transactions_url_trims_trailing_slash() {
        let client = ExplorerClient::new("https://bch-chain.api.btc.com/v3/address/", Client::new());
        assert_eq!(
            client.transactions_url("qabc"),
            "https://bch-chain.api.btc.com/v3/address/qabc/tx"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_transaction_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/{}/tx", ADDRESS)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 0,
                "data": {
                    "total_count": 1,
                    "list": [{
                        "hash": "aa11",
                        "balance_diff": 1000,
                        "inputs": [{ "prev_addresses": ["sender"] }]
                    }]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ExplorerClient::new(&mock_server.uri(), Client::new());
        let data = client.fetch_address_transactions(ADDRESS).await.unwrap();

        assert_eq!(data.total_count, 1);
        assert_eq!(data.list.len(), 1);
        assert_eq!(data.list[0].balance_diff, 1000);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = ExplorerClient::new(&mock_server.uri(), Client::new());
        let err = client.fetch_address_transactions(ADDRESS).await.unwrap_err();

        assert!(matches!(err, ClientError::Status(status) if status == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_fetch_explorer_error_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 1,
                "err_msg": "Resource Not Found",
                "data": null
            })))
            .mount(&mock_server)
            .await;

        let client = ExplorerClient::new(&mock_server.uri(), Client::new());
        let err = client.fetch_address_transactions(ADDRESS).await.unwrap_err();

        assert!(matches!(err, ClientError::Explorer { code: 1, .. }));
        assert!(err.to_string().contains("Resource Not Found"));
    }

    #[tokio::test]
    async fn test_fetch_missing_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&mock_server)
            .await;

        let client = ExplorerClient::new(&mock_server.uri(), Client::new());
        let err = client.fetch_address_transactions(ADDRESS).await.unwrap_err();

        assert!(matches!(err, ClientError::EmptyPayload));
    }

    #[tokio::test]
    async fn test_fetch_undecodable_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = ExplorerClient::new(&mock_server.uri(), Client::new());
        let err = client.fetch_address_transactions(ADDRESS).await.unwrap_err();

        assert!(matches!(err, ClientError::Http(_)));
    }
}
