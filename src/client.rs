// src/client.rs
use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};
use crate::store::TransactionStore;
use async_trait::async_trait;
use log::error;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the ledger API, usable anywhere a `TransactionStore` is.
#[derive(Clone)]
pub struct LedgerClient {
    client: Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn check(response: Response, id: Option<&str>) -> Result<Response, LedgerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(LedgerError::NotFound(id.to_string()));
            }
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        error!("Ledger API responded with HTTP {}: {}", status, message);
        Err(LedgerError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TransactionStore for LedgerClient {
    async fn list(&self) -> Result<Vec<Transaction>, LedgerError> {
        let response = self.client.get(self.url("transactions")).send().await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn get(&self, id: &str) -> Result<Transaction, LedgerError> {
        let response = self
            .client
            .get(self.url(&format!("transactions/{}", id)))
            .send()
            .await?;
        Ok(Self::check(response, Some(id)).await?.json().await?)
    }

    async fn create(&self, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let response = self
            .client
            .post(self.url("transactions"))
            .json(&trade)
            .send()
            .await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn update(&self, id: &str, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let response = self
            .client
            .put(self.url(&format!("transactions/{}", id)))
            .json(&trade)
            .send()
            .await?;
        Ok(Self::check(response, Some(id)).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        let response = self
            .client
            .delete(self.url(&format!("transactions/{}", id)))
            .send()
            .await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
