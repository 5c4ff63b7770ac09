//! # Search-index client (CLI <-> Core)
//!
//! This module bridges the CLI workflow to the publish abstraction in
//! [`docsearch-core::publisher`]. It wires up the `Publisher` trait against
//! the Algolia REST API and provides the `AlgoliaClient` the CLI uses for
//! networked runs.
//!
//! ## Client Usage
//!
//! - Construct [`AlgoliaClient`] from environment variables
//!   (`ALGOLIA_APP_ID`, `ALGOLIA_ADMIN_KEY`, `ALGOLIA_INDEX_NAME`).
//! - Use trait methods for the end-to-end publish flow (verify_index,
//!   configure_index, save_objects).
//! - All transport, serialization and error handling are encapsulated here.

use std::env;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;

use docsearch_core::publisher::{IndexSettings, PublishError, Publisher};
use docsearch_core::record::SearchRecord;

pub struct AlgoliaClient {
    http: reqwest::Client,
    app_id: String,
    api_key: String,
    index_url: String,
}

impl AlgoliaClient {
    pub fn new_from_env() -> Result<Self, PublishError> {
        dotenvy::dotenv().ok(); // loads environment variables from .env if present
        match (
            env::var("ALGOLIA_APP_ID"),
            env::var("ALGOLIA_ADMIN_KEY"),
            env::var("ALGOLIA_INDEX_NAME"),
        ) {
            (Ok(app_id), Ok(api_key), Ok(index_name)) => {
                let index_url = format!(
                    "https://{}.algolia.net/1/indexes/{}",
                    app_id, index_name
                );
                tracing::info!(
                    app_id = %app_id,
                    index = %index_name,
                    "Initialized AlgoliaClient from environment"
                );
                Ok(AlgoliaClient {
                    http: reqwest::Client::new(),
                    app_id,
                    api_key,
                    index_url,
                })
            }
            (Err(e), _, _) => {
                tracing::error!(error = ?e, "ALGOLIA_APP_ID missing in environment");
                Err(Box::new(e))
            }
            (_, Err(e), _) => {
                tracing::error!(error = ?e, "ALGOLIA_ADMIN_KEY missing in environment");
                Err(Box::new(e))
            }
            (_, _, Err(e)) => {
                tracing::error!(error = ?e, "ALGOLIA_INDEX_NAME missing in environment");
                Err(Box::new(e))
            }
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
    }
}

#[derive(Serialize)]
struct BatchRequests<'a> {
    requests: Vec<BatchAction<'a>>,
}

#[derive(Serialize)]
struct BatchAction<'a> {
    action: &'static str,
    body: &'a SearchRecord,
}

#[async_trait]
impl Publisher for AlgoliaClient {
    async fn verify_index(&self) -> Result<(), PublishError> {
        tracing::info!("Checking that the target index exists");
        let response = self
            .request(Method::GET, format!("{}/settings", self.index_url))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::error!("Target index does not exist");
            return Err(format!("target index does not exist: {}", self.index_url).into());
        }
        response.error_for_status()?;
        tracing::info!("Target index exists");
        Ok(())
    }

    async fn configure_index(&self, settings: &IndexSettings) -> Result<(), PublishError> {
        tracing::info!("Applying index settings");
        self.request(Method::PUT, format!("{}/settings", self.index_url))
            .json(settings)
            .send()
            .await?
            .error_for_status()?;
        tracing::info!("Index settings applied");
        Ok(())
    }

    async fn save_objects(&self, records: &[SearchRecord]) -> Result<(), PublishError> {
        let body = BatchRequests {
            requests: records
                .iter()
                .map(|record| BatchAction {
                    action: "updateObject",
                    body: record,
                })
                .collect(),
        };
        tracing::info!(records = records.len(), "Upserting record batch");
        self.request(Method::POST, format!("{}/batch", self.index_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        tracing::info!(records = records.len(), "Batch upserted successfully");
        Ok(())
    }
}
