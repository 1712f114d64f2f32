//! Live adapter for the `RelationStore` port over the store's HTTP API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::GenealogyLink;
use crate::ports::store::{
    CandidateBatch, PersistFuture, RelationStore, RelativesFuture, RelativesQuery,
};

const STORE_URL_VAR: &str = "LINEAGE_STORE_URL";

/// Live relation store client talking to the genealogy store service.
pub struct LiveRelationStore {
    client: Client,
}

impl LiveRelationStore {
    /// Creates a new live relation store client. The base URL is read from
    /// `LINEAGE_STORE_URL` at call time, so construction never fails.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveRelationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Body for the persist endpoint: links reduced to network id pairs.
#[derive(Serialize)]
struct PersistRequest {
    links: Vec<LinkInput>,
}

/// One link in a persist request.
#[derive(Serialize)]
struct LinkInput {
    ancestor: String,
    descendant: String,
}

/// Response from the persist endpoint.
#[derive(Deserialize)]
struct PersistResponse {
    ids: Vec<String>,
}

/// Error body the store returns on non-2xx responses.
#[derive(Deserialize)]
struct StoreError {
    message: String,
}

fn base_url() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    env::var(STORE_URL_VAR)
        .map_err(|_| format!("{STORE_URL_VAR} environment variable not set").into())
}

async fn decode_error(
    context: &str,
    response: reqwest::Response,
) -> Box<dyn std::error::Error + Send + Sync> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<StoreError>(&body).map(|e| e.message).unwrap_or(body);
    format!("{context} failed ({}): {msg}", status.as_u16()).into()
}

impl RelationStore for LiveRelationStore {
    fn relatives(&self, query: &RelativesQuery) -> RelativesFuture<'_> {
        let query = query.clone();

        Box::pin(async move {
            let url = format!("{}/relations/query", base_url()?);
            let response = self
                .client
                .post(&url)
                .json(&query)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Relation query request failed: {e}").into()
                })?;

            if !response.status().is_success() {
                return Err(decode_error("Relation query", response).await);
            }

            let batch: CandidateBatch = response.json().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse relation query response: {e}").into()
                },
            )?;
            Ok(batch)
        })
    }

    fn persist(&self, links: &[GenealogyLink]) -> PersistFuture<'_> {
        let body = PersistRequest {
            links: links
                .iter()
                .map(|link| LinkInput {
                    ancestor: link.ancestor.id.clone(),
                    descendant: link.descendant.id.clone(),
                })
                .collect(),
        };

        Box::pin(async move {
            let url = format!("{}/relations", base_url()?);
            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Persist request failed: {e}").into()
                })?;

            if !response.status().is_success() {
                return Err(decode_error("Persist", response).await);
            }

            let parsed: PersistResponse = response.json().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse persist response: {e}").into()
                },
            )?;
            Ok(parsed.ids)
        })
    }
}
