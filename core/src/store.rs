use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::StoreConfig;

const RETURN_REPRESENTATION: &str = "return=representation";
const UPSERT_REPRESENTATION: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store returned a body that is not JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid credential header: {0}")]
    Credentials(#[from] reqwest::header::InvalidHeaderValue),
}

/// The two row operations the gateway needs from the hosted store.
///
/// Both return the store's representation of the affected rows, which for a
/// PostgREST backend is a JSON array.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_row(&self, table: &str, row: &Value) -> Result<Value, StoreError>;

    /// Insert-or-update keyed by the `on_conflict` column.
    async fn upsert_row(&self, table: &str, row: &Value, on_conflict: &str) -> Result<Value, StoreError>;
}

/// Pulls the single affected row out of a representation body.
///
/// An empty array (or `null`) means the store accepted nothing.
pub fn first_row(body: Value) -> Option<Value> {
    match body {
        Value::Array(rows) => rows.into_iter().next(),
        Value::Object(row) => Some(Value::Object(row)),
        _ => None,
    }
}

/// REST client for a Supabase/PostgREST store.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        // Every call carries the same credentials, so bake them into the client.
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.anon_key)?);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        info!("Store client ready for {}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        debug!("Store answered {} with {} bytes", status, bytes.len());
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Store for RestStore {
    async fn insert_row(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row);

        self.send(request).await
    }

    async fn upsert_row(&self, table: &str, row: &Value, on_conflict: &str) -> Result<Value, StoreError> {
        let request = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", UPSERT_REPRESENTATION)
            .json(row);

        self.send(request).await
    }
}
