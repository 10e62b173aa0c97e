//! Client for the ingestion and lookup endpoints.

use alloy_primitives::FixedBytes;
use reqwest::{Client, StatusCode};
use url::Url;

use super::ClientError;
use crate::objects::{
    IngestAccepted, ListPoolInitializationsQuery, PoolInitializationResponse, PoolInitializedEvent,
};
use crate::signature::{SIGNATURE_HEADER, SignedObject};

/// Typed HTTP client for the indexer server.
///
/// Event deliveries are signed with
/// `HMAC-SHA256("{timestamp}.{json}", ingest_secret)`; lookups are public.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: Client,
    base_url: Url,
    secret: Vec<u8>,
}

impl IndexerClient {
    /// * `base_url` – root URL of the indexer (e.g. `http://127.0.0.1:8080`).
    /// * `ingest_secret` – the shared HMAC secret for event delivery.
    pub fn new(base_url: Url, ingest_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            secret: ingest_secret.into(),
        }
    }

    /// Replace the default `reqwest::Client`.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /events/pool-initialized` – deliver one event.
    pub async fn deliver(&self, event: PoolInitializedEvent) -> Result<IngestAccepted, ClientError> {
        let signed = SignedObject::new(event, &self.secret)?;
        let url = self.base_url.join("/events/pool-initialized")?;

        let resp = self
            .http
            .post(url)
            .header(SIGNATURE_HEADER, signed.to_header())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(signed.json)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /pool-initializations/{id}`. Returns `None` on 404.
    pub async fn get(
        &self,
        id: FixedBytes<16>,
    ) -> Result<Option<PoolInitializationResponse>, ClientError> {
        let url = self.base_url.join(&format!("/pool-initializations/{id}"))?;
        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse_response(resp).await.map(Some)
    }

    /// `GET /pool-initializations` – one page in ascending id order.
    pub async fn list(
        &self,
        query: &ListPoolInitializationsQuery,
    ) -> Result<Vec<PoolInitializationResponse>, ClientError> {
        let url = self.base_url.join("/pool-initializations")?;
        let resp = self.http.get(url).query(query).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
