//! HTTP client for the shipments REST API
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: authenticated request plumbing
//!
//! [`ApiClient`] is constructed from a set of [`Credentials`] and owned by
//! whoever issues requests; there is no process-wide client state.

use async_trait::async_trait;
use url::Url;

use crate::app::models::{Shipment, UpdateOutcome, UpdateRequest};
use crate::auth::Credentials;
use crate::constants::api;
use crate::errors::{ApiError, ApiResult};

// Module declarations
pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Operations the shipment list needs from a backend
#[async_trait]
pub trait ShipmentApi: Send + Sync {
    /// Fetch every shipment, in backend order
    async fn list_shipments(&self) -> ApiResult<Vec<Shipment>>;

    /// Ask the backend to move a shipment to `status`
    async fn update_shipment(&self, id: i64, status: &str) -> ApiResult<UpdateOutcome>;
}

/// Client for the `envios/v1` endpoints
#[derive(Debug)]
pub struct ApiClient {
    http_handler: HttpHandler,
    lenient_decoding: bool,
}

impl ApiClient {
    /// Creates a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// The credentials are re-sanitized so a trailing slash on the base URL
    /// never produces `//wp-json` paths.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> ApiResult<Self> {
        let credentials = Credentials::new(
            &credentials.base_url,
            &credentials.username,
            &credentials.app_password,
        );
        let client = config.build_http_client()?;

        tracing::debug!(
            "Configured API client for {} as {}",
            credentials.base_url,
            credentials.username
        );

        Ok(Self {
            http_handler: HttpHandler::new(client, credentials),
            lenient_decoding: config.lenient_decoding,
        })
    }

    /// Fetches the shipment list
    ///
    /// # Errors
    ///
    /// - `ApiError::Remote` on a non-2xx response, with status and body
    /// - `ApiError::Transport` on network failure
    /// - `ApiError::Decode` on a malformed body, only when lenient decoding is off
    pub async fn list_shipments(&self) -> ApiResult<Vec<Shipment>> {
        let response = self.http_handler.get(api::LIST_PATH).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Shipment list request failed with HTTP {}", status.as_u16());
            return Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let shipments = decode_shipments(&body, self.lenient_decoding)?;
        tracing::info!("Fetched {} shipments", shipments.len());
        Ok(shipments)
    }

    /// Posts a status change for one shipment
    ///
    /// A non-2xx answer is returned as [`UpdateOutcome::Rejected`], not as an
    /// error. Only transport failures produce `Err`.
    pub async fn update_shipment(&self, id: i64, status: &str) -> ApiResult<UpdateOutcome> {
        let request = UpdateRequest {
            id,
            status: status.to_string(),
        };
        let response = self
            .http_handler
            .post_json(api::UPDATE_PATH, &request)
            .await?;
        let code = response.status();
        let body = response.text().await?;

        if code.is_success() {
            tracing::info!("Shipment {} updated to {:?}", id, status);
            Ok(UpdateOutcome::Applied { body })
        } else {
            tracing::warn!(
                "Backend rejected update of shipment {} with HTTP {}",
                id,
                code.as_u16()
            );
            Ok(UpdateOutcome::Rejected {
                status: code.as_u16(),
                message: code
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| body.trim().to_string()),
                body,
            })
        }
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &str {
        &self.http_handler.credentials().base_url
    }

    /// Username sent in the Basic credentials
    pub fn username(&self) -> &str {
        &self.http_handler.credentials().username
    }

    /// Resolved URL of the list endpoint
    pub fn list_url(&self) -> ApiResult<Url> {
        self.http_handler.endpoint(api::LIST_PATH)
    }
}

#[async_trait]
impl ShipmentApi for ApiClient {
    async fn list_shipments(&self) -> ApiResult<Vec<Shipment>> {
        ApiClient::list_shipments(self).await
    }

    async fn update_shipment(&self, id: i64, status: &str) -> ApiResult<UpdateOutcome> {
        ApiClient::update_shipment(self, id, status).await
    }
}

/// Decode a list body; empty and `null` bodies are an empty list
///
/// Records are decoded one at a time. When `lenient`, a body that is not a
/// JSON array reads as empty and a record that cannot be decoded is skipped;
/// both are logged. Otherwise either one is a [`ApiError::Decode`].
pub fn decode_shipments(body: &str, lenient: bool) -> ApiResult<Vec<Shipment>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(body) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) if lenient => {
            let preview = body.chars().take(120).collect::<String>();
            tracing::warn!(
                "Treating malformed shipment list as empty: {} (body starts {:?})",
                e,
                preview
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(ApiError::Decode(e)),
    };

    let mut shipments = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Shipment>(record) {
            Ok(shipment) => shipments.push(shipment),
            Err(e) if lenient => {
                tracing::warn!("Skipping shipment record {}: {}", index, e);
            }
            Err(e) => return Err(ApiError::Decode(e)),
        }
    }
    Ok(shipments)
}
