//! Authenticated HTTP requests against the backend
//!
//! Every request carries HTTP Basic credentials and asks for JSON. Endpoint
//! URLs are the sanitized base URL with the endpoint path appended.

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::auth::Credentials;
use crate::errors::{ApiError, ApiResult};

/// Issues authenticated requests for one set of credentials
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    credentials: Credentials,
}

impl HttpHandler {
    /// Creates a new HttpHandler bound to the given credentials
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Full URL of an endpoint path such as `/wp-json/envios/v1/list`
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.credentials.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidBaseUrl {
            url: self.credentials.base_url.clone(),
            error: e.to_string(),
        })
    }

    /// Sends an authenticated GET
    pub async fn get(&self, path: &str) -> ApiResult<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.app_password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        tracing::debug!("GET {} -> {}", path, response.status());
        Ok(response)
    }

    /// Sends an authenticated POST with a JSON body
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.app_password))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        tracing::debug!("POST {} -> {}", path, response.status());
        Ok(response)
    }

    /// Credentials used for every request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
