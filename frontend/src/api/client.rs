use reqwest::{header::HeaderMap, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    api::types::{ApiError, ProviderErrorBody},
    config,
};

/// Client for the GoTrue-compatible auth provider.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    anon_key: Option<String>,
    timeout: Option<Duration>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            anon_key: None,
            timeout: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
            anon_key: None,
            timeout: None,
        }
    }

    pub fn with_anon_key(mut self, anon_key: impl Into<String>) -> Self {
        self.anon_key = Some(anon_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Explicit settings win; anything unset is taken from the runtime config.
    pub(crate) async fn resolved_settings(&self) -> (String, HeaderMap, Duration) {
        let needs_config = self.base_url.is_none() || self.timeout.is_none();
        let cfg = if needs_config {
            Some(config::await_runtime_config().await)
        } else {
            None
        };

        let base_url = match (&self.base_url, &cfg) {
            (Some(base), _) => base.clone(),
            (None, Some(cfg)) => cfg.auth_url.clone(),
            (None, None) => config::DEFAULT_AUTH_URL.to_string(),
        };
        let anon_key = self
            .anon_key
            .clone()
            .or_else(|| cfg.as_ref().and_then(|c| c.anon_key.clone()));
        let timeout = self
            .timeout
            .or_else(|| cfg.as_ref().map(|c| c.request_timeout()))
            .unwrap_or(Duration::from_millis(config::DEFAULT_REQUEST_TIMEOUT_MS));

        let mut headers = HeaderMap::new();
        if let Some(key) = anon_key {
            if let Ok(value) = key.parse() {
                headers.insert("apikey", value);
            }
        }
        (base_url, headers, timeout)
    }

    pub(crate) fn bearer_headers(
        mut headers: HeaderMap,
        access_token: &str,
    ) -> Result<HeaderMap, ApiError> {
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", access_token)
                .parse()
                .map_err(|_| ApiError::validation("Invalid token format"))?,
        );
        Ok(headers)
    }

    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Response, ApiError> {
        request
            .timeout(timeout)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Turns a provider response into `T`, or into an [`ApiError`] carrying the
    /// provider's message and status.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::provider_error(response).await)
        }
    }

    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::provider_error(response).await)
        }
    }

    async fn provider_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => serde_json::from_str::<ProviderErrorBody>(&text).unwrap_or_default(),
            Err(err) => {
                log::warn!("Failed to read provider error body: {}", err);
                ProviderErrorBody::default()
            }
        };
        ApiError::from_provider(status, body)
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout("The request timed out")
    } else {
        ApiError::request_failed(format!("Request failed: {}", err))
    }
}
