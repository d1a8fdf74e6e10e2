//! REST client for the countdown HTTP endpoints.
//!
//! Wraps `GET/POST /countdown` and `PATCH /countdown/control` using
//! [`reqwest`], unwrapping the `{ "data": ... }` success envelope.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::record::CountdownRecord;

/// HTTP client for one countdown service.
pub struct CountdownApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the countdown REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned 404 for the requested countdown.
    #[error("Countdown not found")]
    NotFound,

    /// The service returned any other non-2xx status.
    #[error("Countdown API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the body, or the raw body if it was not JSON.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl CountdownApi {
    /// Create a client for the API rooted at `api_url`, e.g.
    /// `http://localhost:3000/api`.
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the latest countdown. `Ok(None)` when none has ever been started.
    pub async fn fetch_latest(&self) -> Result<Option<CountdownRecord>, ClientError> {
        let response = self
            .client
            .get(format!("{}/countdown", self.api_url))
            .send()
            .await?;

        match Self::parse_data(response).await {
            Ok(record) => Ok(Some(record)),
            Err(ClientError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Start a new countdown, stopping any running one.
    pub async fn start(&self, start_value: f64, rate: f64) -> Result<CountdownRecord, ClientError> {
        let response = self
            .client
            .post(format!("{}/countdown", self.api_url))
            .json(&json!({ "startValue": start_value, "rate": rate }))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    pub async fn pause(&self) -> Result<CountdownRecord, ClientError> {
        self.control(json!({ "action": "pause" })).await
    }

    pub async fn resume(&self) -> Result<CountdownRecord, ClientError> {
        self.control(json!({ "action": "resume" })).await
    }

    /// Replace the latest countdown's values and stop it.
    pub async fn reset(&self, start_value: f64, rate: f64) -> Result<CountdownRecord, ClientError> {
        self.control(json!({ "action": "reset", "startValue": start_value, "rate": rate }))
            .await
    }

    // ---- private helpers ----

    async fn control(&self, body: serde_json::Value) -> Result<CountdownRecord, ClientError> {
        let response = self
            .client
            .patch(format!("{}/countdown/control", self.api_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_data(response).await
    }

    /// Map a non-2xx response to a [`ClientError`], preferring the service's
    /// `error` message over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let envelope = response.json::<DataEnvelope<T>>().await?;
        Ok(envelope.data)
    }
}
