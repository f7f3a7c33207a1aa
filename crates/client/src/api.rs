//! HTTP client for the mapping server.
//!
//! [`MappingApi`] is the seam every controller talks through;
//! [`HttpMappingApi`] implements it over [`reqwest`].

use async_trait::async_trait;
use fieldmap_core::contract::{ActionResult, Command, Endpoint};
use fieldmap_core::mapping::MappingDocument;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Request/response contract with the mapping server.
#[async_trait]
pub trait MappingApi: Send + Sync {
    /// Issue one mutating request and return the server's verdict.
    async fn send(&self, command: &Command) -> Result<ActionResult, ApiError>;

    /// Fetch the authoritative mapping and mismatch lists.
    async fn fetch_document(&self) -> Result<MappingDocument, ApiError>;

    /// Address the browser navigates to for the generated artifact.
    fn download_url(&self) -> String;
}

/// [`MappingApi`] backed by a single mapping server.
pub struct HttpMappingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMappingApi {
    /// Create a client for the server named in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &config.server_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// The body is read as text first so a non-JSON reply surfaces as
    /// [`ApiError::Decode`] rather than a transport error.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MappingApi for HttpMappingApi {
    async fn send(&self, command: &Command) -> Result<ActionResult, ApiError> {
        let endpoint = command.endpoint();
        let request = self.client.post(self.url(endpoint));
        let request = match command {
            Command::AddMapping(body) | Command::ResolveMismatch(body) => request.json(body),
            Command::EditMapping(body) => request.json(body),
            Command::SaveMapping | Command::GenerateOutput | Command::UndoChanges => request,
        };

        tracing::debug!(endpoint = endpoint.path(), "Sending mapping server request");
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    async fn fetch_document(&self) -> Result<MappingDocument, ApiError> {
        let response = self.client.get(self.url(Endpoint::Mappings)).send().await?;
        Self::parse_response(response).await
    }

    fn download_url(&self) -> String {
        self.url(Endpoint::DownloadOutput)
    }
}
