//! HTTP upload client for external attachments.
//!
//! Provides a minimal client bound to a document origin and the multipart
//! upload used by the attachment hook. No authentication is applied; the
//! upload endpoint is expected to sit next to the document.

pub mod api;

use httpattach_core::{AttachConfig, AttachError, AttachResult};
use reqwest::Client;
use std::time::Duration;

pub use api::{attachment_path, UploadReceipt};

/// Settings used to build the underlying `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct UploadClientOptions {
    pub user_agent: String,
    /// `None` leaves requests without a timeout
    pub timeout: Option<Duration>,
}

impl From<&AttachConfig> for UploadClientOptions {
    fn from(config: &AttachConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.upload_timeout,
        }
    }
}

impl Default for UploadClientOptions {
    fn default() -> Self {
        Self::from(&AttachConfig::default())
    }
}

/// Build a client that can be shared across origins.
pub fn build_http_client(options: &UploadClientOptions) -> AttachResult<Client> {
    let mut builder = Client::builder().user_agent(options.user_agent.clone());

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| AttachError::Config(format!("Failed to create HTTP client: {}", e)))
}

pub(crate) fn transport_error(err: reqwest::Error) -> AttachError {
    if err.is_timeout() {
        AttachError::Transport(format!("Request timed out: {}", err))
    } else {
        AttachError::Transport(err.to_string())
    }
}

/// HTTP client bound to one upload origin.
#[derive(Clone, Debug)]
pub struct UploadClient {
    client: Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>, options: &UploadClientOptions) -> AttachResult<Self> {
        Ok(Self::with_client(build_http_client(options)?, base_url))
    }

    /// Reuse an existing client (and its connection pool).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a multipart form. Any 2xx status counts as success; the body is not parsed.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> AttachResult<reqwest::StatusCode> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AttachError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(status)
    }
}
