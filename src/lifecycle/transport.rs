use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::query::QueryRequest;

/// No response could be obtained at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a built request against the collaborator.
///
/// The returned future must not borrow the transport: the controller hands
/// it to the runtime and keeps accepting submissions meanwhile.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send + 'static;
}

/// Talks to the collaborator over HTTP
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().user_agent(concat!("alt-o-mat/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(backend: &BackendConfig) -> Result<Self, TransportError> {
        Self::new(backend.base_url.clone(), backend.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send + 'static {
        let client = self.client.clone();
        let url = request.url(&self.base_url);

        async move {
            let url = url.map_err(|e| TransportError(format!("invalid collaborator URL: {e}")))?;
            log::debug!("GET {}", url);

            let resp = client
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError(e.to_string()))?;

            Ok(TransportResponse { status, body })
        }
    }
}
