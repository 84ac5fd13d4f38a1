//! HTTP transport seam
//!
//! The client talks to the network only through [`Transport`]. The default
//! implementation wraps a shared `reqwest` client; tests substitute their own.

use crate::requests::RequestKind;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use reqwest::Client as HttpClient;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A fully built request, ready to send
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub kind: RequestKind,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Raw response: status and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures before a complete response was read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() || error.is_request() || error.is_body() {
            TransportError::Connection(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

/// Executes one request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: HttpClient,
}

impl ReqwestTransport {
    /// Create a transport whose calls give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn request(url: &str) -> TransportRequest {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        TransportRequest {
            kind: RequestKind::CreateSource,
            method: Method::POST,
            url: Url::parse(url).unwrap(),
            headers,
            body: Some(br#"{"type":"promptpay"}"#.to_vec()),
        }
    }

    #[tokio::test]
    async fn test_reqwest_transport_round_trip() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/sources")
            .match_header("content-type", "application/json")
            .match_body(Matcher::JsonString(r#"{"type":"promptpay"}"#.to_string()))
            .with_status(201)
            .with_body(r#"{"id":"src_test_1"}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .execute(request(&format!("{}/sources", server.url())))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert!(response.is_success());
        assert_eq!(response.body, br#"{"id":"src_test_1"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let error = transport
            .execute(request(&format!("http://127.0.0.1:{}/sources", port)))
            .await
            .unwrap_err();
        assert!(matches!(error, TransportError::Connection(_)));
    }
}
