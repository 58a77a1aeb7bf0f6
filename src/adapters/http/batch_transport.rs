//! HTTP Batch Transport - reqwest implementation of `BatchTransport`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpTransportConfig::new("https://api.example.com/controls/sync")
//!     .with_connect_timeout(Duration::from_secs(5))
//!     .with_max_retries(2);
//!
//! let transport = HttpBatchTransport::new(config)?;
//! ```
//!
//! # Retries
//!
//! Connect failures and timeouts are retried up to `max_retries` times with
//! a fixed delay. HTTP status errors are returned immediately.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{BatchTransport, Identity, TransportError};

/// Configuration for the HTTP batch transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Batch submission endpoint.
    pub endpoint_url: String,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, response body included.
    pub read_timeout: Duration,
    /// Extra attempts after a transient failure.
    pub max_retries: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

impl HttpTransportConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

pub struct HttpBatchTransport {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpBatchTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_once(&self, payload: &[u8], identity: &Identity) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header(AUTHORIZATION, format!("Bearer {}", identity.token()))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.map_error(e))
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.read_timeout.as_secs(),
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl BatchTransport for HttpBatchTransport {
    async fn submit_batch(&self, payload: &[u8], identity: &Identity) -> Result<String, TransportError> {
        let mut attempt = 0;
        loop {
            match self.send_once(payload, identity).await {
                Ok(body) => {
                    tracing::debug!(attempt, bytes = body.len(), "Batch endpoint responded");
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %e, "Batch submission failed, retrying");
                    sleep(self.config.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Minimal one-shot HTTP server for adapter tests.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single request with the given status line and body.
    /// The handle resolves to the raw request text.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/sync", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (url, handle)
    }

    /// A URL nothing is listening on.
    pub async fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/sync", addr)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{refused_url, serve_once};
    use super::*;

    fn identity() -> Identity {
        Identity::new("inspector-7", "tok-123")
    }

    fn fast_config(url: String) -> HttpTransportConfig {
        HttpTransportConfig::new(url)
            .with_connect_timeout(Duration::from_secs(2))
            .with_read_timeout(Duration::from_secs(5))
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(10))
    }

    #[test]
    fn config_defaults() {
        let config = HttpTransportConfig::new("https://example.com/sync");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn posts_payload_with_bearer_token() {
        let (url, server) = serve_once("200 OK", r#"{"status":true,"data":{}}"#).await;
        let transport = HttpBatchTransport::new(fast_config(url)).unwrap();

        let body = transport
            .submit_batch(br#"{"controls":[]}"#, &identity())
            .await
            .unwrap();
        assert_eq!(body, r#"{"status":true,"data":{}}"#);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /sync"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tok-123"));
        assert!(request.ends_with(r#"{"controls":[]}"#));
    }

    #[tokio::test]
    async fn http_error_status_is_not_retried() {
        let (url, server) = serve_once("500 Internal Server Error", "boom").await;
        let transport = HttpBatchTransport::new(fast_config(url)).unwrap();

        let err = transport.submit_batch(b"{}", &identity()).await.unwrap_err();
        assert_eq!(err, TransportError::Status { status: 500 });
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        let transport = HttpBatchTransport::new(fast_config(refused_url().await)).unwrap();

        let err = transport.submit_batch(b"{}", &identity()).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
    }
}
