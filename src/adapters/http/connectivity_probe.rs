//! HTTP connectivity probe.
//!
//! Any HTTP response, whatever its status, counts as reachable. Only a failure
//! to get a response at all (DNS, refused, timeout) counts as offline.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{Connectivity, TransportError};

pub struct HttpConnectivityProbe {
    url: String,
    client: Client,
}

impl HttpConnectivityProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl Connectivity for HttpConnectivityProbe {
    async fn is_reachable(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(response) => {
                tracing::trace!(status = %response.status(), "Connectivity probe answered");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, url = %self.url, "Connectivity probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::batch_transport::test_server::{refused_url, serve_once};

    #[tokio::test]
    async fn any_response_is_reachable() {
        let (url, server) = serve_once("404 Not Found", "").await;
        let probe = HttpConnectivityProbe::new(url, Duration::from_secs(2)).unwrap();

        assert!(probe.is_reachable().await);
        let request = server.await.unwrap();
        assert!(request.starts_with("HEAD /sync"));
    }

    #[tokio::test]
    async fn refused_is_unreachable() {
        let probe = HttpConnectivityProbe::new(refused_url().await, Duration::from_secs(1)).unwrap();
        assert!(!probe.is_reachable().await);
    }
}
