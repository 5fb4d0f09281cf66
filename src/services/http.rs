use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::services::source::{PilotSource, SourceError};

/// Remote pilot listing, e.g. another instance's `/api/pilots`
pub struct HttpPilotSource {
    url: String,
    client: Client,
}

impl HttpPilotSource {
    /// Create a new listing client
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl PilotSource for HttpPilotSource {
    async fn fetch_listing(&self) -> Result<Value, SourceError> {
        tracing::debug!("Fetching pilot listing from: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch pilot listing from {}: {} - {}", self.url, status, body);
            return Err(SourceError::ApiError(format!(
                "Failed to fetch pilot listing: {}",
                status
            )));
        }

        let bytes = response.bytes().await?;
        let listing: Value = serde_json::from_slice(&bytes)?;

        Ok(listing)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_listing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/pilots")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"_id": "a", "name": "Amelia", "coordinates": [51.5, -0.1], "experience": 12}]"#)
            .create_async()
            .await;

        let source = HttpPilotSource::new(format!("{}/api/pilots", server.url()), Duration::from_secs(5)).unwrap();
        let listing = source.fetch_listing().await.unwrap();

        assert_eq!(listing[0]["name"], "Amelia");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/pilots")
            .with_status(500)
            .with_body(r#"{"message": "database unavailable"}"#)
            .create_async()
            .await;

        let source = HttpPilotSource::new(format!("{}/api/pilots", server.url()), Duration::from_secs(5)).unwrap();

        assert!(matches!(source.fetch_listing().await, Err(SourceError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/pilots")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let source = HttpPilotSource::new(format!("{}/api/pilots", server.url()), Duration::from_secs(5)).unwrap();

        assert!(matches!(source.fetch_listing().await, Err(SourceError::ParseError(_))));
    }

    #[test]
    fn test_describe() {
        let source = HttpPilotSource::new("https://pilots.example/api/pilots", Duration::from_secs(1)).unwrap();
        assert_eq!(source.describe(), "http:https://pilots.example/api/pilots");
    }
}
