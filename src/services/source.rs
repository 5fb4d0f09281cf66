use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{SourceKind, SourceSettings};
use crate::services::{FilePilotSource, HttpPilotSource};

/// Default timeout for remote listing requests
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while fetching the pilot listing
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Listing source returned error: {0}")]
    ApiError(String),

    #[error("Failed to read listing: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Listing is not valid JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Source misconfigured: {0}")]
    Misconfigured(String),
}

/// Read-only supplier of the raw pilot listing
///
/// Implementations return the listing exactly as stored; shape checks
/// happen in `core::listing`.
#[async_trait]
pub trait PilotSource: Send + Sync {
    async fn fetch_listing(&self) -> Result<Value, SourceError>;

    /// Human-readable description for logs and health output
    fn describe(&self) -> String;
}

/// Build the configured pilot source
pub fn build_source(settings: &SourceSettings) -> Result<Arc<dyn PilotSource>, SourceError> {
    match settings.kind {
        SourceKind::File => {
            let path = settings
                .path
                .as_deref()
                .ok_or_else(|| SourceError::Misconfigured("source.path is required for file sources".into()))?;
            Ok(Arc::new(FilePilotSource::new(path)))
        }
        SourceKind::Http => {
            let url = settings
                .url
                .as_deref()
                .ok_or_else(|| SourceError::Misconfigured("source.url is required for http sources".into()))?;
            let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
            Ok(Arc::new(HttpPilotSource::new(url, timeout)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_source() {
        let source = build_source(&SourceSettings::default()).unwrap();
        assert_eq!(source.describe(), "file:data/pilots.json");
    }

    #[test]
    fn test_build_http_source() {
        let settings = SourceSettings {
            kind: SourceKind::Http,
            path: None,
            url: Some("http://localhost:5000/api/pilots".to_string()),
            timeout_secs: Some(5),
        };

        let source = build_source(&settings).unwrap();
        assert_eq!(source.describe(), "http:http://localhost:5000/api/pilots");
    }

    #[test]
    fn test_missing_location_is_misconfigured() {
        let settings = SourceSettings {
            kind: SourceKind::Http,
            path: None,
            url: None,
            timeout_secs: None,
        };

        assert!(matches!(build_source(&settings), Err(SourceError::Misconfigured(_))));
    }
}
