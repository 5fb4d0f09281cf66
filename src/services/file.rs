use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::services::source::{PilotSource, SourceError};

/// Pilot listing stored as a JSON file
///
/// The file is re-read on every fetch so edits show up without a restart.
pub struct FilePilotSource {
    path: PathBuf,
}

impl FilePilotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PilotSource for FilePilotSource {
    async fn fetch_listing(&self) -> Result<Value, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let listing: Value = serde_json::from_slice(&bytes)?;

        tracing::debug!("Read pilot listing from {}", self.path.display());

        Ok(listing)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_listing(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pilot-locator-{}-{}.json", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_listing() {
        let path = temp_listing("ok", r#"[{"_id": "a", "coordinates": [0, 0]}]"#);
        let source = FilePilotSource::new(&path);

        let listing = tokio_test::block_on(source.fetch_listing()).unwrap();

        assert_eq!(listing.as_array().map(Vec::len), Some(1));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_listing("broken", "[{\"_id\": ");
        let source = FilePilotSource::new(&path);

        let result = tokio_test::block_on(source.fetch_listing());

        assert!(matches!(result, Err(SourceError::ParseError(_))));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FilePilotSource::new("does/not/exist.json");

        assert!(matches!(source.fetch_listing().await, Err(SourceError::IoError(_))));
    }
}
