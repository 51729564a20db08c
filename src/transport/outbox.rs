//! Transport that appends submissions to a local JSON-lines file

use super::{FormData, SubmissionTransport, TransportError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct OutboxRecord<'a> {
    id: Uuid,
    submitted_at: DateTime<Utc>,
    fields: &'a FormData,
}

/// Appends one JSON object per submission to `path`
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    path: PathBuf,
}

impl OutboxTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TransportError {
        TransportError::Outbox {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SubmissionTransport for OutboxTransport {
    async fn send(&self, data: FormData) -> Result<(), TransportError> {
        let record = OutboxRecord {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            fields: &data,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::info!(
            id = %record.id,
            path = %self.path.display(),
            "submission written to outbox"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "outbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormData {
        let mut data = FormData::new();
        data.insert("name", "Ada");
        data.insert("message", "Hello there, friend");
        data
    }

    #[tokio::test]
    async fn test_appends_one_line_per_submission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("outbox.jsonl");
        let transport = OutboxTransport::new(&path);

        transport.send(sample()).await.unwrap();
        transport.send(sample()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["fields"]["name"], "Ada");
        assert!(parsed["id"].is_string());
        assert!(parsed["submitted_at"].is_string());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let transport = OutboxTransport::new(dir.path());

        let result = transport.send(sample()).await;
        assert!(matches!(result, Err(TransportError::Outbox { .. })));
    }
}
