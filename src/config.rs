//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::transport::SimulatedTransport;

/// Environment variable that overrides the résumé path
pub const RESUME_ENV: &str = "CV_TUI_RESUME";

/// Which transport delivers the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Simulated,
    Outbox,
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CvConfig {
    /// Résumé document to show instead of the built-in one
    pub resume_path: Option<PathBuf>,
    /// Contact form transport
    pub transport: Option<TransportKind>,
    /// Simulated transport delay
    pub submit_delay_ms: Option<u64>,
    /// Simulated transport success probability
    pub submit_success_rate: Option<f64>,
    /// Outbox transport file
    pub outbox_path: Option<PathBuf>,
    /// Use unicode glyphs for icons
    pub unicode_icons: Option<bool>,
}

impl CvConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "cv-tui", "cv-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: CvConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Résumé path from the environment, falling back to the config file
    pub fn resume_path(&self) -> Option<PathBuf> {
        std::env::var_os(RESUME_ENV)
            .map(PathBuf::from)
            .or_else(|| self.resume_path.clone())
    }

    pub fn transport(&self) -> TransportKind {
        self.transport.unwrap_or_default()
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(SimulatedTransport::DEFAULT_DELAY)
    }

    pub fn submit_success_rate(&self) -> f64 {
        self.submit_success_rate
            .unwrap_or(SimulatedTransport::DEFAULT_SUCCESS_RATE)
            .clamp(0.0, 1.0)
    }

    /// Outbox file, defaulting to the platform data directory
    pub fn outbox_path(&self) -> PathBuf {
        self.outbox_path.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("outbox.jsonl"))
                .unwrap_or_else(|| PathBuf::from("cv-tui-outbox.jsonl"))
        })
    }

    pub fn unicode_icons(&self) -> bool {
        self.unicode_icons.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CvConfig::default();
        assert!(config.resume_path.is_none());
        assert!(config.transport.is_none());
        assert!(config.submit_delay_ms.is_none());
        assert!(config.submit_success_rate.is_none());
        assert!(config.outbox_path.is_none());
        assert!(config.unicode_icons.is_none());
    }

    #[test]
    fn test_defaults_through_accessors() {
        let config = CvConfig::default();
        assert_eq!(config.transport(), TransportKind::Simulated);
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.submit_success_rate(), 0.9);
        assert!(config.unicode_icons());
        assert!(config.outbox_path().ends_with("outbox.jsonl"));
    }

    #[test]
    fn test_serialization() {
        let config = CvConfig {
            resume_path: Some(PathBuf::from("/tmp/cv.json")),
            transport: Some(TransportKind::Outbox),
            submit_delay_ms: Some(10),
            submit_success_rate: Some(0.5),
            outbox_path: Some(PathBuf::from("/tmp/outbox.jsonl")),
            unicode_icons: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""transport":"outbox""#));
        let parsed: CvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_success_rate_is_clamped() {
        let config = CvConfig {
            submit_success_rate: Some(7.0),
            ..Default::default()
        };
        assert_eq!(config.submit_success_rate(), 1.0);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: CvConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, CvConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"transport": "simulated", "unknown_field": "value"}"#;
        let parsed: CvConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.transport, Some(TransportKind::Simulated));
    }

    #[test]
    fn test_unknown_transport_is_rejected() {
        let json = r#"{"transport": "carrier-pigeon"}"#;
        assert!(serde_json::from_str::<CvConfig>(json).is_err());
    }

    #[test]
    fn test_configured_resume_path() {
        let config = CvConfig {
            resume_path: Some(PathBuf::from("/srv/cv.json")),
            ..Default::default()
        };
        if std::env::var_os(RESUME_ENV).is_none() {
            assert_eq!(config.resume_path(), Some(PathBuf::from("/srv/cv.json")));
        }
    }

    #[test]
    fn test_load_returns_ok_when_no_file() {
        // Load should return default config when file doesn't exist
        let result = CvConfig::load();
        assert!(result.is_ok());
    }
}
