use crate::error::QuireError;
use quire_style::PaperSize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings for [`crate::PrintPipeline`]. Loads from JSON with every field
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Upper bound for one producer run.
    pub producer_timeout_ms: u64,
    /// Compress PDF streams.
    pub compress: bool,
    /// Paper size for JSON documents that leave `pageSettings.paperSize` out.
    pub fallback_paper: PaperSize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            producer_timeout_ms: DEFAULT_TIMEOUT_MS,
            compress: true,
            fallback_paper: PaperSize::A4,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, QuireError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.producer_timeout_ms)
    }

    pub(crate) fn check(&self) -> Result<(), QuireError> {
        if self.producer_timeout_ms == 0 {
            return Err(QuireError::Config("producer timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PipelineConfig::from_json(r#"{ "compress": false }"#).unwrap();
        assert!(!config.compress);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.fallback_paper, PaperSize::A4);
    }

    #[test]
    fn paper_size_is_read_by_name() {
        let config = PipelineConfig::from_json(r#"{ "fallbackPaper": "Letter" }"#).unwrap();
        assert_eq!(config.fallback_paper, PaperSize::Letter);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = PipelineConfig::from_json(r#"{ "producerTimeoutMs": 0 }"#).unwrap_err();
        assert!(matches!(err, QuireError::Config(_)));
    }
}
