use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

use crate::FieldKind;

/// Core trait that all text extractors must implement
pub trait Extractor {
    /// Extract contact fields from plain document text
    fn extract(&self, text: &str) -> ExtractionResult;

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Candidate contact fields found in one document.
///
/// Every list keeps first-occurrence order and holds no duplicates. The JSON
/// shape (`names`, `emails`, `phones`, `addresses`) is what export layers read,
/// so every key is always present even when its list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractionResult {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl ExtractionResult {
    /// Values collected for a pattern-matched field
    pub fn field(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Email => &self.emails,
            FieldKind::Phone => &self.phones,
            FieldKind::Address => &self.addresses,
        }
    }

    pub fn total_fields(&self) -> usize {
        self.names.len() + self.emails.len() + self.phones.len() + self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_fields() == 0
    }
}

/// Extraction output together with processing metadata, as handed back to
/// whoever submitted the document.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractionReport {
    pub success: bool,
    pub data: ExtractionResult,
    /// Leading slice of the input text, for eyeballing what was parsed
    pub raw_text: String,
    /// Seconds, rounded to two decimals
    pub processing_time: f64,
    pub total_fields_extracted: usize,

    // Provenance
    pub source: Option<String>,
    pub extracted_at: i64,
    pub extractor_version: String,
}

impl ExtractionReport {
    pub fn new(
        data: ExtractionResult,
        text: &str,
        elapsed: Duration,
        preview_chars: usize,
        extractor_version: String,
    ) -> Self {
        let total_fields_extracted = data.total_fields();

        Self {
            success: true,
            data,
            raw_text: text_preview(text, preview_chars),
            processing_time: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            total_fields_extracted,
            source: None,
            extracted_at: chrono::Utc::now().timestamp(),
            extractor_version,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut short
pub fn text_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            names: vec!["Sarah Johnson".to_string(), "John Smith".to_string()],
            emails: vec!["sarah.johnson@email.com".to_string()],
            phones: vec!["(555) 123-4567".to_string()],
            addresses: vec![],
        }
    }

    #[test]
    fn test_extraction_result_serialization() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["names"][0], "Sarah Johnson");
        assert_eq!(json["emails"][0], "sarah.johnson@email.com");
        // Empty lists are serialized, never dropped or null
        assert!(json["addresses"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_extraction_result_missing_keys_deserialize_empty() {
        let result: ExtractionResult = serde_json::from_str(r#"{"names": ["Ann Lee"]}"#).unwrap();

        assert_eq!(result.names, vec!["Ann Lee"]);
        assert!(result.emails.is_empty());
        assert!(result.phones.is_empty());
        assert!(result.addresses.is_empty());
    }

    #[test]
    fn test_total_fields_and_field_access() {
        let result = sample_result();

        assert_eq!(result.total_fields(), 4);
        assert!(!result.is_empty());
        assert_eq!(result.field(FieldKind::Phone), ["(555) 123-4567"]);
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn test_text_preview() {
        assert_eq!(text_preview("short", 500), "short");
        assert_eq!(text_preview("abcdef", 3), "abc...");
        assert_eq!(text_preview("abc", 3), "abc");
        // Counts characters, not bytes
        assert_eq!(text_preview("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_report_creation() {
        let report = ExtractionReport::new(
            sample_result(),
            "Sarah Johnson sarah.johnson@email.com",
            Duration::from_millis(1234),
            10,
            "0.1.0".to_string(),
        )
        .with_source("resume.txt");

        assert!(report.success);
        assert_eq!(report.total_fields_extracted, 4);
        assert_eq!(report.processing_time, 1.23);
        assert_eq!(report.raw_text, "Sarah John...");
        assert_eq!(report.source.as_deref(), Some("resume.txt"));
    }
}
