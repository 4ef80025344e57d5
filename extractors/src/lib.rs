//! Extractors Crate
//!
//! This crate turns plain document text (resumes, business cards, invoices,
//! directories) into candidate contact fields: names, emails, phone numbers and
//! postal addresses. It does no I/O; getting text out of a PDF is the caller's
//! job.
//!
//! # Architecture
//!
//! - **Types**: `ExtractionResult`, `FieldKind` and the `Extractor` trait live in
//!   the `shared-types` crate
//! - **Implementations**: the heuristics live here
//!
//! # Stages
//!
//! - `FieldPatternSet`: regex alternatives per field kind, matched over the whole text
//! - `FieldValidator`: cleans each raw match or rejects it
//! - `NameClassifier`: line-by-line rule cascade for names
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::ContactFieldExtractor;
//! use shared_types::Extractor;
//!
//! let extractor = ContactFieldExtractor::new();
//! let result = extractor.extract("Sarah Johnson sarah.johnson@email.com");
//! assert_eq!(result.names, vec!["Sarah Johnson"]);
//! ```

pub mod contact_fields;

// Re-export commonly used types
pub use contact_fields::{
    ContactFieldExtractor, ExclusionVocabulary, ExtraPatterns, ExtractorSettings,
    FieldPatternSet, FieldValidator, LineRule, LineTrace, LineVerdict, NameClassifier,
};

// Re-export the Extractor trait from shared-types for convenience
pub use shared_types::Extractor;
