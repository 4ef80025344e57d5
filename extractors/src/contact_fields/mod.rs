mod names;
mod patterns;
mod validators;
mod vocabulary;

pub use names::{is_name_component, LineRule, LineTrace, LineVerdict, NameClassifier};
pub use patterns::{validate_pattern, FieldPattern, FieldPatternSet};
pub use validators::FieldValidator;
pub use vocabulary::ExclusionVocabulary;

use serde::{Deserialize, Serialize};
use shared_types::{ExtractionError, ExtractionResult, Extractor, FieldKind};
use tracing::debug;

/// Tunables for the extraction heuristics. Defaults reproduce the stock
/// behaviour; every field can be overridden from the `[extraction]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Longest accepted name, in characters
    pub max_name_length: usize,
    pub min_phone_digits: usize,
    /// Exclusive lower bound on address length
    pub min_address_length: usize,
    /// Exclusive upper bound on address length
    pub max_address_length: usize,
    pub extra_exclusions: Vec<String>,
    pub extra_patterns: ExtraPatterns,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            max_name_length: 50,
            min_phone_digits: 10,
            min_address_length: 10,
            max_address_length: 200,
            extra_exclusions: Vec::new(),
            extra_patterns: ExtraPatterns::default(),
        }
    }
}

impl ExtractorSettings {
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.max_name_length == 0 {
            return Err(ExtractionError::ConfigError(
                "max_name_length must be greater than 0".to_string(),
            ));
        }
        if self.min_address_length >= self.max_address_length {
            return Err(ExtractionError::ConfigError(format!(
                "min_address_length ({}) must be below max_address_length ({})",
                self.min_address_length, self.max_address_length
            )));
        }
        for kind in FieldKind::ALL {
            for pattern in self.extra_patterns.for_kind(kind) {
                validate_pattern(kind, pattern)?;
            }
        }
        Ok(())
    }
}

/// Additional regex alternatives, tried after the built-in ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraPatterns {
    pub email: Vec<String>,
    pub phone: Vec<String>,
    pub address: Vec<String>,
}

impl ExtraPatterns {
    pub fn for_kind(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Email => &self.email,
            FieldKind::Phone => &self.phone,
            FieldKind::Address => &self.address,
        }
    }
}

/// Pulls names, emails, phone numbers and postal addresses out of plain
/// document text.
///
/// Holds only compiled, read-only tables, so one instance can serve any number
/// of threads. Extraction itself never fails: unusable input just produces
/// empty lists.
pub struct ContactFieldExtractor {
    patterns: FieldPatternSet,
    validator: FieldValidator,
    names: NameClassifier,
}

impl ContactFieldExtractor {
    pub fn new() -> Self {
        Self::from_parts(
            FieldPatternSet::builtin(),
            FieldValidator::default(),
            NameClassifier::default(),
        )
    }

    pub fn with_settings(settings: &ExtractorSettings) -> Result<Self, ExtractionError> {
        settings.validate()?;

        let mut patterns = FieldPatternSet::builtin();
        for kind in FieldKind::ALL {
            patterns = patterns.with_extra_patterns(kind, settings.extra_patterns.for_kind(kind))?;
        }

        let vocabulary = ExclusionVocabulary::default().with_extra(&settings.extra_exclusions);

        Ok(Self::from_parts(
            patterns,
            FieldValidator::new(settings),
            NameClassifier::new(vocabulary, settings),
        ))
    }

    pub fn from_parts(
        patterns: FieldPatternSet,
        validator: FieldValidator,
        names: NameClassifier,
    ) -> Self {
        Self {
            patterns,
            validator,
            names,
        }
    }

    pub fn extract_structured_data(&self, text: &str) -> ExtractionResult {
        if text.trim().is_empty() {
            debug!("empty text, nothing to extract");
            return ExtractionResult::default();
        }

        let result = ExtractionResult {
            names: self.names.extract_names(text),
            emails: self.extract_field(text, FieldKind::Email),
            phones: self.extract_field(text, FieldKind::Phone),
            addresses: self.extract_field(text, FieldKind::Address),
        };

        debug!(
            names = result.names.len(),
            emails = result.emails.len(),
            phones = result.phones.len(),
            addresses = result.addresses.len(),
            "extracted contact fields"
        );

        result
    }

    /// Validated, deduplicated values for one pattern-matched field
    pub fn extract_field(&self, text: &str, kind: FieldKind) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();

        for raw in self.patterns.find_all(text, kind) {
            if let Some(cleaned) = self.validator.validate(kind, &raw) {
                if !values.contains(&cleaned) {
                    values.push(cleaned);
                }
            }
        }

        values
    }

    /// Like `extract_field`, keyed by name. Unknown kinds give an empty list.
    pub fn extract_values(&self, text: &str, kind: &str) -> Vec<String> {
        match kind.parse::<FieldKind>() {
            Ok(kind) => self.extract_field(text, kind),
            Err(e) => {
                debug!("{}", e);
                Vec::new()
            }
        }
    }

    pub fn trace_names(&self, text: &str) -> Vec<LineTrace> {
        self.names.trace(text)
    }
}

impl Default for ContactFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ContactFieldExtractor {
    fn extract(&self, text: &str) -> ExtractionResult {
        self.extract_structured_data(text)
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
