use regex::{Regex, RegexBuilder};
use shared_types::{ExtractionError, FieldKind};

const STREET_KEYWORDS: &str =
    "Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Place|Pl|Way|Circle|Cir";

/// One regex alternative for a field. Alternatives for the same field may
/// overlap; duplicates are resolved after validation.
pub struct FieldPattern {
    pub name: String,
    pub kind: FieldKind,
    pub regex: Regex,
}

impl FieldPattern {
    /// Compile a pattern with the flags every field alternative runs under
    /// (case-insensitive, multi-line).
    pub fn compile(
        name: impl Into<String>,
        kind: FieldKind,
        pattern: &str,
    ) -> Result<Self, ExtractionError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|e| {
                ExtractionError::ConfigError(format!("Invalid {} pattern: {}", kind, e))
            })?;

        Ok(Self {
            name: name.into(),
            kind,
            regex,
        })
    }

    /// Every non-overlapping hit as `(start offset, whole-match text)`, in text order
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        self.regex.find_iter(text).map(|m| (m.start(), m.as_str()))
    }
}

/// Ordered regex alternatives per field kind
pub struct FieldPatternSet {
    patterns: Vec<FieldPattern>,
}

impl FieldPatternSet {
    pub fn builtin() -> Self {
        Self {
            patterns: create_field_patterns(),
        }
    }

    /// Append user supplied alternatives after the built-in ones for `kind`
    pub fn with_extra_patterns(
        mut self,
        kind: FieldKind,
        patterns: &[String],
    ) -> Result<Self, ExtractionError> {
        for (i, pattern) in patterns.iter().enumerate() {
            validate_pattern(kind, pattern)?;
            self.patterns.push(FieldPattern::compile(
                format!("custom_{}_{}", kind, i + 1),
                kind,
                pattern,
            )?);
        }

        Ok(self)
    }

    pub fn patterns_for(&self, kind: FieldKind) -> impl Iterator<Item = &FieldPattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }

    /// Raw matches of every alternative for `kind`, in source order. Matches
    /// starting at the same offset keep alternative order. Nothing is
    /// validated or deduplicated here.
    pub fn find_all(&self, text: &str, kind: FieldKind) -> Vec<String> {
        let mut hits: Vec<(usize, &str)> = self
            .patterns_for(kind)
            .flat_map(|pattern| pattern.find_all(text))
            .collect();

        // Stable, so ties stay in alternative order
        hits.sort_by_key(|(start, _)| *start);

        hits.into_iter().map(|(_, raw)| raw.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for FieldPatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Check a user supplied alternative before it joins the set
pub fn validate_pattern(kind: FieldKind, pattern: &str) -> Result<(), ExtractionError> {
    if pattern.trim().is_empty() {
        return Err(ExtractionError::ConfigError(format!(
            "Empty {} pattern",
            kind
        )));
    }

    let compiled = FieldPattern::compile("validation", kind, pattern)?;

    // A pattern matching nothing at all would flood the results with empty candidates
    if compiled.regex.is_match("") {
        return Err(ExtractionError::ConfigError(format!(
            "{} pattern '{}' matches the empty string",
            kind, pattern
        )));
    }

    Ok(())
}

fn builtin(name: &str, kind: FieldKind, pattern: &str) -> FieldPattern {
    FieldPattern::compile(name, kind, pattern).expect("built-in field pattern must compile")
}

fn create_field_patterns() -> Vec<FieldPattern> {
    vec![
        // Email
        builtin(
            "email_strict",
            FieldKind::Email,
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
        ),
        // PDF text extraction sometimes splits addresses around '@' and '.'
        builtin(
            "email_spaced",
            FieldKind::Email,
            r"[A-Za-z0-9._%+-]+\s*@\s*[A-Za-z0-9.-]+\s*\.\s*[A-Z|a-z]{2,}",
        ),

        // Phone
        builtin(
            "phone_area_code",
            FieldKind::Phone,
            r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        ),
        builtin(
            "phone_international",
            FieldKind::Phone,
            r"\+?\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4}",
        ),
        builtin(
            "phone_ten_digit",
            FieldKind::Phone,
            r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
        ),
        builtin(
            "phone_parenthesized",
            FieldKind::Phone,
            r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}",
        ),
        builtin(
            "phone_country_loose",
            FieldKind::Phone,
            r"\+\d{1,3}\s?\d{3,4}\s?\d{3,4}\s?\d{3,4}",
        ),

        // Address
        builtin(
            "address_street_trailing",
            FieldKind::Address,
            &format!(
                r"\d+\s+[A-Za-z0-9\s,.-]+(?:{})(?:\s+[A-Za-z0-9\s,.-]*)?",
                STREET_KEYWORDS
            ),
        ),
        builtin(
            "address_street",
            FieldKind::Address,
            &format!(r"\d+\s+[A-Za-z\s]+(?:{})", STREET_KEYWORDS),
        ),
        builtin("address_po_box", FieldKind::Address, r"P\.?O\.?\s+Box\s+\d+"),
        builtin(
            "address_city_state_zip",
            FieldKind::Address,
            r"\d+\s+[A-Za-z\s]+,\s*[A-Za-z\s]+,\s*[A-Z]{2}\s+\d{5}",
        ),
    ]
}
