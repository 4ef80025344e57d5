use std::collections::BTreeSet;

/// Section-header words that rarely appear next to a real name
const DEFAULT_EXCLUSIONS: &[&str] = &[
    "resume",
    "cv",
    "curriculum",
    "vitae",
    "profile",
    "summary",
    "objective",
    "experience",
    "education",
    "skills",
    "references",
    "contact",
    "information",
    "phone",
    "email",
    "address",
    "linkedin",
    "github",
    "portfolio",
    "website",
];

/// Lowercase words whose presence marks a line as document chrome rather than
/// a name. Terms match as substrings, so "phone" also counts inside
/// "telephone".
#[derive(Debug, Clone)]
pub struct ExclusionVocabulary {
    terms: BTreeSet<String>,
}

impl ExclusionVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn with_extra<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms.extend(
            terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty()),
        );
        self
    }

    /// Number of distinct terms found anywhere in the line
    pub fn hits(&self, line: &str) -> usize {
        let lowered = line.to_lowercase();
        self.terms
            .iter()
            .filter(|term| lowered.contains(term.as_str()))
            .count()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for ExclusionVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS)
    }
}
