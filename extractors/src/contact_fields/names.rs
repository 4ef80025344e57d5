//! Line-oriented name detection.
//!
//! Extracted PDF text carries no layout, so names are guessed from the shape of
//! each line. Lines are independent: nothing learned on one line is carried to
//! the next. Each line goes through the exclusion filter and then through an
//! ordered rule table where the first rule that applies owns the line, whether
//! or not it produces a name.

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use super::vocabulary::ExclusionVocabulary;
use super::ExtractorSettings;

const MIN_LINE_CHARS: usize = 3;
const MAX_EXCLUSION_HITS: usize = 1;
const NAME_PARTS: usize = 2;
const FREE_FORM_TOKENS: std::ops::RangeInclusive<usize> = 2..=6;
const FREE_FORM_SCAN: usize = 4;

/// Line shapes the classifier knows about, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineRule {
    /// `Sarah Johnson sarah.johnson@email.com`
    EmailLine,
    /// A directory row flattened into one line: name, department, email, phone
    TabularRow,
    /// Anything else, e.g. a name on its own line or `Emily Davis - Lead Developer`
    FreeForm,
}

impl LineRule {
    pub const CASCADE: [LineRule; 3] = [LineRule::EmailLine, LineRule::TabularRow, LineRule::FreeForm];
}

/// What the classifier decided for one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum LineVerdict {
    /// Blank or too short to hold a name
    Ignored,
    /// Too many exclusion-vocabulary terms
    Excluded { hits: usize },
    /// `rule` owned the line; `candidate` is the name it accepted, if any
    Claimed {
        rule: LineRule,
        candidate: Option<String>,
    },
}

/// One physical line of input with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTrace {
    pub line_number: usize,
    pub text: String,
    #[serde(flatten)]
    pub verdict: LineVerdict,
}

pub struct NameClassifier {
    vocabulary: ExclusionVocabulary,
    max_name_length: usize,
    tabular_with_phone: Regex,
    tabular_three_words: Regex,
}

impl NameClassifier {
    pub fn new(vocabulary: ExclusionVocabulary, settings: &ExtractorSettings) -> Self {
        Self {
            vocabulary,
            max_name_length: settings.max_name_length,
            tabular_with_phone: Regex::new(
                r"[A-Z][a-z]+\s+[A-Z][a-z]+\s+\w+\s+[\w@.-]+@[\w.-]+\s+\(\d{3}\)",
            )
            .expect("tabular row pattern"),
            tabular_three_words: Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+\s+[\w@.-]+@")
                .expect("tabular row pattern"),
        }
    }

    /// Candidate names in order of first appearance, without duplicates
    pub fn extract_names(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for line in text.split('\n') {
            if let LineVerdict::Claimed {
                candidate: Some(name),
                ..
            } = self.classify(line)
            {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        names
    }

    /// Verdict for every line, numbered from 1
    pub fn trace(&self, text: &str) -> Vec<LineTrace> {
        text.split('\n')
            .enumerate()
            .map(|(i, line)| LineTrace {
                line_number: i + 1,
                text: line.trim().to_string(),
                verdict: self.classify(line),
            })
            .collect()
    }

    pub fn classify(&self, line: &str) -> LineVerdict {
        let line = line.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            return LineVerdict::Ignored;
        }

        let hits = self.vocabulary.hits(line);
        if hits > MAX_EXCLUSION_HITS {
            trace!(line, hits, "line excluded");
            return LineVerdict::Excluded { hits };
        }

        for rule in LineRule::CASCADE {
            if self.applies(rule, line) {
                let candidate = self.candidate(rule, line);
                trace!(line, ?rule, ?candidate, "line classified");
                return LineVerdict::Claimed { rule, candidate };
            }
        }

        LineVerdict::Ignored
    }

    pub fn applies(&self, rule: LineRule, line: &str) -> bool {
        match rule {
            LineRule::EmailLine => line.contains('@'),
            LineRule::TabularRow => {
                self.tabular_with_phone.is_match(line) || self.tabular_three_words.is_match(line)
            }
            LineRule::FreeForm => true,
        }
    }

    /// Name proposed by `rule` for a line it applies to
    pub fn candidate(&self, rule: LineRule, line: &str) -> Option<String> {
        match rule {
            LineRule::EmailLine => self.from_email_line(line),
            LineRule::TabularRow => from_tabular_row(line),
            LineRule::FreeForm => self.from_free_form(line),
        }
    }

    /// Leading name-like tokens before the address, e.g. department columns
    /// stop the walk
    fn from_email_line(&self, line: &str) -> Option<String> {
        let mut parts = Vec::new();

        for token in line.split_whitespace() {
            if token.contains('@') {
                break;
            }
            let word = strip_non_word(token);
            if !is_name_component(&word) {
                break;
            }
            parts.push(word);
        }

        parts.truncate(NAME_PARTS);
        if parts.len() < NAME_PARTS {
            return None;
        }

        self.capped(parts.join(" "))
    }

    fn from_free_form(&self, line: &str) -> Option<String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !FREE_FORM_TOKENS.contains(&tokens.len()) {
            return None;
        }

        let parts: Vec<String> = tokens
            .iter()
            .take(FREE_FORM_SCAN)
            .map(|token| strip_non_word(token))
            .take_while(|word| is_name_component(word))
            .collect();

        if parts.len() < NAME_PARTS {
            return None;
        }

        self.capped(parts.join(" "))
    }

    fn capped(&self, name: String) -> Option<String> {
        if name.chars().count() <= self.max_name_length {
            Some(name)
        } else {
            None
        }
    }
}

impl Default for NameClassifier {
    fn default() -> Self {
        Self::new(ExclusionVocabulary::default(), &ExtractorSettings::default())
    }
}

/// First two raw tokens of the row; no length cap applies here
fn from_tabular_row(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    let second = tokens.next()?;

    if is_name_component(first) && is_name_component(second) {
        Some(format!("{} {}", first, second))
    } else {
        None
    }
}

/// Keep letters, digits and underscores
fn strip_non_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Capitalized alphabetic word of at least two letters: `Sarah` yes, `HR`,
/// `sarah`, `O'Neil` and `J` no
pub fn is_name_component(word: &str) -> bool {
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let rest = chars.as_str();

    !rest.is_empty()
        && first.is_uppercase()
        && word.chars().all(char::is_alphabetic)
        && rest.chars().any(char::is_lowercase)
        && !rest.chars().any(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        NameClassifier::default().extract_names(text)
    }

    #[test]
    fn test_name_component() {
        assert!(is_name_component("Sarah"));
        assert!(is_name_component("Jo"));
        assert!(is_name_component("Émile"));
        assert!(!is_name_component("HR"));
        assert!(!is_name_component("sarah"));
        assert!(!is_name_component("McDonald"));
        assert!(!is_name_component("J"));
        assert!(!is_name_component("R2d2"));
        assert!(!is_name_component(""));
    }

    #[test]
    fn test_email_line() {
        assert_eq!(
            names("Sarah Johnson sarah.johnson@email.com"),
            vec!["Sarah Johnson"]
        );
    }

    #[test]
    fn test_email_line_stops_at_department() {
        assert_eq!(
            names("Rachel Green HR rachel.green@techstart.com (555) 100-2001 Building A, Room 101"),
            vec!["Rachel Green"]
        );
    }

    #[test]
    fn test_email_line_keeps_first_two_parts() {
        assert_eq!(
            names("Ross Geller Engineering ross.geller@techstart.com (555) 100-2002"),
            vec!["Ross Geller"]
        );
    }

    #[test]
    fn test_email_line_needs_two_parts() {
        let classifier = NameClassifier::default();

        assert_eq!(
            classifier.classify("Security: security@techstart.com | (555) 100-2010"),
            LineVerdict::Claimed {
                rule: LineRule::EmailLine,
                candidate: None
            }
        );
    }

    #[test]
    fn test_email_line_claims_line_even_without_name() {
        // The free-form rule never gets a look at an email line
        let classifier = NameClassifier::default();

        assert_eq!(
            classifier.classify("mail me: bob@example.com"),
            LineVerdict::Claimed {
                rule: LineRule::EmailLine,
                candidate: None
            }
        );
    }

    #[test]
    fn test_exclusion_suppresses_line() {
        let classifier = NameClassifier::default();

        assert_eq!(
            classifier.classify("References Contact Information"),
            LineVerdict::Excluded { hits: 3 }
        );
        assert!(names("References Contact Information").is_empty());
    }

    #[test]
    fn test_single_exclusion_tolerated() {
        assert_eq!(names("Contact Person Maria Rodriguez"), vec!["Contact Person Maria Rodriguez"]);
    }

    #[test]
    fn test_tabular_row_rule() {
        let classifier = NameClassifier::default();
        let row = "Rachel Green Hr rachel.green@techstart.com (555) 100-2001";

        assert!(classifier.applies(LineRule::TabularRow, row));
        assert_eq!(
            classifier.candidate(LineRule::TabularRow, row),
            Some("Rachel Green".to_string())
        );

        let three_words = "Mary Jane Watson mj.watson@dailybugle.com";
        assert!(classifier.applies(LineRule::TabularRow, three_words));
        assert_eq!(
            classifier.candidate(LineRule::TabularRow, three_words),
            Some("Mary Jane".to_string())
        );

        assert!(!classifier.applies(LineRule::TabularRow, "Rachel Green works in HR"));
    }

    #[test]
    fn test_tabular_row_uses_raw_tokens() {
        let classifier = NameClassifier::default();
        let row = "Rachel, Green Hr rachel.green@techstart.com (555) 100-2001";

        // Punctuation is not stripped, so "Rachel," is not a name component
        assert_eq!(classifier.candidate(LineRule::TabularRow, row), None);
    }

    #[test]
    fn test_free_form_name_line() {
        assert_eq!(names("Emily Davis - Lead Developer, StartupXYZ"), vec!["Emily Davis"]);
        assert_eq!(names("Michael Brown - Technical Director"), vec!["Michael Brown"]);
    }

    #[test]
    fn test_free_form_is_prefix_not_filter() {
        assert!(names("Alice bob Carol").is_empty());
    }

    #[test]
    fn test_free_form_scans_four_tokens() {
        assert_eq!(
            names("Anna Maria Louise Foster Smith"),
            vec!["Anna Maria Louise Foster"]
        );
    }

    #[test]
    fn test_free_form_token_range() {
        assert!(names("Madonna").is_empty());
        assert!(names("John Smith - Senior Manager, TechCorp Inc.").is_empty());
    }

    #[test]
    fn test_all_caps_names_missed() {
        assert!(names("SARAH JOHNSON").is_empty());
    }

    #[test]
    fn test_length_cap() {
        let long = "Abcdefghijklmno Abcdefghijklmno Abcdefghijklmno Abcdefghijklmno";
        assert!(names(long).is_empty());

        let settings = ExtractorSettings {
            max_name_length: 80,
            ..ExtractorSettings::default()
        };
        let classifier = NameClassifier::new(ExclusionVocabulary::default(), &settings);
        assert_eq!(classifier.extract_names(long), vec![long]);
    }

    #[test]
    fn test_duplicates_and_order() {
        let text = "Emily Davis\nJames Wilson\nEmily Davis\nAnna Foster";

        assert_eq!(names(text), vec!["Emily Davis", "James Wilson", "Anna Foster"]);
    }

    #[test]
    fn test_short_and_blank_lines_ignored() {
        let classifier = NameClassifier::default();

        assert_eq!(classifier.classify(""), LineVerdict::Ignored);
        assert_eq!(classifier.classify("   Al  "), LineVerdict::Ignored);
    }

    #[test]
    fn test_trace_numbers_every_line() {
        let classifier = NameClassifier::default();
        let traces = classifier.trace("RESUME\n\nSarah Johnson\n");

        assert_eq!(traces.len(), 4);
        assert_eq!(traces[2].line_number, 3);
        assert_eq!(
            traces[2].verdict,
            LineVerdict::Claimed {
                rule: LineRule::FreeForm,
                candidate: Some("Sarah Johnson".to_string())
            }
        );
        assert_eq!(traces[1].verdict, LineVerdict::Ignored);
    }

    #[test]
    fn test_trace_serialization() {
        let classifier = NameClassifier::default();
        let traces = classifier.trace("Sarah Johnson sarah@example.com");
        let json = serde_json::to_value(&traces).unwrap();

        assert_eq!(json[0]["verdict"], "claimed");
        assert_eq!(json[0]["rule"], "email-line");
        assert_eq!(json[0]["candidate"], "Sarah Johnson");
    }
}
