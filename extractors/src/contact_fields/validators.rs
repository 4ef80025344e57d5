use regex::Regex;
use shared_types::FieldKind;

use super::ExtractorSettings;

/// Cleans raw pattern matches and decides whether they are worth keeping.
///
/// Every check is total: a bad candidate is rejected with `None`, never an error.
pub struct FieldValidator {
    min_phone_digits: usize,
    min_address_length: usize,
    max_address_length: usize,
    trailing_header: Regex,
    leading_header: Regex,
    line_breaks: Regex,
    digit: Regex,
    all_digits: Regex,
}

impl FieldValidator {
    pub fn new(settings: &ExtractorSettings) -> Self {
        Self {
            min_phone_digits: settings.min_phone_digits,
            min_address_length: settings.min_address_length,
            max_address_length: settings.max_address_length,
            trailing_header: Regex::new(r"\n[A-Z\s]+$").expect("trailing header pattern"),
            leading_header: Regex::new(r"^[A-Z\s]+\n").expect("leading header pattern"),
            line_breaks: Regex::new(r"\n+").expect("line break pattern"),
            // Same Unicode `\d` the field patterns match with
            digit: Regex::new(r"\d").expect("digit pattern"),
            all_digits: Regex::new(r"^\d+$").expect("all digits pattern"),
        }
    }

    pub fn validate(&self, kind: FieldKind, raw: &str) -> Option<String> {
        match kind {
            FieldKind::Email => self.clean_email(raw),
            FieldKind::Phone => self.clean_phone(raw),
            FieldKind::Address => self.clean_address(raw),
        }
    }

    /// Drop any whitespace the PDF layer injected, then lower-case
    pub fn clean_email(&self, raw: &str) -> Option<String> {
        let email: String = raw.split_whitespace().collect();

        let domain = email.split('@').nth(1)?;
        if !domain.contains('.') {
            return None;
        }

        Some(email.to_lowercase())
    }

    /// Keeps the number as written; digits are only counted
    pub fn clean_phone(&self, raw: &str) -> Option<String> {
        let digits = self.digit.find_iter(raw).count();

        if digits >= self.min_phone_digits {
            Some(raw.trim().to_string())
        } else {
            None
        }
    }

    pub fn clean_address(&self, raw: &str) -> Option<String> {
        let address = raw.trim();
        let address = self.trailing_header.replace(address, "");
        let address = self.leading_header.replace(&address, "");
        let address = self.line_breaks.replace_all(&address, " ");
        let address = address.trim();

        let length = address.chars().count();
        let has_digit = self.digit.is_match(address);
        let only_digits = self.all_digits.is_match(address);

        if length > self.min_address_length
            && length < self.max_address_length
            && has_digit
            && !only_digits
        {
            Some(address.to_string())
        } else {
            None
        }
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(&ExtractorSettings::default())
    }
}
