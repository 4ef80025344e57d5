use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::ExtractionError;

/// Contact fields found by pattern matching. Names are not a field kind: they
/// come from the line classifier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum FieldKind {
    Email,
    Phone,
    Address,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Email, FieldKind::Phone, FieldKind::Address];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Address => "address",
        }
    }

    /// Key of this field's list in `ExtractionResult` JSON
    pub fn result_key(&self) -> &'static str {
        match self {
            FieldKind::Email => "emails",
            FieldKind::Phone => "phones",
            FieldKind::Address => "addresses",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(FieldKind::Email),
            "phone" => Ok(FieldKind::Phone),
            "address" => Ok(FieldKind::Address),
            other => Err(ExtractionError::InvalidInput(format!(
                "unknown field kind '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_serialization() {
        let json = serde_json::to_string(&FieldKind::Address).unwrap();
        assert_eq!(json, "\"address\"");

        let deserialized: FieldKind = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(deserialized, FieldKind::Phone);
    }

    #[test]
    fn test_field_kind_from_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }

        let err = "fax".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
        assert!(err.to_string().contains("fax"));
    }
}
