use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Document text ready for extraction, with where it came from
pub struct DocumentText {
    pub source: String,
    pub text: String,
    /// True when strict UTF-8 decoding failed and invalid bytes were replaced
    pub lossy: bool,
}

/// Read `input` (a file path, or `-` for stdin) into a string
pub fn read_document(input: &str) -> Result<DocumentText> {
    let bytes = if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read text from stdin")?;
        buf
    } else {
        std::fs::read(Path::new(input)).with_context(|| format!("Failed to read {}", input))?
    };

    let source = if input == "-" { "stdin" } else { input };
    Ok(decode_text(source, bytes))
}

/// Strict UTF-8 first; if that fails, fall back to lossy decoding so the
/// extractor still sees whatever text survived.
pub fn decode_text(source: &str, bytes: Vec<u8>) -> DocumentText {
    match String::from_utf8(bytes) {
        Ok(text) => DocumentText {
            source: source.to_string(),
            text,
            lossy: false,
        },
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 ({}), falling back to lossy decoding",
                source,
                e.utf8_error()
            );
            DocumentText {
                source: source.to_string(),
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                lossy: true,
            }
        }
    }
}
