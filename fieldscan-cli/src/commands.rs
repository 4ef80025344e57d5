use anyhow::Result;
use extractors::{ContactFieldExtractor, Extractor, LineTrace, LineVerdict};
use serde::Serialize;
use shared_types::{ExtractionReport, FieldKind};
use std::time::Instant;
use tracing::{info, warn};

use crate::input::read_document;

pub fn extract(
    extractor: &ContactFieldExtractor,
    input: &str,
    preview_chars: usize,
) -> Result<ExtractionReport> {
    let document = read_document(input)?;
    let start = Instant::now();

    let data = extractor.extract(&document.text);
    let report = ExtractionReport::new(
        data,
        &document.text,
        start.elapsed(),
        preview_chars,
        extractor.version(),
    )
    .with_source(document.source.clone());

    info!(
        "Text processed: {}, Lossy decode: {}, Fields extracted: {}, Time: {:.2}s",
        document.source,
        document.lossy,
        report.total_fields_extracted,
        report.processing_time
    );

    Ok(report)
}

pub fn extract_field(
    extractor: &ContactFieldExtractor,
    kind: &str,
    input: &str,
) -> Result<Vec<String>> {
    if kind.parse::<FieldKind>().is_err() {
        warn!(
            "Unknown field kind '{}', expected one of: {}",
            kind,
            FieldKind::ALL.map(|k| k.as_str()).join(", ")
        );
    }

    let document = read_document(input)?;
    Ok(extractor.extract_values(&document.text, kind))
}

pub fn explain(extractor: &ContactFieldExtractor, input: &str) -> Result<String> {
    let document = read_document(input)?;
    Ok(render_trace(&extractor.trace_names(&document.text)))
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn render_trace(traces: &[LineTrace]) -> String {
    let mut out = String::new();
    let mut names = Vec::new();

    for trace in traces {
        let verdict = match &trace.verdict {
            LineVerdict::Ignored => continue,
            LineVerdict::Excluded { hits } => format!("excluded ({} exclusion terms)", hits),
            LineVerdict::Claimed {
                rule,
                candidate: Some(name),
            } => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
                format!("{:?} -> {}", rule, name)
            }
            LineVerdict::Claimed {
                rule,
                candidate: None,
            } => format!("{:?} -> no name", rule),
        };
        out.push_str(&format!("{:>4}: {}\n", trace.line_number, trace.text));
        out.push_str(&format!("      {}\n", verdict));
    }

    out.push_str(&format!("\nNames ({}):\n", names.len()));
    for name in &names {
        out.push_str(&format!("  - {}\n", name));
    }

    out
}
