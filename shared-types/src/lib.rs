pub mod extraction;
pub mod field;

pub use extraction::{text_preview, ExtractionError, ExtractionReport, ExtractionResult, Extractor};
pub use field::FieldKind;
