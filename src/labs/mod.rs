//! Lab value extraction from OCR'd report text.
//!
//! The backend OCRs uploaded reports into plain text; this module turns that
//! text into structured rows for the findings table in the report viewer.
//! A single-pass, line-oriented parse with no state and no I/O, total over any
//! input string.

pub mod extract;
pub mod reference;
pub mod types;

pub use extract::{extract_lab_values, LabExtractor};
pub use reference::{ReferenceRange, ReferenceRanges};
pub use types::ExtractedRow;
