//! The line-oriented value parser.
//!
//! Each line is matched against one composite pattern capturing, in order:
//! test name, optional separator, numeric value, optional unit, optional
//! abnormality flag, optional inline reference range. Lines that fail any
//! step are skipped; the parse never errors and preserves input order.
//!
//! Precedence rules:
//! - inline unit and inline range win over the reference table;
//! - an explicit flag token always wins over numeric-bound inference;
//! - a bare token after the value is a flag only if it is in the fixed
//!   flag vocabulary, otherwise it is the unit.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::reference::ReferenceRanges;
use super::types::ExtractedRow;
use crate::models::enums::LabStatus;

/// Composite line pattern. Group order: name, value, unit, flag, low, high.
/// The `\b` before the value keeps digit-bearing names (HbA1c) intact
/// instead of splitting them mid-word.
const LINE_PATTERN: &str = r"(?i)([A-Za-z][A-Za-z0-9 /().%'-]{2,34}?)\s*[:\-]?\s*\b([\d.]+)\s*([A-Za-z/%µ*]+)?\s*(HIGH|LOW|NORMAL|ABNORMAL|\(H\)|\(L\)|H|L)?\s*(?:[\[(]?([\d.]+)\s*[-–]\s*([\d.]+)[\])]?)?";

/// Lines shorter than this after trimming are noise (page numbers, rules).
const MIN_LINE_CHARS: usize = 4;

/// Shortest plausible test name; anything under this is a stray token.
const MIN_NAME_CHARS: usize = 3;

/// An explicit abnormality marker from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagToken {
    High,
    Low,
    Normal,
    Abnormal,
}

fn parse_flag(token: &str) -> Option<FlagToken> {
    match token.to_uppercase().as_str() {
        "H" | "HIGH" | "(H)" => Some(FlagToken::High),
        "L" | "LOW" | "(L)" => Some(FlagToken::Low),
        "NORMAL" => Some(FlagToken::Normal),
        "ABNORMAL" => Some(FlagToken::Abnormal),
        _ => None,
    }
}

/// Stateless extractor: a compiled pattern plus an immutable range table.
/// Each [`extract`](LabExtractor::extract) call recomputes from scratch.
pub struct LabExtractor {
    pattern: Regex,
    ranges: ReferenceRanges,
}

impl LabExtractor {
    pub fn new() -> Self {
        Self::with_ranges(ReferenceRanges::builtin())
    }

    pub fn with_ranges(ranges: ReferenceRanges) -> Self {
        Self {
            pattern: Regex::new(LINE_PATTERN).expect("hard-coded line pattern compiles"),
            ranges,
        }
    }

    pub fn ranges(&self) -> &ReferenceRanges {
        &self.ranges
    }

    /// Parse OCR'd report text into structured rows, preserving line order.
    /// Total over any input: unrecognized lines are skipped, never reported.
    pub fn extract(&self, text: &str) -> Vec<ExtractedRow> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.chars().count() < MIN_LINE_CHARS {
                continue;
            }
            if let Some(row) = self.parse_line(trimmed) {
                rows.push(row);
            }
        }
        debug!(rows = rows.len(), "lab extraction finished");
        rows
    }

    fn parse_line(&self, line: &str) -> Option<ExtractedRow> {
        let caps = self.pattern.captures(line)?;

        let test_name = caps.get(1)?.as_str().trim();
        if test_name.chars().count() < MIN_NAME_CHARS
            || test_name.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        // OCR often leaves a sentence period glued to the number.
        let value: f64 = caps
            .get(2)?
            .as_str()
            .trim_end_matches('.')
            .parse()
            .ok()?;

        let unit_cap = caps.get(3).map(|m| m.as_str());
        let flag_cap = caps.get(4).map(|m| m.as_str());

        // A bare vocabulary token lands in the unit capture when no real
        // unit precedes it ("WBC 12000 H"). Reassign it to the flag slot.
        let (inline_unit, flag) = match (unit_cap, flag_cap) {
            (unit, Some(f)) => (unit, parse_flag(f)),
            (Some(u), None) => match parse_flag(u) {
                Some(f) => (None, Some(f)),
                None => (Some(u), None),
            },
            (None, None) => (None, None),
        };

        let inline_range = match (caps.get(5), caps.get(6)) {
            (Some(lo), Some(hi)) => {
                Some((lo.as_str().parse::<f64>().ok()?, hi.as_str().parse::<f64>().ok()?))
            }
            _ => None,
        };

        let table = self.ranges.get(test_name);

        let unit = inline_unit
            .map(str::to_string)
            .or_else(|| table.map(|r| r.unit.clone()))
            .unwrap_or_default();
        let (low, high) = match inline_range {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => match table {
                Some(r) => (Some(r.low), Some(r.high)),
                None => (None, None),
            },
        };

        Some(ExtractedRow {
            test_name: test_name.to_string(),
            value,
            unit,
            low,
            high,
            status: resolve_status(flag, value, low, high),
        })
    }
}

impl Default for LabExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit flag first; numeric inference only when no flag was present
/// and both bounds are known.
fn resolve_status(
    flag: Option<FlagToken>,
    value: f64,
    low: Option<f64>,
    high: Option<f64>,
) -> LabStatus {
    match flag {
        Some(FlagToken::High) => LabStatus::High,
        Some(FlagToken::Low) => LabStatus::Low,
        Some(FlagToken::Normal) | Some(FlagToken::Abnormal) => LabStatus::Normal,
        None => match (low, high) {
            (Some(_), Some(hi)) if value > hi => LabStatus::High,
            (Some(lo), Some(_)) if value < lo => LabStatus::Low,
            _ => LabStatus::Normal,
        },
    }
}

static DEFAULT_EXTRACTOR: OnceLock<LabExtractor> = OnceLock::new();

/// Extract with the built-in reference table. The extractor is compiled
/// once per process and shared; it holds no per-call state.
pub fn extract_lab_values(text: &str) -> Vec<ExtractedRow> {
    DEFAULT_EXTRACTOR
        .get_or_init(LabExtractor::new)
        .extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labs::reference::ReferenceRange;

    fn extract(text: &str) -> Vec<ExtractedRow> {
        LabExtractor::new().extract(text)
    }

    // ── Totality ──

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn unparseable_document_yields_no_rows() {
        // No letter-initial name followed by a value anywhere.
        assert!(extract("=====\n-----\n****\nlorem ipsum dolor\n").is_empty());
    }

    #[test]
    fn output_never_longer_than_input_lines() {
        let text = "Hemoglobin 10.5\nnoise line here\nGlucose 90\n\n2\n";
        let rows = extract(text);
        assert!(rows.len() <= text.lines().count());
    }

    // ── Single-line parses ──

    #[test]
    fn hemoglobin_with_unit_resolves_table_bounds() {
        let rows = extract("Hemoglobin : 10.5 g/dL");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.test_name, "Hemoglobin");
        assert_eq!(row.value, 10.5);
        assert_eq!(row.unit, "g/dL");
        assert_eq!(row.low, Some(12.0));
        assert_eq!(row.high, Some(17.5));
        assert_eq!(row.status, LabStatus::Low);
    }

    #[test]
    fn wbc_explicit_high_flag() {
        let rows = extract("WBC 12000 H");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.status, LabStatus::High);
        // Unit comes from the table since "H" was consumed as the flag.
        assert_eq!(row.unit, "/µL");
        assert_eq!(row.high, Some(11000.0));
    }

    #[test]
    fn explicit_flag_beats_in_range_value() {
        // 90 is inside [70, 100]; the H flag must still win.
        let rows = extract("Glucose 90 H");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, LabStatus::High);
    }

    #[test]
    fn explicit_low_flag_beats_in_range_value() {
        let rows = extract("Potassium 4.0 L");
        assert_eq!(rows[0].status, LabStatus::Low);
    }

    #[test]
    fn inline_range_wins_over_table() {
        let rows = extract("Creatinine: 0.9 mg/dL (0.6-1.2)");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.unit, "mg/dL");
        assert_eq!(row.low, Some(0.6));
        assert_eq!(row.high, Some(1.2));
        assert_eq!(row.status, LabStatus::Normal);
    }

    #[test]
    fn inline_range_drives_status_inference() {
        // Table says [70, 100] but the printed range is wider.
        let rows = extract("Glucose 104 mg/dL (70-110)");
        assert_eq!(rows[0].status, LabStatus::Normal);
        assert_eq!(rows[0].high, Some(110.0));
    }

    #[test]
    fn page_number_line_produces_no_row() {
        assert!(extract("2").is_empty());
    }

    #[test]
    fn short_line_discarded_before_matching() {
        assert!(extract("ALT").is_empty());
    }

    // ── Flag vocabulary ──

    #[test]
    fn parenthesized_flags_recognized() {
        let rows = extract("Sodium 149 mEq/L (H)");
        assert_eq!(rows[0].status, LabStatus::High);
        let rows = extract("Sodium 130 mEq/L (L)");
        assert_eq!(rows[0].status, LabStatus::Low);
    }

    #[test]
    fn word_flags_recognized_case_insensitively() {
        let rows = extract("AST 95 U/L high");
        assert_eq!(rows[0].status, LabStatus::High);
        let rows = extract("TSH 0.1 mIU/L Low");
        assert_eq!(rows[0].status, LabStatus::Low);
    }

    #[test]
    fn explicit_normal_flag_suppresses_inference() {
        // 150 exceeds the table high of 100, but the lab said NORMAL.
        let rows = extract("Glucose 150 mg/dL NORMAL");
        assert_eq!(rows[0].status, LabStatus::Normal);
    }

    #[test]
    fn abnormal_flag_maps_to_normal_status() {
        // ABNORMAL carries no direction; it never becomes HIGH or LOW.
        let rows = extract("Bilirubin 3.0 mg/dL ABNORMAL");
        assert_eq!(rows[0].status, LabStatus::Normal);
    }

    #[test]
    fn non_vocabulary_token_is_a_unit_not_a_flag() {
        let rows = extract("Ferritin 310 ng/mL");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "ng/mL");
        // Unknown test, no inline range: bounds unresolved, status NORMAL.
        assert_eq!(rows[0].low, None);
        assert_eq!(rows[0].high, None);
        assert_eq!(rows[0].status, LabStatus::Normal);
    }

    // ── Bound inference ──

    #[test]
    fn value_above_table_high_is_high() {
        let rows = extract("Glucose: 126 mg/dL");
        assert_eq!(rows[0].status, LabStatus::High);
    }

    #[test]
    fn value_inside_table_range_is_normal() {
        let rows = extract("Potassium: 4.2 mEq/L");
        assert_eq!(rows[0].status, LabStatus::Normal);
    }

    #[test]
    fn missing_bounds_default_to_normal() {
        let rows = extract("Lipase 210 U/L");
        assert_eq!(rows[0].status, LabStatus::Normal);
        assert_eq!(rows[0].range_display(), "— – —");
    }

    // ── Range syntax variants ──

    #[test]
    fn bracketed_range_accepted() {
        let rows = extract("Creatinine 0.9 mg/dL [0.6-1.2]");
        assert_eq!(rows[0].low, Some(0.6));
        assert_eq!(rows[0].high, Some(1.2));
    }

    #[test]
    fn en_dash_range_accepted() {
        let rows = extract("Creatinine 1.4 mg/dL (0.6–1.2)");
        assert_eq!(rows[0].high, Some(1.2));
        assert_eq!(rows[0].status, LabStatus::High);
    }

    // ── Ordering and independence ──

    #[test]
    fn rows_preserve_input_order_across_skipped_lines() {
        let text = "\
CBC REPORT
Hemoglobin : 10.5 g/dL
--
Glucose 90 mg/dL
2
Creatinine: 0.9 mg/dL (0.6-1.2)";
        let rows = extract(text);
        let names: Vec<&str> = rows.iter().map(|r| r.test_name.as_str()).collect();
        // Header parses no value line; "--" and "2" are discarded.
        assert!(names.contains(&"Hemoglobin"));
        assert!(names.contains(&"Glucose"));
        assert!(names.contains(&"Creatinine"));
        let hgb = names.iter().position(|n| *n == "Hemoglobin").unwrap();
        let glu = names.iter().position(|n| *n == "Glucose").unwrap();
        let cre = names.iter().position(|n| *n == "Creatinine").unwrap();
        assert!(hgb < glu && glu < cre);
    }

    #[test]
    fn duplicate_tests_produce_independent_rows() {
        let rows = extract("Glucose 90 mg/dL\nGlucose 126 mg/dL");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, LabStatus::Normal);
        assert_eq!(rows[1].status, LabStatus::High);
    }

    // ── Name handling ──

    #[test]
    fn multi_word_name_hits_table_alias() {
        let rows = extract("WBC Count : 8000");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test_name, "WBC Count");
        assert_eq!(rows[0].low, Some(4000.0));
    }

    #[test]
    fn digit_bearing_name_stays_whole() {
        let rows = extract("HbA1c: 5.9 %");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test_name, "HbA1c");
        assert_eq!(rows[0].value, 5.9);
        assert_eq!(rows[0].unit, "%");
        assert_eq!(rows[0].status, LabStatus::High);
    }

    #[test]
    fn value_with_trailing_period_parses() {
        let rows = extract("Sodium: 140. mEq/L");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 140.0);
    }

    #[test]
    fn garbled_value_skips_line() {
        assert!(extract("Sodium: 1.4.0 mEq/L").is_empty());
    }

    // ── Custom tables and the shared extractor ──

    #[test]
    fn custom_table_is_consulted() {
        let extractor = LabExtractor::with_ranges(ReferenceRanges::from_entries([(
            "ferritin".to_string(),
            ReferenceRange {
                unit: "ng/mL".into(),
                low: 24.0,
                high: 336.0,
            },
        )]));
        let rows = extractor.extract("Ferritin 400");
        assert_eq!(rows[0].unit, "ng/mL");
        assert_eq!(rows[0].status, LabStatus::High);
    }

    #[test]
    fn shared_extractor_matches_fresh_instance() {
        let text = "Hemoglobin : 10.5 g/dL";
        assert_eq!(extract_lab_values(text), extract(text));
    }
}
