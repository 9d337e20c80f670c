use serde::{Deserialize, Serialize};

use crate::models::enums::LabStatus;

/// One parsed line of report text: a test result with its resolved unit,
/// reference bounds, and abnormality status. Bounds stay `None` when neither
/// the line nor the reference table provides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRow {
    pub test_name: String,
    pub value: f64,
    pub unit: String,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub status: LabStatus,
}

impl ExtractedRow {
    /// "12 – 17.5" for known bounds, "—" for an unknown bound.
    pub fn range_display(&self) -> String {
        format!("{} – {}", display_bound(self.low), display_bound(self.high))
    }

    /// Value with unit, e.g. "10.5 g/dL"; bare number when the unit is unknown.
    pub fn value_display(&self) -> String {
        if self.unit.is_empty() {
            display_number(self.value)
        } else {
            format!("{} {}", display_number(self.value), self.unit)
        }
    }
}

fn display_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) => display_number(v),
        None => "—".to_string(),
    }
}

/// Whole numbers render without a trailing ".0" (matches how ranges are
/// printed on paper reports: "70 – 100", not "70.0 – 100.0").
fn display_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
