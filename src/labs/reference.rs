use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Clinically normal bounds for one test, with its conventional unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub unit: String,
    pub low: f64,
    pub high: f64,
}

/// Built-in ranges for common panels. Aliases share an entry (hemoglobin /
/// hgb / hb). Extending coverage is a data-only change here.
const BUILTIN: &[(&[&str], &str, f64, f64)] = &[
    (&["hemoglobin", "hgb", "hb"], "g/dL", 12.0, 17.5),
    (&["wbc", "wbc count"], "/µL", 4000.0, 11000.0),
    (&["platelets"], "/µL", 150_000.0, 400_000.0),
    (&["glucose", "blood glucose", "fasting glucose"], "mg/dL", 70.0, 100.0),
    (&["creatinine"], "mg/dL", 0.6, 1.2),
    (&["cholesterol", "total cholesterol"], "mg/dL", 0.0, 200.0),
    (&["sodium"], "mEq/L", 136.0, 145.0),
    (&["potassium"], "mEq/L", 3.5, 5.0),
    (&["bilirubin", "total bilirubin"], "mg/dL", 0.2, 1.2),
    (&["alt"], "U/L", 7.0, 56.0),
    (&["ast"], "U/L", 10.0, 40.0),
    (&["tsh"], "mIU/L", 0.4, 4.0),
    (&["urea", "blood urea"], "mg/dL", 15.0, 45.0),
    (&["hba1c"], "%", 4.0, 5.6),
];

/// Immutable reference-range table keyed by normalized test name.
/// Built once and shared; never mutated after construction.
#[derive(Debug, Clone)]
pub struct ReferenceRanges {
    entries: HashMap<String, ReferenceRange>,
}

impl ReferenceRanges {
    /// The built-in table of common lab tests.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        for (names, unit, low, high) in BUILTIN {
            for name in *names {
                entries.insert(
                    (*name).to_string(),
                    ReferenceRange {
                        unit: (*unit).to_string(),
                        low: *low,
                        high: *high,
                    },
                );
            }
        }
        Self { entries }
    }

    /// Build from explicit entries (keys are normalized on insert).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ReferenceRange)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize_test_name(&k), v))
                .collect(),
        }
    }

    /// Look up a test by display name. Matching is case-insensitive and
    /// whitespace-normalized ("WBC  Count" finds "wbc count").
    pub fn get(&self, test_name: &str) -> Option<&ReferenceRange> {
        self.entries.get(&normalize_test_name(test_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase and collapse runs of whitespace to single spaces.
pub fn normalize_test_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
