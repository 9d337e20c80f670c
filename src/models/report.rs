use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An uploaded medical report. `extracted_text` holds the backend OCR
/// output that the lab value extractor parses; `ai_explanation` is the
/// model-generated plain-language summary shown alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub ai_explanation: Option<String>,
    #[serde(default)]
    pub report_date: Option<NaiveDateTime>,
    pub uploaded_at: NaiveDateTime,
}

impl MedicalReport {
    /// OCR text, empty string when the backend extracted nothing.
    pub fn extracted_text(&self) -> &str {
        self.extracted_text.as_deref().unwrap_or("")
    }
}
