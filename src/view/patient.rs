//! Patient dashboard: overview cards, report list with the findings
//! viewer, appointments, doctor directory.

use std::sync::Arc;

use tracing::debug;

use super::remote::Remote;
use crate::api::patient::BookAppointmentRequest;
use crate::api::ApiClient;
use crate::labs::{ExtractedRow, LabExtractor};
use crate::models::{Appointment, Doctor, MedicalReport, PatientStats};

/// What the report viewer shows for one report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportFindings {
    /// Structured rows for the findings table.
    Table(Vec<ExtractedRow>),
    /// Extraction found nothing structured; show the raw OCR text.
    RawText(String),
    /// The backend extracted no text at all.
    Empty,
}

/// Resolve a report for display. The fallback ladder lives here, not in
/// the extractor: rows if any line parsed, else raw text, else "no data".
pub fn report_findings(report: &MedicalReport, extractor: &LabExtractor) -> ReportFindings {
    let text = report.extracted_text();
    if text.trim().is_empty() {
        return ReportFindings::Empty;
    }
    let rows = extractor.extract(text);
    if rows.is_empty() {
        ReportFindings::RawText(text.to_string())
    } else {
        ReportFindings::Table(rows)
    }
}

pub struct PatientDashboard {
    client: Arc<ApiClient>,
    extractor: LabExtractor,
    pub stats: Remote<PatientStats>,
    pub reports: Remote<Vec<MedicalReport>>,
    pub appointments: Remote<Vec<Appointment>>,
    pub doctors: Remote<Vec<Doctor>>,
}

impl PatientDashboard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            extractor: LabExtractor::new(),
            stats: Remote::NotAsked,
            reports: Remote::NotAsked,
            appointments: Remote::NotAsked,
            doctors: Remote::NotAsked,
        }
    }

    pub async fn refresh_stats(&mut self) {
        self.stats.begin();
        self.stats.resolve(self.client.patient_stats().await);
    }

    pub async fn refresh_reports(&mut self) {
        self.reports.begin();
        self.reports.resolve(self.client.reports().await);
    }

    pub async fn refresh_appointments(&mut self) {
        self.appointments.begin();
        self.appointments
            .resolve(self.client.patient_appointments().await);
    }

    pub async fn refresh_doctors(&mut self) {
        self.doctors.begin();
        self.doctors.resolve(self.client.available_doctors().await);
    }

    pub async fn refresh_all(&mut self) {
        debug!("refreshing patient dashboard");
        self.refresh_stats().await;
        self.refresh_reports().await;
        self.refresh_appointments().await;
        self.refresh_doctors().await;
    }

    /// Upload a report, then refresh the list so the new row appears.
    pub async fn upload_report(
        &mut self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MedicalReport, String> {
        let report = self
            .client
            .upload_report(file_name, content_type, bytes)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_reports().await;
        Ok(report)
    }

    pub async fn delete_report(&mut self, report_id: i64) -> Result<(), String> {
        self.client
            .delete_report(report_id)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_reports().await;
        Ok(())
    }

    pub async fn book_appointment(
        &mut self,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, String> {
        let appointment = self
            .client
            .book_appointment(request)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_appointments().await;
        Ok(appointment)
    }

    pub async fn cancel_appointment(&mut self, appointment_id: i64) -> Result<(), String> {
        self.client
            .cancel_appointment(appointment_id)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_appointments().await;
        Ok(())
    }

    /// Findings for the report viewer modal.
    pub fn findings_for(&self, report: &MedicalReport) -> ReportFindings {
        report_findings(report, &self.extractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(extracted_text: Option<&str>) -> MedicalReport {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "fileName": "cbc.pdf",
            "extractedText": extracted_text,
            "uploadedAt": "2026-03-14T09:30:00",
        }))
        .unwrap()
    }

    #[test]
    fn findings_table_when_lines_parse() {
        let extractor = LabExtractor::new();
        let r = report(Some("Hemoglobin : 10.5 g/dL\nGlucose 90 mg/dL"));
        match report_findings(&r, &extractor) {
            ReportFindings::Table(rows) => assert_eq!(rows.len(), 2),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn findings_fall_back_to_raw_text() {
        let extractor = LabExtractor::new();
        let r = report(Some("Narrative impression only, no tabulated values."));
        match report_findings(&r, &extractor) {
            ReportFindings::RawText(text) => assert!(text.contains("Narrative")),
            other => panic!("expected raw text, got {other:?}"),
        }
    }

    #[test]
    fn findings_empty_when_no_text() {
        let extractor = LabExtractor::new();
        assert_eq!(report_findings(&report(None), &extractor), ReportFindings::Empty);
        assert_eq!(
            report_findings(&report(Some("   \n  ")), &extractor),
            ReportFindings::Empty
        );
    }
}
