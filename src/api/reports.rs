//! `/reports` endpoints: upload, list, fetch, delete.

use reqwest::multipart::{Form, Part};

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::MedicalReport;

impl ApiClient {
    /// Upload a report file for OCR. The backend accepts PDF, PNG and JPG;
    /// anything else comes back as a rejected envelope.
    pub async fn upload_report(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MedicalReport, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);
        let env: ApiEnvelope<MedicalReport> = self.post_multipart("/reports/upload", form).await?;
        env.into_data()
    }

    pub async fn reports(&self) -> Result<Vec<MedicalReport>, ApiError> {
        let env: ApiEnvelope<Vec<MedicalReport>> = self.get("/reports").await?;
        env.into_data()
    }

    pub async fn report(&self, report_id: i64) -> Result<MedicalReport, ApiError> {
        let env: ApiEnvelope<MedicalReport> = self.get(&format!("/reports/{report_id}")).await?;
        env.into_data()
    }

    pub async fn delete_report(&self, report_id: i64) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> =
            self.delete(&format!("/reports/{report_id}")).await?;
        env.into_ack()
    }
}
