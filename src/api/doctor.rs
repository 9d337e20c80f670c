//! `/doctor` endpoints: caseload stats, appointment management, patient
//! lookups, SOAP note generation.

use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, DoctorStats, HealthProfile, MedicalReport, User};

/// Row in the doctor's patient list: the backend deduplicates patients
/// across appointments and counts them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub appointment_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    pub patient: User,
    #[serde(default)]
    pub health_profile: Option<HealthProfile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapNoteRequest {
    pub patient_history: String,
    pub symptoms: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SoapNoteResponse {
    soap_note: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soap_note: Option<String>,
}

impl ApiClient {
    pub async fn doctor_stats(&self) -> Result<DoctorStats, ApiError> {
        let env: ApiEnvelope<DoctorStats> = self.get("/doctor/stats").await?;
        env.into_data()
    }

    pub async fn doctor_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let env: ApiEnvelope<Vec<Appointment>> = self.get("/doctor/appointments").await?;
        env.into_data()
    }

    pub async fn doctor_patients(&self) -> Result<Vec<PatientSummary>, ApiError> {
        let env: ApiEnvelope<Vec<PatientSummary>> = self.get("/doctor/patients").await?;
        env.into_data()
    }

    pub async fn patient_details(&self, patient_id: i64) -> Result<PatientDetails, ApiError> {
        let env: ApiEnvelope<PatientDetails> =
            self.get(&format!("/doctor/patients/{patient_id}")).await?;
        env.into_data()
    }

    pub async fn patient_reports(&self, patient_id: i64) -> Result<Vec<MedicalReport>, ApiError> {
        let env: ApiEnvelope<Vec<MedicalReport>> = self
            .get(&format!("/doctor/patients/{patient_id}/reports"))
            .await?;
        env.into_data()
    }

    /// Draft a SOAP note from history plus presenting symptoms.
    pub async fn generate_soap_note(&self, request: &SoapNoteRequest) -> Result<String, ApiError> {
        let env: ApiEnvelope<SoapNoteResponse> = self.post("/doctor/soap-note", request).await?;
        Ok(env.into_data()?.soap_note)
    }

    /// Confirm, complete, annotate or attach a SOAP note to an appointment.
    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        update: &AppointmentUpdate,
    ) -> Result<Appointment, ApiError> {
        let env: ApiEnvelope<Appointment> = self
            .put(&format!("/doctor/appointments/{appointment_id}"), update)
            .await?;
        env.into_data()
    }
}
