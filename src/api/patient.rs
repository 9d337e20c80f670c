//! `/patient` endpoints: profile, stats, appointments, doctor directory,
//! emergency alert.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::{Appointment, Doctor, HealthProfile, PatientStats};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    pub appointment_date: NaiveDateTime,
    pub reason: String,
}

impl ApiClient {
    pub async fn patient_profile(&self) -> Result<HealthProfile, ApiError> {
        let env: ApiEnvelope<HealthProfile> = self.get("/patient/profile").await?;
        env.into_data()
    }

    pub async fn update_patient_profile(
        &self,
        profile: &HealthProfile,
    ) -> Result<HealthProfile, ApiError> {
        let env: ApiEnvelope<HealthProfile> = self.put("/patient/profile", profile).await?;
        env.into_data()
    }

    pub async fn patient_stats(&self) -> Result<PatientStats, ApiError> {
        let env: ApiEnvelope<PatientStats> = self.get("/patient/stats").await?;
        env.into_data()
    }

    pub async fn patient_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let env: ApiEnvelope<Vec<Appointment>> = self.get("/patient/appointments").await?;
        env.into_data()
    }

    pub async fn book_appointment(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        let env: ApiEnvelope<Appointment> = self.post("/patient/appointments", request).await?;
        env.into_data()
    }

    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self
            .delete(&format!("/patient/appointments/{appointment_id}"))
            .await?;
        env.into_ack()
    }

    /// Doctors available for booking and for the "nearby care" picker.
    pub async fn available_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        let env: ApiEnvelope<Vec<Doctor>> = self.get("/patient/doctors").await?;
        env.into_data()
    }

    /// One-tap emergency alert; the backend fans out the notifications.
    pub async fn send_emergency_alert(&self) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self.post_empty("/patient/emergency").await?;
        env.into_ack()
    }
}
