//! `/admin` endpoints: dashboard totals, user management, chat moderation,
//! appointment oversight.

use serde::Serialize;

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::chat::{ChatMessage, ChatSession};
use crate::models::enums::AppointmentStatus;
use crate::models::{AdminDashboardStats, Appointment, User};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct StatusBody {
    status: AppointmentStatus,
}

impl ApiClient {
    pub async fn admin_dashboard(&self) -> Result<AdminDashboardStats, ApiError> {
        let env: ApiEnvelope<AdminDashboardStats> = self.get("/admin/dashboard").await?;
        env.into_data()
    }

    pub async fn all_users(&self) -> Result<Vec<User>, ApiError> {
        let env: ApiEnvelope<Vec<User>> = self.get("/admin/users").await?;
        env.into_data()
    }

    /// Flip a user between active and deactivated; returns the saved user.
    pub async fn toggle_user_status(&self, user_id: i64) -> Result<User, ApiError> {
        let env: ApiEnvelope<User> = self
            .put_empty(&format!("/admin/users/{user_id}/toggle-status"))
            .await?;
        env.into_data()
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> =
            self.delete(&format!("/admin/users/{user_id}")).await?;
        env.into_ack()
    }

    pub async fn create_doctor(&self, request: &CreateDoctorRequest) -> Result<User, ApiError> {
        let env: ApiEnvelope<User> = self.post("/admin/users/create-doctor", request).await?;
        env.into_data()
    }

    pub async fn all_chat_sessions(&self) -> Result<Vec<ChatSession>, ApiError> {
        let env: ApiEnvelope<Vec<ChatSession>> = self.get("/admin/sessions").await?;
        env.into_data()
    }

    pub async fn admin_session_messages(
        &self,
        session_id: i64,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let env: ApiEnvelope<Vec<ChatMessage>> = self
            .get(&format!("/admin/sessions/{session_id}/messages"))
            .await?;
        env.into_data()
    }

    /// Mark a session for review (e.g. missed emergency detection).
    pub async fn flag_session(&self, session_id: i64) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self
            .put_empty(&format!("/admin/sessions/{session_id}/flag"))
            .await?;
        env.into_ack()
    }

    pub async fn all_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let env: ApiEnvelope<Vec<Appointment>> = self.get("/admin/appointments").await?;
        env.into_data()
    }

    pub async fn update_appointment_status(
        &self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self
            .put(
                &format!("/admin/appointments/{appointment_id}/status"),
                &StatusBody { status },
            )
            .await?;
        env.into_ack()
    }
}
