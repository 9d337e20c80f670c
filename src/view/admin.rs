//! Admin dashboard: system totals, user management, chat monitor,
//! appointment oversight.

use std::sync::Arc;

use tracing::debug;

use super::remote::Remote;
use crate::api::admin::CreateDoctorRequest;
use crate::api::ApiClient;
use crate::models::chat::{ChatMessage, ChatSession};
use crate::models::enums::AppointmentStatus;
use crate::models::{AdminDashboardStats, Appointment, User};

pub struct AdminDashboard {
    client: Arc<ApiClient>,
    pub overview: Remote<AdminDashboardStats>,
    pub users: Remote<Vec<User>>,
    pub sessions: Remote<Vec<ChatSession>>,
    pub appointments: Remote<Vec<Appointment>>,
    /// Transcript of the session selected in the chat monitor.
    pub monitor: Remote<Vec<ChatMessage>>,
}

impl AdminDashboard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            overview: Remote::NotAsked,
            users: Remote::NotAsked,
            sessions: Remote::NotAsked,
            appointments: Remote::NotAsked,
            monitor: Remote::NotAsked,
        }
    }

    pub async fn refresh_overview(&mut self) {
        self.overview.begin();
        self.overview.resolve(self.client.admin_dashboard().await);
    }

    pub async fn refresh_users(&mut self) {
        self.users.begin();
        self.users.resolve(self.client.all_users().await);
    }

    pub async fn refresh_sessions(&mut self) {
        self.sessions.begin();
        self.sessions.resolve(self.client.all_chat_sessions().await);
    }

    pub async fn refresh_appointments(&mut self) {
        self.appointments.begin();
        self.appointments.resolve(self.client.all_appointments().await);
    }

    pub async fn refresh_all(&mut self) {
        debug!("refreshing admin dashboard");
        self.refresh_overview().await;
        self.refresh_users().await;
        self.refresh_sessions().await;
        self.refresh_appointments().await;
    }

    /// Activate/deactivate an account and patch the row in place so the
    /// table doesn't flicker through a full reload.
    pub async fn toggle_user(&mut self, user_id: i64) -> Result<(), String> {
        let updated = self
            .client
            .toggle_user_status(user_id)
            .await
            .map_err(|e| e.display_message())?;
        if let Remote::Ready(users) = &mut self.users {
            if let Some(row) = users.iter_mut().find(|u| u.id == updated.id) {
                *row = updated;
            }
        }
        Ok(())
    }

    pub async fn delete_user(&mut self, user_id: i64) -> Result<(), String> {
        self.client
            .delete_user(user_id)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_users().await;
        Ok(())
    }

    pub async fn create_doctor(&mut self, request: &CreateDoctorRequest) -> Result<User, String> {
        let doctor = self
            .client
            .create_doctor(request)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_users().await;
        Ok(doctor)
    }

    /// Load one session's transcript into the chat monitor.
    pub async fn open_session(&mut self, session_id: i64) {
        self.monitor.begin();
        self.monitor
            .resolve(self.client.admin_session_messages(session_id).await);
    }

    pub async fn flag_session(&mut self, session_id: i64) -> Result<(), String> {
        self.client
            .flag_session(session_id)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_sessions().await;
        Ok(())
    }

    pub async fn set_appointment_status(
        &mut self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), String> {
        self.client
            .update_appointment_status(appointment_id, status)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_appointments().await;
        Ok(())
    }
}
