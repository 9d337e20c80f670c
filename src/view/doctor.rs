//! Doctor dashboard: caseload stats, appointment queue, patient list
//! with a drill-in workspace.

use std::sync::Arc;

use tracing::debug;

use super::remote::Remote;
use crate::api::doctor::{AppointmentUpdate, PatientDetails, PatientSummary, SoapNoteRequest};
use crate::api::ApiClient;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, DoctorStats, MedicalReport};

/// Drill-in view for one patient.
pub struct PatientWorkspace {
    pub patient_id: i64,
    pub details: Remote<PatientDetails>,
    pub reports: Remote<Vec<MedicalReport>>,
}

pub struct DoctorDashboard {
    client: Arc<ApiClient>,
    pub stats: Remote<DoctorStats>,
    pub appointments: Remote<Vec<Appointment>>,
    pub patients: Remote<Vec<PatientSummary>>,
    pub workspace: Option<PatientWorkspace>,
}

impl DoctorDashboard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            stats: Remote::NotAsked,
            appointments: Remote::NotAsked,
            patients: Remote::NotAsked,
            workspace: None,
        }
    }

    pub async fn refresh_stats(&mut self) {
        self.stats.begin();
        self.stats.resolve(self.client.doctor_stats().await);
    }

    pub async fn refresh_appointments(&mut self) {
        self.appointments.begin();
        self.appointments
            .resolve(self.client.doctor_appointments().await);
    }

    pub async fn refresh_patients(&mut self) {
        self.patients.begin();
        self.patients.resolve(self.client.doctor_patients().await);
    }

    pub async fn refresh_all(&mut self) {
        debug!("refreshing doctor dashboard");
        self.refresh_stats().await;
        self.refresh_appointments().await;
        self.refresh_patients().await;
    }

    /// Open one patient's record: details and reports load independently
    /// so a slow report list doesn't blank the profile panel.
    pub async fn open_patient(&mut self, patient_id: i64) {
        let mut workspace = PatientWorkspace {
            patient_id,
            details: Remote::Loading,
            reports: Remote::Loading,
        };
        workspace
            .details
            .resolve(self.client.patient_details(patient_id).await);
        workspace
            .reports
            .resolve(self.client.patient_reports(patient_id).await);
        self.workspace = Some(workspace);
    }

    pub fn close_patient(&mut self) {
        self.workspace = None;
    }

    /// Move an appointment through its lifecycle, then refresh the queue
    /// and the stat cards that count it.
    pub async fn set_appointment_status(
        &mut self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), String> {
        let update = AppointmentUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.client
            .update_appointment(appointment_id, &update)
            .await
            .map_err(|e| e.display_message())?;
        self.refresh_appointments().await;
        self.refresh_stats().await;
        Ok(())
    }

    /// Attach consultation notes and an optional SOAP note.
    pub async fn save_notes(
        &mut self,
        appointment_id: i64,
        notes: Option<String>,
        soap_note: Option<String>,
    ) -> Result<Appointment, String> {
        let update = AppointmentUpdate {
            status: None,
            notes,
            soap_note,
        };
        self.client
            .update_appointment(appointment_id, &update)
            .await
            .map_err(|e| e.display_message())
    }

    /// Draft a SOAP note for the open patient.
    pub async fn draft_soap_note(
        &self,
        patient_history: &str,
        symptoms: &str,
    ) -> Result<String, String> {
        self.client
            .generate_soap_note(&SoapNoteRequest {
                patient_history: patient_history.into(),
                symptoms: symptoms.into(),
            })
            .await
            .map_err(|e| e.display_message())
    }
}
