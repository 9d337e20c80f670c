use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub patient: Option<User>,
    #[serde(default)]
    pub doctor: Option<User>,
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub soap_note: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// Pending and confirmed appointments still occupy a calendar slot.
    pub fn is_upcoming(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        )
    }
}
