use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// Patient overview card numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total_consultations: u64,
    pub total_reports: u64,
    pub upcoming_appointments: u64,
    pub total_appointments: u64,
    pub emergency_alerts: u64,
    pub risk_level: RiskLevel,
}

/// Doctor overview card numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    pub total_appointments: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub total_patients: u64,
}

/// Admin dashboard totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_users: u64,
    pub total_patients: u64,
    pub total_doctors: u64,
    pub total_chat_sessions: u64,
    pub total_messages: u64,
    pub emergency_sessions: u64,
    pub total_appointments: u64,
    pub pending_appointments: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_stats_wire_shape() {
        let json = r#"{
            "totalConsultations": 6,
            "totalReports": 2,
            "upcomingAppointments": 1,
            "totalAppointments": 4,
            "emergencyAlerts": 0,
            "riskLevel": "MEDIUM"
        }"#;
        let stats: PatientStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.risk_level, RiskLevel::Medium);
        assert_eq!(stats.total_consultations, 6);
    }
}
