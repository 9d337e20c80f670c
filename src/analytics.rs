//! Pure aggregation feeding the dashboard charts.
//!
//! Everything here is a deterministic fold over already-fetched slices;
//! no I/O, no shared state. The chart components consume these shapes
//! directly.

use chrono::Datelike;

use crate::models::chat::ChatSession;
use crate::models::enums::{AppointmentStatus, RiskLevel};
use crate::models::{Appointment, MedicalReport};

/// One wedge of the appointment status donut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlice {
    pub status: AppointmentStatus,
    pub count: usize,
}

/// One bar of the uploads-per-month chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl MonthBucket {
    /// Axis label, e.g. "2026-03".
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Sessions considered "many" enough to raise the derived risk level.
const MEDIUM_RISK_SESSION_COUNT: usize = 5;

/// Count appointments per status. Every status appears, including zeros,
/// so the legend never shifts between refreshes.
pub fn appointment_status_counts(appointments: &[Appointment]) -> Vec<StatusSlice> {
    const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];
    ALL.iter()
        .map(|&status| StatusSlice {
            status,
            count: appointments.iter().filter(|a| a.status == status).count(),
        })
        .collect()
}

/// Appointments still occupying a calendar slot (pending or confirmed).
pub fn upcoming_count(appointments: &[Appointment]) -> usize {
    appointments.iter().filter(|a| a.is_upcoming()).count()
}

/// Bucket report uploads by calendar month, oldest first. Months with no
/// uploads between observed ones are not filled in; the chart renders
/// what happened, not a continuous axis.
pub fn monthly_report_counts(reports: &[MedicalReport]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    for report in reports {
        let (year, month) = (report.uploaded_at.year(), report.uploaded_at.month());
        match buckets.iter_mut().find(|b| b.year == year && b.month == month) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(MonthBucket {
                year,
                month,
                count: 1,
            }),
        }
    }
    buckets.sort_by_key(|b| (b.year, b.month));
    buckets
}

/// Derived patient risk, mirroring the backend's stats rule: any emergency
/// session is HIGH, a heavy consultation history is MEDIUM, else LOW.
pub fn derive_risk_level(sessions: &[ChatSession]) -> RiskLevel {
    if sessions.iter().any(|s| s.is_emergency) {
        RiskLevel::High
    } else if sessions.len() > MEDIUM_RISK_SESSION_COUNT {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
