//! View-state for the dashboards.
//!
//! Every panel holds its data in a [`Remote`] slot (not-asked, loading,
//! failed, or ready); a `refresh_*` method drives the API client through
//! the transition. Failures land once in the slot as a display string
//! and are otherwise dropped (no retries).

pub mod admin;
pub mod chat;
pub mod doctor;
pub mod patient;
pub mod remote;

pub use admin::AdminDashboard;
pub use chat::{ChatView, NearbyCareQuery, TranscriptEntry};
pub use doctor::DoctorDashboard;
pub use patient::{report_findings, PatientDashboard, ReportFindings};
pub use remote::Remote;
