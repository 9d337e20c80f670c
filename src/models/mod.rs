pub mod appointment;
pub mod chat;
pub mod doctor;
pub mod enums;
pub mod profile;
pub mod report;
pub mod stats;
pub mod user;

pub use appointment::Appointment;
pub use chat::{ChatMessage, ChatSession, StructuredTriage};
pub use doctor::Doctor;
pub use enums::{AppointmentStatus, InvalidEnum, LabStatus, MessageRole, RiskLevel, Role};
pub use profile::HealthProfile;
pub use report::MedicalReport;
pub use stats::{AdminDashboardStats, DoctorStats, PatientStats};
pub use user::User;
