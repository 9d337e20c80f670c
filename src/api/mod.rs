//! Typed client for the backend REST API.
//!
//! One method per endpoint, grouped by backend controller (auth, chat,
//! reports, patient, doctor, admin). Every request picks up the bearer
//! token from the shared [`SessionStore`](crate::session::SessionStore);
//! a 401 clears that session so the caller's next guard check redirects
//! to login. Failures surface once as [`ApiError`], with no retries.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod client;
pub mod doctor;
pub mod error;
pub mod patient;
pub mod reports;

pub use client::{ApiClient, ApiEnvelope};
pub use error::ApiError;
