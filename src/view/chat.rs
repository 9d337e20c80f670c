//! Chat view-state: transcript, session list, the send flow, and the
//! geolocation-driven "nearby care" query.
//!
//! The user's message is appended optimistically; a failed send keeps it
//! in the transcript and surfaces the error once in `last_error`.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::remote::Remote;
use crate::api::chat::{ChatRequest, LocationChatRequest, LocationChatResponse};
use crate::api::ApiClient;
use crate::models::chat::{ChatSession, StructuredTriage};
use crate::models::enums::MessageRole;

/// One rendered transcript line. `id` is a client-side key so renderers
/// can track entries that have no server id yet (optimistic sends).
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub triage: Option<StructuredTriage>,
    pub emergency: bool,
}

impl TranscriptEntry {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            triage: None,
            emergency: false,
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// A "nearby care" query, validated before it leaves the device.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCareQuery {
    message: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("message is empty")]
    EmptyMessage,
}

impl NearbyCareQuery {
    /// Coordinates arrive unchecked from the browser geolocation API and
    /// must be finite and in range before the request is built.
    pub fn new(message: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(QueryError::EmptyMessage);
        }
        if !(-90.0..=90.0).contains(&latitude) || !latitude.is_finite() {
            return Err(QueryError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
            return Err(QueryError::Longitude(longitude));
        }
        Ok(Self {
            message,
            latitude,
            longitude,
        })
    }

    fn into_request(self) -> LocationChatRequest {
        LocationChatRequest {
            message: self.message,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub struct ChatView {
    client: Arc<ApiClient>,
    pub sessions: Remote<Vec<ChatSession>>,
    pub active_session: Option<i64>,
    pub transcript: Vec<TranscriptEntry>,
    pub sending: bool,
    /// Last send failure, shown once and cleared on the next attempt.
    pub last_error: Option<String>,
}

impl ChatView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            sessions: Remote::NotAsked,
            active_session: None,
            transcript: Vec::new(),
            sending: false,
            last_error: None,
        }
    }

    pub async fn refresh_sessions(&mut self) {
        self.sessions.begin();
        self.sessions.resolve(self.client.chat_sessions().await);
    }

    /// Load an existing session into the transcript.
    pub async fn open_session(&mut self, session_id: i64) -> Result<(), String> {
        let messages = self
            .client
            .session_messages(session_id)
            .await
            .map_err(|e| e.display_message())?;
        self.active_session = Some(session_id);
        self.transcript = messages
            .iter()
            .map(|m| {
                let mut entry = TranscriptEntry::new(m.role, m.content.clone());
                entry.triage = m.triage();
                entry
            })
            .collect();
        self.last_error = None;
        debug!(session_id, entries = self.transcript.len(), "opened chat session");
        Ok(())
    }

    /// Start over with an empty transcript; the backend creates the
    /// session lazily on the first message.
    pub fn start_new_session(&mut self) {
        self.active_session = None;
        self.transcript.clear();
        self.last_error = None;
    }

    /// Send a triage message. Appends the user entry immediately, then the
    /// assistant reply; on failure the user entry stays and the error is
    /// surfaced once.
    pub async fn send(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.sending {
            return;
        }
        self.last_error = None;
        self.sending = true;
        self.transcript.push(TranscriptEntry::user(text));

        let request = ChatRequest {
            session_id: self.active_session,
            message: text.to_string(),
        };
        match self.client.send_chat_message(&request).await {
            Ok(reply) => {
                self.active_session = Some(reply.session_id);
                let emergency = reply.is_emergency();
                let mut entry = TranscriptEntry::new(MessageRole::Assistant, reply.response);
                entry.emergency = emergency;
                entry.triage = reply.structured_response;
                self.transcript.push(entry);
            }
            Err(err) => {
                self.last_error = Some(err.display_message());
            }
        }
        self.sending = false;
    }

    /// Re-run the assistant on the active session's last message, replacing
    /// the trailing assistant entry.
    pub async fn regenerate(&mut self) {
        let Some(session_id) = self.active_session else {
            return;
        };
        self.last_error = None;
        match self.client.regenerate_response(session_id).await {
            Ok(reply) => {
                if self
                    .transcript
                    .last()
                    .is_some_and(|e| e.role == MessageRole::Assistant)
                {
                    self.transcript.pop();
                }
                let emergency = reply.is_emergency();
                let mut entry = TranscriptEntry::new(MessageRole::Assistant, reply.response);
                entry.emergency = emergency;
                entry.triage = reply.structured_response;
                self.transcript.push(entry);
            }
            Err(err) => self.last_error = Some(err.display_message()),
        }
    }

    pub async fn delete_session(&mut self, session_id: i64) -> Result<(), String> {
        self.client
            .delete_chat_session(session_id)
            .await
            .map_err(|e| e.display_message())?;
        if self.active_session == Some(session_id) {
            self.start_new_session();
        }
        self.refresh_sessions().await;
        Ok(())
    }

    /// Run the nearby-care flow: validated query in, suggestion plus
    /// ranked providers out. Does not touch the triage transcript.
    pub async fn nearby_care(
        &self,
        query: NearbyCareQuery,
    ) -> Result<LocationChatResponse, String> {
        self.client
            .location_chat(&query.into_request())
            .await
            .map_err(|e| e.display_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── NearbyCareQuery validation ──

    #[test]
    fn accepts_valid_coordinates() {
        let query = NearbyCareQuery::new("chest pain clinic", 17.4065, 78.4772).unwrap();
        let req = query.into_request();
        assert_eq!(req.latitude, 17.4065);
        assert_eq!(req.longitude, 78.4772);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            NearbyCareQuery::new("help", 91.0, 0.0),
            Err(QueryError::Latitude(91.0))
        );
        assert_eq!(
            NearbyCareQuery::new("help", -90.5, 0.0),
            Err(QueryError::Latitude(-90.5))
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            NearbyCareQuery::new("help", 0.0, 181.0),
            Err(QueryError::Longitude(181.0))
        );
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(NearbyCareQuery::new("help", f64::NAN, 0.0).is_err());
        assert!(NearbyCareQuery::new("help", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_empty_message() {
        assert_eq!(
            NearbyCareQuery::new("   ", 10.0, 10.0),
            Err(QueryError::EmptyMessage)
        );
    }

    #[test]
    fn boundary_coordinates_accepted() {
        assert!(NearbyCareQuery::new("help", 90.0, 180.0).is_ok());
        assert!(NearbyCareQuery::new("help", -90.0, -180.0).is_ok());
    }
}
