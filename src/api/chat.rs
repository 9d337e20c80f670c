//! `/chat` endpoints: symptom triage conversation plus the
//! geolocation-driven "nearby care" flow.

use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::chat::{ChatMessage, ChatSession, StructuredTriage};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message_id: i64,
    pub session_id: i64,
    pub response: String,
    #[serde(default)]
    pub response_telugu: Option<String>,
    #[serde(default)]
    pub structured_response: Option<StructuredTriage>,
    #[serde(default)]
    pub is_emergency: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl ChatResponse {
    pub fn is_emergency(&self) -> bool {
        self.is_emergency.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationChatRequest {
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationChatResponse {
    #[serde(default)]
    pub ai_suggestion_english: Option<String>,
    #[serde(default)]
    pub ai_suggestion_telugu: Option<String>,
    #[serde(default)]
    pub recommended_doctors: Vec<RecommendedDoctor>,
    #[serde(default)]
    pub nearby_hospitals: Vec<NearbyHospital>,
}

/// Doctor suggestion ranked by the backend's distance calculation;
/// `distance` arrives pre-formatted ("2.4 km").
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedDoctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub distance: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyHospital {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ApiClient {
    /// Send a triage message. Omitting `session_id` starts a new session;
    /// the reply carries the id to continue with.
    pub async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.post("/chat/message", request).await
    }

    pub async fn chat_sessions(&self) -> Result<Vec<ChatSession>, ApiError> {
        let env: ApiEnvelope<Vec<ChatSession>> = self.get("/chat/sessions").await?;
        env.into_data()
    }

    pub async fn session_messages(&self, session_id: i64) -> Result<Vec<ChatMessage>, ApiError> {
        let env: ApiEnvelope<Vec<ChatMessage>> = self
            .get(&format!("/chat/sessions/{session_id}/messages"))
            .await?;
        env.into_data()
    }

    /// The title travels as a query parameter, not a body.
    pub async fn create_chat_session(
        &self,
        title: Option<&str>,
    ) -> Result<ChatSession, ApiError> {
        let mut builder = self.builder(Method::POST, "/chat/sessions");
        if let Some(title) = title {
            builder = builder.query(&[("title", title)]);
        }
        let env: ApiEnvelope<ChatSession> = self.send(builder).await?;
        env.into_data()
    }

    pub async fn delete_chat_session(&self, session_id: i64) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self
            .delete(&format!("/chat/sessions/{session_id}"))
            .await?;
        env.into_ack()
    }

    /// Re-run the assistant on the last user message of a session.
    pub async fn regenerate_response(&self, session_id: i64) -> Result<ChatResponse, ApiError> {
        self.post_empty(&format!("/chat/sessions/{session_id}/regenerate"))
            .await
    }

    /// "Nearby care": message plus coordinates in, suggestion plus ranked
    /// doctors and hospitals out.
    pub async fn location_chat(
        &self,
        request: &LocationChatRequest,
    ) -> Result<LocationChatResponse, ApiError> {
        let env: ApiEnvelope<LocationChatResponse> = self.post("/chat/location", request).await?;
        env.into_data()
    }
}
