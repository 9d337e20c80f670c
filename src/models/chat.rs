use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::MessageRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub last_message_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

/// One transcript entry. `structured_response` is the raw JSON string the
/// backend stores; [`ChatMessage::triage`] decodes it on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub structured_response: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Structured triage payload attached to assistant replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTriage {
    #[serde(default)]
    pub symptom_summary: Option<String>,
    #[serde(default)]
    pub possible_causes: Option<String>,
    #[serde(default)]
    pub severity_level: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
}

impl ChatMessage {
    /// Decode the structured triage payload, if one is attached and valid.
    /// A malformed payload renders as plain text, it is not an error.
    pub fn triage(&self) -> Option<StructuredTriage> {
        let raw = self.structured_response.as_deref()?;
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_decodes_attached_payload() {
        let msg = ChatMessage {
            id: 1,
            role: MessageRole::Assistant,
            content: "You may have a mild viral infection.".into(),
            structured_response: Some(
                r#"{"symptomSummary": "fever, cough", "severityLevel": "MILD"}"#.into(),
            ),
            created_at: "2026-02-01T08:00:00".parse().unwrap(),
        };
        let triage = msg.triage().unwrap();
        assert_eq!(triage.symptom_summary.as_deref(), Some("fever, cough"));
        assert_eq!(triage.severity_level.as_deref(), Some("MILD"));
    }

    #[test]
    fn triage_tolerates_malformed_payload() {
        let msg = ChatMessage {
            id: 2,
            role: MessageRole::Assistant,
            content: "plain reply".into(),
            structured_response: Some("not json".into()),
            created_at: "2026-02-01T08:00:00".parse().unwrap(),
        };
        assert!(msg.triage().is_none());
    }

    #[test]
    fn session_defaults_active() {
        let json = r#"{"id": 3, "title": "Headache", "createdAt": "2026-02-01T08:00:00"}"#;
        let session: ChatSession = serde_json::from_str(json).unwrap();
        assert!(session.is_active);
        assert!(!session.is_emergency);
    }
}
