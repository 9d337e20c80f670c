use thiserror::Error;

/// Client-side error taxonomy for backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, refused connection, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 from any endpoint. The session has already been cleared.
    #[error("Authentication required")]
    Unauthorized,

    /// Non-2xx response, with the server's message when it sent one.
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// 2xx envelope with `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short user-facing message for a dashboard error slot.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Check your connection.".into(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".into(),
        }
    }
}
