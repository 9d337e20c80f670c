use crate::api::ApiError;

/// Request/response state for one panel of data.
///
/// The four states are explicit so a renderer can't confuse "not loaded
/// yet" with "loaded and empty", or show stale data over an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Remote<T> {
    /// No request issued yet.
    #[default]
    NotAsked,
    /// Request in flight.
    Loading,
    /// Request failed; the message is what the user sees. Surfaced once,
    /// replaced wholesale by the next refresh.
    Failed(String),
    /// Data arrived.
    Ready(T),
}

impl<T> Remote<T> {
    pub fn is_not_asked(&self) -> bool {
        matches!(self, Remote::NotAsked)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Remote::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Remote<U> {
        match self {
            Remote::NotAsked => Remote::NotAsked,
            Remote::Loading => Remote::Loading,
            Remote::Failed(message) => Remote::Failed(message),
            Remote::Ready(data) => Remote::Ready(f(data)),
        }
    }

    /// Mark the slot loading before issuing the request.
    pub fn begin(&mut self) {
        *self = Remote::Loading;
    }

    /// Settle the slot from a finished request.
    pub fn resolve(&mut self, result: Result<T, ApiError>) {
        *self = Remote::from(result);
    }
}

impl<T> From<Result<T, ApiError>> for Remote<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Remote::Ready(data),
            Err(err) => Remote::Failed(err.display_message()),
        }
    }
}
