//! Tri-state result of a single fetch

/// Observable state of one request: loading, error or data
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Request in flight
    Pending,
    /// Request failed; the message is for logs, the UI shows a generic error
    Failed(String),
    /// Request succeeded
    Ready(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Pending
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// The fetched data, if the request succeeded
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Pending => FetchState::Pending,
            FetchState::Failed(message) => FetchState::Failed(message),
            FetchState::Ready(data) => FetchState::Ready(f(data)),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }
}
