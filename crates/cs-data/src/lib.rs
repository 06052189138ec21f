//! Data access for the COVID statistics dashboard

pub mod config;
pub mod transport;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use config::DashboardConfig;
pub use transport::{FixtureTransport, GraphQlClient, StatsTransport};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    
    #[error("HTTP error: {0}")]
    Http(String),
    
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    
    #[error("Configuration error: {0}")]
    Config(String),
    
    #[error("Join error: {0}")]
    Join(#[from] JoinError),
    
    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for DataError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => DataError::Http(format!("{} ({})", error, status)),
            None => DataError::Http(error.to_string()),
        }
    }
}
