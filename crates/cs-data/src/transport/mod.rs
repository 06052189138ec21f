//! Transports that execute catalog queries

use async_trait::async_trait;
use serde_json::Value;
use cs_core::QueryDocument;

use crate::DataError;

pub mod fixture;
pub mod graphql;

pub use fixture::FixtureTransport;
pub use graphql::GraphQlClient;

/// Something that can answer a query document with a `data` payload
#[async_trait]
pub trait StatsTransport: Send + Sync {
    /// Execute the document and return the response `data` member
    async fn execute(&self, query: &QueryDocument) -> Result<Value, DataError>;

    /// Get the source name (endpoint or fixture file)
    fn source_name(&self) -> &str;
}
