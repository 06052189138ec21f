//! Dashboard configuration file

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Serialize, Deserialize};
use cs_core::{Entity, NumericPolicy, QueryName, Route};

use crate::DataError;

/// Rows per table page unless configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings loaded from a JSON file, then overridden from the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// GraphQL endpoint URL
    pub endpoint: Option<String>,

    /// Recorded dataset used instead of an endpoint
    pub fixture: Option<PathBuf>,

    /// Rows per table page
    pub page_size: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Coercion of string-typed counts
    pub numeric: NumericPolicy,

    /// Entity of the first stats screen
    pub initial_entity: Option<Entity>,

    /// Query of the first stats screen
    pub initial_query: Option<QueryName>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            fixture: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            numeric: NumericPolicy::default(),
            initial_entity: None,
            initial_query: None,
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration document
    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        tracing::info!("Loaded configuration from {:?}", path);
        Self::from_json_str(&text)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), DataError> {
        if self.page_size == 0 {
            return Err(DataError::Config("page_size must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(DataError::Config("request_timeout_secs must be at least 1".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(DataError::Config(format!("endpoint '{}' is not an http(s) URL", endpoint)));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// First screen: a stats view when an entity or query is configured, else home
    pub fn initial_route(&self) -> Route {
        match (self.initial_entity, self.initial_query) {
            (None, None) => Route::Home,
            (entity, query) => {
                let entity = entity.unwrap_or_default();
                Route::Stats {
                    entity,
                    query: query.unwrap_or_else(|| QueryName::list_for(entity)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::InvalidNumber;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_route(), Route::Home);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_full_document() {
        let config = DashboardConfig::from_json_str(r#"{
            "endpoint": "https://covid.example.org/graphql",
            "page_size": 25,
            "numeric": { "on_invalid": "propagate" },
            "initial_entity": "india"
        }"#).unwrap();

        assert_eq!(config.page_size, 25);
        assert_eq!(config.numeric.on_invalid, InvalidNumber::Propagate);
        assert_eq!(config.initial_route(), Route::stats(Entity::India));
    }

    #[test]
    fn test_initial_query_without_entity() {
        let config = DashboardConfig {
            initial_query: Some(QueryName::Tests),
            ..Default::default()
        };
        assert_eq!(
            config.initial_route(),
            Route::Stats { entity: Entity::World, query: QueryName::Tests }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{ "page_size": 0 }"#),
            Err(DataError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{ "endpoint": "ftp://x" }"#),
            Err(DataError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{ "initial_query": "vaccines" }"#),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "fixture": "data/sample_stats.json" }"#).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.fixture, Some(PathBuf::from("data/sample_stats.json")));
    }
}
