//! Command line arguments and their merge over the configuration file

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use cs_core::{Entity, QueryName};
use cs_data::DashboardConfig;

/// COVID-19 statistics dashboard
#[derive(Debug, Parser)]
#[command(name = "covid-stats", version, about)]
pub struct Cli {
    /// GraphQL endpoint to query
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Recorded JSON dataset to serve instead of an endpoint
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Entity of the first stats screen (world or india)
    #[arg(long)]
    pub entity: Option<String>,

    /// Catalog query of the first stats screen
    #[arg(long)]
    pub query: Option<String>,
}

impl Cli {
    /// Load the configuration file, if any, and apply the overrides
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let base = match &self.config {
            Some(path) => DashboardConfig::load(path)
                .with_context(|| format!("Failed to load configuration {:?}", path))?,
            None => DashboardConfig::default(),
        };
        self.apply(base)
    }

    /// Overlay command line values on `config`
    pub fn apply(&self, mut config: DashboardConfig) -> Result<DashboardConfig> {
        // a source given on the command line replaces both file sources
        if let Some(fixture) = &self.fixture {
            config.fixture = Some(fixture.clone());
            config.endpoint = None;
        } else if let Some(endpoint) = &self.endpoint {
            config.endpoint = Some(endpoint.clone());
            config.fixture = None;
        }

        if let Some(entity) = &self.entity {
            if entity != "world" && entity != "india" {
                tracing::warn!("Unknown entity '{}', showing world", entity);
            }
            config.initial_entity = Some(Entity::from_param(entity));
        }

        if let Some(query) = &self.query {
            let name: QueryName = query.parse()?;
            config.initial_query = Some(name);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use cs_core::Route;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["covid-stats"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_no_arguments_keep_defaults() {
        let config = cli(&[]).resolve_config().unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_route(), Route::Home);
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "endpoint": "https://file.example.org/graphql", "page_size": 5, "initial_entity": "world" }}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = cli(&["--config", &path, "--fixture", "data/sample_stats.json", "--entity", "india"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.endpoint, None);
        assert_eq!(config.fixture, Some(PathBuf::from("data/sample_stats.json")));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.initial_route(), Route::stats(Entity::India));
    }

    #[test]
    fn test_initial_query() {
        let config = cli(&["--query", "tests"]).resolve_config().unwrap();
        assert_eq!(
            config.initial_route(),
            Route::Stats { entity: Entity::World, query: QueryName::Tests }
        );
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(cli(&["--query", "vaccines"]).resolve_config().is_err());
        assert!(cli(&["--endpoint", "ftp://nowhere"]).resolve_config().is_err());
        assert!(cli(&["--config", "/definitely/missing.json"]).resolve_config().is_err());
    }
}
