//! Application routes and the router that tracks them

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::{Entity, QueryName};

mod router;

pub use router::Router;

/// A screen of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Landing page with world and India summaries
    Home,
    /// Searchable table and chart over one catalog query
    Stats { entity: Entity, query: QueryName },
    /// Drill-down into one country or state
    Detail { entity: Entity, id: String },
}

impl Route {
    /// Stats screen over the entity's default list query
    pub fn stats(entity: Entity) -> Self {
        Route::Stats {
            entity,
            query: QueryName::list_for(entity),
        }
    }

    /// Route taken when a row name is clicked
    pub fn detail(entity: Entity, id: impl Into<String>) -> Self {
        Route::Detail {
            entity,
            id: id.into(),
        }
    }

    /// Path form: `/`, `/{entity}/stats/{query}`, `/{entity}/detail/{id}`
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Stats { entity, query } => format!("/{}/stats/{}", entity, query),
            Route::Detail { entity, id } => format!("/{}/detail/{}", entity, id),
        }
    }

    /// Parse a path produced by [`Route::path`]; `None` for anything else
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }

        let mut parts = trimmed.splitn(3, '/');
        let entity = Entity::from_param(parts.next()?);
        let kind = parts.next()?;
        let rest = parts.next()?;
        if rest.is_empty() {
            return None;
        }

        match kind {
            "stats" => rest.parse().ok().map(|query| Route::Stats { entity, query }),
            "detail" => Some(Route::detail(entity, rest)),
            _ => None,
        }
    }

    /// Breadcrumb trail label
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Stats { entity: Entity::World, .. } => "World Statistics".to_string(),
            Route::Stats { entity: Entity::India, .. } => "India Statistics".to_string(),
            Route::Detail { id, .. } => id.clone(),
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Home
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
