//! Static registry of query documents keyed by logical name and entity

use std::collections::BTreeMap;

use super::{QueryDocument, QueryError, QueryName};
use crate::Entity;

const WORLD_SUMMARY: &str = "query WorldSummary {
  summary { confirmed deaths recovered }
}";

const INDIA_SUMMARY: &str = "query IndiaSummary {
  country(name: \"India\") { name mostRecent { confirmed deaths recovered } }
}";

const COUNTRY_STATS: &str = "query CountryStats {
  countries(names: []) { name mostRecent { confirmed deaths recovered } }
}";

const INDIA_STATE_STATS: &str = "query IndiaStateStats {
  states(country: \"India\", names: []) { name mostRecent { confirmed deaths recovered } }
}";

const DISTRICTS: &str = "query Districts {
  districts { state districtData { district confirmed lastupdatedtime } }
}";

const INDIA: &str = "query India {
  india {
    statewise {
      active confirmed deaths deltaconfirmed deltadeaths deltarecovered
      lastupdatedtime recovered state statecode statenotes
    }
    tested {
      positivecasesfromsamplesreported samplereportedtoday source
      testsconductedbyprivatelabs totalindividualstested totalpositivecases
      totalsamplestested updatetimestamp
    }
  }
}";

const TESTS: &str = "query Tests {
  tests {
    negative numcallsstatehelpline numicubeds numisolationbeds numventilators
    positive positiveratebytests source source2 state testsperthousand
    totalpeopleinquarantine totalpeoplereleasedfromquarantine totaltested
    unconfirmed updatedon
  }
}";

/// Catalog slot: one document for every entity, or one per entity
#[derive(Debug, Clone)]
enum CatalogEntry {
    Shared(QueryDocument),
    PerEntity {
        world: QueryDocument,
        india: QueryDocument,
    },
}

impl CatalogEntry {
    fn resolve(&self, entity: Entity) -> &QueryDocument {
        match (self, entity) {
            (CatalogEntry::Shared(doc), _) => doc,
            (CatalogEntry::PerEntity { world, .. }, Entity::World) => world,
            (CatalogEntry::PerEntity { india, .. }, Entity::India) => india,
        }
    }
}

/// Immutable query registry, built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    entries: BTreeMap<QueryName, CatalogEntry>,
}

impl QueryCatalog {
    /// The catalog the dashboard ships with
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(QueryName::Summary, CatalogEntry::PerEntity {
            world: QueryDocument::new("WorldSummary", WORLD_SUMMARY),
            india: QueryDocument::new("IndiaSummary", INDIA_SUMMARY),
        });
        entries.insert(QueryName::Stats, CatalogEntry::PerEntity {
            world: QueryDocument::new("CountryStats", COUNTRY_STATS),
            india: QueryDocument::new("IndiaStateStats", INDIA_STATE_STATS),
        });
        entries.insert(QueryName::Districts, CatalogEntry::Shared(
            QueryDocument::new("Districts", DISTRICTS),
        ));
        entries.insert(QueryName::India, CatalogEntry::Shared(
            QueryDocument::new("India", INDIA),
        ));
        entries.insert(QueryName::Tests, CatalogEntry::Shared(
            QueryDocument::new("Tests", TESTS),
        ));
        // `world` and `countries` share text with the summary/stats world variants
        entries.insert(QueryName::World, CatalogEntry::Shared(
            QueryDocument::new("WorldSummary", WORLD_SUMMARY),
        ));
        entries.insert(QueryName::Countries, CatalogEntry::Shared(
            QueryDocument::new("CountryStats", COUNTRY_STATS),
        ));

        Self { entries }
    }

    /// Resolve a document; `entity` only matters for per-entity names
    pub fn get(&self, name: QueryName, entity: Entity) -> Result<&QueryDocument, QueryError> {
        self.entries
            .get(&name)
            .map(|entry| entry.resolve(entity))
            .ok_or_else(|| QueryError::UnknownQuery(name.to_string()))
    }

    /// Resolve a document from an untrusted key, validating it first
    pub fn lookup(&self, key: &str, entity: Entity) -> Result<&QueryDocument, QueryError> {
        let name: QueryName = key.parse()?;
        self.get(name, entity)
    }

    /// Whether the name has distinct world/india documents
    pub fn is_entity_specific(&self, name: QueryName) -> bool {
        matches!(self.entries.get(&name), Some(CatalogEntry::PerEntity { .. }))
    }

    /// Registered names in key order
    pub fn names(&self) -> impl Iterator<Item = QueryName> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_is_registered() {
        let catalog = QueryCatalog::standard();
        assert_eq!(catalog.len(), QueryName::ALL.len());
        for name in QueryName::ALL {
            assert!(catalog.get(name, Entity::World).is_ok());
            assert!(catalog.get(name, Entity::India).is_ok());
        }
    }

    #[test]
    fn test_per_entity_lookup() {
        let catalog = QueryCatalog::standard();

        let world = catalog.get(QueryName::Summary, Entity::World).unwrap();
        let india = catalog.get(QueryName::Summary, Entity::India).unwrap();
        assert!(world.text().contains("summary"));
        assert!(india.text().contains("country(name: \"India\")"));

        let stats = catalog.get(QueryName::Stats, Entity::India).unwrap();
        assert!(stats.text().contains("states(country: \"India\""));
        assert!(catalog.is_entity_specific(QueryName::Stats));
        assert!(!catalog.is_entity_specific(QueryName::Tests));
    }

    #[test]
    fn test_shared_names_ignore_entity() {
        let catalog = QueryCatalog::standard();
        assert_eq!(
            catalog.get(QueryName::India, Entity::World),
            catalog.get(QueryName::India, Entity::India)
        );
        let countries = catalog.get(QueryName::Countries, Entity::India).unwrap();
        assert!(countries.text().contains("countries(names: [])"));
        assert!(countries.variables().is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let catalog = QueryCatalog::standard();
        assert_eq!(
            catalog.lookup("vaccines", Entity::World),
            Err(QueryError::UnknownQuery("vaccines".to_string()))
        );
        assert!(catalog.lookup("tests", Entity::World).is_ok());
    }
}
