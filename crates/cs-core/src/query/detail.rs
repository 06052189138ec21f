//! Parametrized detail queries selected by a `(type, id)` pair

use std::fmt;
use std::str::FromStr;

use super::{QueryDocument, QueryError};
use crate::Entity;

const COUNTRY_DETAIL: &str = "query CountryDetail($name: String!) {
  country(name: $name) { name mostRecent { confirmed recovered deaths } }
}";

const INDIA_STATEWISE: &str = "query IndiaStatewise {
  india { statewise { active confirmed deaths recovered state statecode } }
}";

const DISTRICT_DETAIL: &str = "query DistrictDetail($stateName: String!) {
  district(stateName: $stateName) { state districtData { district confirmed lastupdatedtime } }
}";

/// Identifier the country lookup reroutes to the statewise query
const INDIA_ID: &str = "india";

/// Kind of detail lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    Country,
    State,
    District,
}

impl DetailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Country => "country",
            DetailKind::State => "state",
            DetailKind::District => "district",
        }
    }

    /// Detail lookup used when drilling into a row of the entity's list
    pub fn drill_for(entity: Entity) -> Self {
        match entity {
            Entity::World => DetailKind::Country,
            Entity::India => DetailKind::District,
        }
    }
}

impl FromStr for DetailKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(DetailKind::Country),
            "state" => Ok(DetailKind::State),
            "district" => Ok(DetailKind::District),
            other => Err(QueryError::UnknownDetailType(other.to_string())),
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the detail document for `kind` and `id`.
///
/// `State` ignores `id`; `Country` with id `india` yields the statewise
/// document as well.
pub fn detail_query(kind: DetailKind, id: &str) -> QueryDocument {
    match kind {
        DetailKind::Country if id != INDIA_ID => {
            QueryDocument::new("CountryDetail", COUNTRY_DETAIL).with_variable("name", id)
        }
        DetailKind::Country | DetailKind::State => {
            QueryDocument::new("IndiaStatewise", INDIA_STATEWISE)
        }
        DetailKind::District => {
            QueryDocument::new("DistrictDetail", DISTRICT_DETAIL).with_variable("stateName", id)
        }
    }
}

/// String-keyed entry point; an unknown `kind` is an error, not an absent document
pub fn get_query(kind: &str, id: &str) -> Result<QueryDocument, QueryError> {
    let kind: DetailKind = kind.parse()?;
    Ok(detail_query(kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup_carries_identifier() {
        let doc = get_query("country", "Brazil").unwrap();
        assert_eq!(doc.operation(), "CountryDetail");
        assert!(doc.text().contains("country(name: $name)"));
        assert_eq!(doc.variables()["name"], "Brazil");
        assert!(doc.inline_text().contains("country(name: \"Brazil\")"));
    }

    #[test]
    fn test_india_country_falls_back_to_statewise() {
        let india = get_query("country", "india").unwrap();
        let state = get_query("state", "anything").unwrap();
        assert_eq!(india, state);
        assert!(india.text().contains("statewise"));
        assert!(india.variables().is_empty());

        // the fallback is exact-match only
        let capitalised = get_query("country", "India").unwrap();
        assert_eq!(capitalised.operation(), "CountryDetail");
    }

    #[test]
    fn test_district_lookup_uses_state_name() {
        let doc = detail_query(DetailKind::District, "Kerala");
        assert_eq!(doc.variables()["stateName"], "Kerala");
        assert!(doc.inline_text().contains("district(stateName: \"Kerala\")"));
    }

    #[test]
    fn test_hostile_id_stays_inside_variables() {
        let hostile = "x\") { secrets } country(name: \"y";
        let doc = detail_query(DetailKind::Country, hostile);
        assert!(!doc.text().contains("secrets"));
        assert_eq!(doc.variables()["name"], hostile);
    }

    #[test]
    fn test_unknown_type_fails_loudly() {
        assert_eq!(
            get_query("bogus-type", "x"),
            Err(QueryError::UnknownDetailType("bogus-type".to_string()))
        );
    }

    #[test]
    fn test_drill_kind_per_entity() {
        assert_eq!(DetailKind::drill_for(Entity::World), DetailKind::Country);
        assert_eq!(DetailKind::drill_for(Entity::India), DetailKind::District);
    }
}
