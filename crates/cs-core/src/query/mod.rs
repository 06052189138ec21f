//! Query documents, the static catalog and the detail query builder

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

mod catalog;
mod detail;

pub use catalog::QueryCatalog;
pub use detail::{detail_query, get_query, DetailKind};

/// Errors raised while resolving a query document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown query '{0}'")]
    UnknownQuery(String),

    #[error("unknown detail type '{0}' (expected country, state or district)")]
    UnknownDetailType(String),
}

/// Logical query names registered in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryName {
    Summary,
    Stats,
    Districts,
    India,
    Tests,
    World,
    Countries,
}

impl QueryName {
    pub const ALL: [QueryName; 7] = [
        QueryName::Summary,
        QueryName::Stats,
        QueryName::Districts,
        QueryName::India,
        QueryName::Tests,
        QueryName::World,
        QueryName::Countries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryName::Summary => "summary",
            QueryName::Stats => "stats",
            QueryName::Districts => "districts",
            QueryName::India => "india",
            QueryName::Tests => "tests",
            QueryName::World => "world",
            QueryName::Countries => "countries",
        }
    }

    /// Query feeding the stats list of an entity
    pub fn list_for(entity: crate::Entity) -> Self {
        match entity {
            crate::Entity::World => QueryName::Countries,
            crate::Entity::India => QueryName::India,
        }
    }
}

impl FromStr for QueryName {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| QueryError::UnknownQuery(s.to_string()))
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A GraphQL document plus the variables it is executed with.
///
/// Identifiers are never spliced into `text`; they travel in `variables`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDocument {
    operation: &'static str,
    text: &'static str,
    variables: Map<String, Value>,
}

impl QueryDocument {
    /// Create a document without variables
    pub fn new(operation: &'static str, text: &'static str) -> Self {
        Self {
            operation,
            text,
            variables: Map::new(),
        }
    }

    /// Bind a variable declared by the document
    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Template text, variables unresolved
    pub fn text(&self) -> &str {
        self.text
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// POST body for a GraphQL endpoint
    pub fn to_request_body(&self) -> Value {
        json!({
            "operationName": self.operation,
            "query": self.text,
            "variables": Value::Object(self.variables.clone()),
        })
    }

    /// Render the selection with every variable replaced by an escaped literal.
    ///
    /// Only for logs and display; transports send `to_request_body`.
    pub fn inline_text(&self) -> String {
        let body = match self.text.find('{') {
            Some(start) => &self.text[start..],
            None => self.text,
        };

        // longest names first so `$name` never clobbers `$nameSuffix`
        let mut bindings: Vec<(&String, &Value)> = self.variables.iter().collect();
        bindings.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

        let mut rendered = body.to_string();
        for (name, value) in bindings {
            rendered = rendered.replace(&format!("${}", name), &value.to_string());
        }
        rendered
    }
}

impl fmt::Display for QueryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.inline_text())
    }
}
