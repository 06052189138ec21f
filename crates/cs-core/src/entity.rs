//! Entity discriminator selecting the backend aggregate and field layout

use std::fmt;
use serde::{Serialize, Deserialize};

/// Which aggregate a view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    /// Country-level figures (`countries`, nested `mostRecent` counts)
    #[default]
    World,
    /// India state-wise figures (`india.statewise`, flat string counts)
    India,
}

impl Entity {
    /// Parse a route/query parameter. Only the literal `india` selects India.
    pub fn from_param(value: &str) -> Self {
        if value == "india" {
            Entity::India
        } else {
            Entity::World
        }
    }

    /// Parameter form used in routes and catalog keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::World => "world",
            Entity::India => "india",
        }
    }

    /// Heading for the list panel
    pub fn list_heading(&self) -> &'static str {
        match self {
            Entity::World => "Countries",
            Entity::India => "States",
        }
    }

    /// Heading for the chart panel
    pub fn chart_heading(&self) -> &'static str {
        match self {
            Entity::World => "Country-wise Statistics",
            Entity::India => "State-wise Statistics",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_literal_india_selects_india() {
        assert_eq!(Entity::from_param("india"), Entity::India);
        assert_eq!(Entity::from_param("world"), Entity::World);
        assert_eq!(Entity::from_param("India"), Entity::World);
        assert_eq!(Entity::from_param(""), Entity::World);
    }
}
