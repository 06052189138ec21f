//! Core functionality for the COVID statistics dashboard
//! 
//! This crate provides the query catalog, the row normalization that feeds
//! tables and charts, and the routing state shared by the views.

pub mod entity;
pub mod fetch;
pub mod query;
pub mod route;
pub mod rows;

// Re-export commonly used types
pub use entity::Entity;
pub use fetch::FetchState;
pub use query::{
    get_query, detail_query, DetailKind, QueryCatalog, QueryDocument, QueryError, QueryName,
};
pub use route::{Route, Router};
pub use rows::{
    normalize_rows, CountryStat, Counts, IndiaRow, InvalidNumber, NormalizedRow, NumericPolicy,
    StatAccessor,
};
