//! Row normalization and search filtering
//!
//! Turns a fetched payload into the entity-agnostic rows shared by the
//! stats table and the composed chart. The payload is only borrowed.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::Entity;

mod extract;
mod numeric;

pub use extract::{country_detail, district_rows, summary_figures, total_row, DistrictRow};
pub use numeric::{InvalidNumber, NumericPolicy};

/// Aggregate row in `india.statewise` that is never listed
pub const TOTAL_ROW_MARKER: &str = "Total";

/// Confirmed/recovered/deaths triple
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Counts {
    pub confirmed: f64,
    pub recovered: f64,
    pub deaths: f64,
}

/// Country row as returned by the backend.
///
/// `mostRecent` is kept as received so the row serializes back unchanged;
/// `counts` holds its coerced figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_recent: Option<Value>,
    /// Coerced `mostRecent` counts
    #[serde(skip)]
    pub counts: Counts,
    /// Count fields that were missing or unparsable
    #[serde(skip)]
    pub invalid_fields: Vec<&'static str>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CountryStat {
    pub fn is_clean(&self) -> bool {
        self.invalid_fields.is_empty()
    }

    /// Coerce the `mostRecent` counts; `None` when the policy hides the row
    pub(crate) fn coerce(mut self, policy: &NumericPolicy) -> Option<Self> {
        let figures = self.most_recent.as_ref();
        let (counts, invalid_fields) =
            coerce_counts(policy, |field| figures.and_then(|f| f.get(field)));

        if hidden(policy, &self.name, &invalid_fields) {
            return None;
        }
        self.counts = counts;
        self.invalid_fields = invalid_fields;
        Some(self)
    }
}

/// India state row after coercion, keyed by `name` like a country row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndiaRow {
    pub name: String,
    pub state: String,
    pub confirmed: f64,
    pub recovered: f64,
    pub deaths: f64,
    /// Count fields that were missing or unparsable
    #[serde(skip)]
    pub invalid_fields: Vec<&'static str>,
    /// Every other field of the source row, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndiaRow {
    pub fn is_clean(&self) -> bool {
        self.invalid_fields.is_empty()
    }
}

#[derive(Deserialize)]
struct RawStateStat {
    state: String,
    #[serde(default)]
    confirmed: Value,
    #[serde(default)]
    recovered: Value,
    #[serde(default)]
    deaths: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawStateStat {
    /// Coerce the counts; `None` when the policy hides the row
    fn coerce(self, policy: &NumericPolicy) -> Option<IndiaRow> {
        let (counts, invalid_fields) = coerce_counts(policy, |field| match field {
            "confirmed" => Some(&self.confirmed),
            "recovered" => Some(&self.recovered),
            "deaths" => Some(&self.deaths),
            _ => None,
        });

        if hidden(policy, &self.state, &invalid_fields) {
            return None;
        }

        Some(IndiaRow {
            name: self.state.clone(),
            state: self.state,
            confirmed: counts.confirmed,
            recovered: counts.recovered,
            deaths: counts.deaths,
            invalid_fields,
            extra: self.extra,
        })
    }
}

/// Parse the three counts, falling back per `policy` and naming the bad fields
fn coerce_counts<'a>(
    policy: &NumericPolicy,
    field: impl Fn(&str) -> Option<&'a Value>,
) -> (Counts, Vec<&'static str>) {
    let mut invalid_fields = Vec::new();
    let mut count = |name: &'static str| match field(name).and_then(|v| policy.parse(v)) {
        Some(v) => v,
        None => {
            invalid_fields.push(name);
            policy.fallback()
        }
    };

    let counts = Counts {
        confirmed: count("confirmed"),
        recovered: count("recovered"),
        deaths: count("deaths"),
    };
    (counts, invalid_fields)
}

fn hidden(policy: &NumericPolicy, name: &str, invalid_fields: &[&'static str]) -> bool {
    let hide = !invalid_fields.is_empty() && policy.on_invalid == InvalidNumber::HideRow;
    if hide {
        tracing::debug!("Hiding row '{}' with invalid {:?}", name, invalid_fields);
    }
    hide
}

/// Uniform read access to a row, whatever the entity layout
pub trait StatAccessor {
    fn name(&self) -> &str;

    fn counts(&self) -> Counts;

    fn confirmed(&self) -> f64 {
        self.counts().confirmed
    }

    fn recovered(&self) -> f64 {
        self.counts().recovered
    }

    fn deaths(&self) -> f64 {
        self.counts().deaths
    }
}

impl StatAccessor for CountryStat {
    fn name(&self) -> &str {
        &self.name
    }

    fn counts(&self) -> Counts {
        self.counts
    }
}

impl StatAccessor for IndiaRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn counts(&self) -> Counts {
        Counts {
            confirmed: self.confirmed,
            recovered: self.recovered,
            deaths: self.deaths,
        }
    }
}

/// Row fed to the table and the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedRow {
    World(CountryStat),
    India(IndiaRow),
}

impl NormalizedRow {
    pub fn entity(&self) -> Entity {
        match self {
            NormalizedRow::World(_) => Entity::World,
            NormalizedRow::India(_) => Entity::India,
        }
    }
}

impl StatAccessor for NormalizedRow {
    fn name(&self) -> &str {
        match self {
            NormalizedRow::World(row) => row.name(),
            NormalizedRow::India(row) => row.name(),
        }
    }

    fn counts(&self) -> Counts {
        match self {
            NormalizedRow::World(row) => row.counts(),
            NormalizedRow::India(row) => row.counts(),
        }
    }
}

/// Field the search string is matched against
fn name_key(entity: Entity) -> &'static str {
    match entity {
        Entity::World => "name",
        Entity::India => "state",
    }
}

/// The raw list for an entity; empty when the payload lacks it
pub fn source_list(payload: &Value, entity: Entity) -> &[Value] {
    let list = match entity {
        Entity::India => payload.pointer("/india/statewise"),
        Entity::World => payload.get("countries"),
    };
    list.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// Lowercased search needle, computed once per pass
#[derive(Debug, Clone)]
struct SearchNeedle(String);

impl SearchNeedle {
    fn new(search: &str) -> Self {
        Self(search.to_lowercase())
    }

    fn matches(&self, name: &str) -> bool {
        self.0.is_empty() || name.to_lowercase().contains(&self.0)
    }
}

/// Filter and project the payload for `entity`.
///
/// Output keeps the input order. India rows are renamed to `name` and have
/// their counts coerced by `policy`; the `Total` aggregate is excluded.
pub fn normalize_rows(
    payload: &Value,
    entity: Entity,
    search: &str,
    policy: &NumericPolicy,
) -> Vec<NormalizedRow> {
    let needle = SearchNeedle::new(search);
    let key = name_key(entity);

    source_list(payload, entity)
        .iter()
        .filter(|item| {
            let Some(name) = item.get(key).and_then(Value::as_str) else {
                tracing::debug!("Skipping {} row without '{}'", entity, key);
                return false;
            };
            if entity == Entity::India && name == TOTAL_ROW_MARKER {
                return false;
            }
            needle.matches(name)
        })
        .filter_map(|item| project(item, entity, policy))
        .collect()
}

fn project(item: &Value, entity: Entity, policy: &NumericPolicy) -> Option<NormalizedRow> {
    match entity {
        Entity::World => match CountryStat::deserialize(item) {
            Ok(row) => row.coerce(policy).map(NormalizedRow::World),
            Err(e) => {
                tracing::debug!("Skipping malformed country row: {}", e);
                None
            }
        },
        Entity::India => match RawStateStat::deserialize(item) {
            Ok(raw) => raw.coerce(policy).map(NormalizedRow::India),
            Err(e) => {
                tracing::debug!("Skipping malformed state row: {}", e);
                None
            }
        },
    }
}
