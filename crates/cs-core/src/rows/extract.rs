//! Readers for the summary, detail and district payload shapes

use serde::{Serialize, Deserialize};
use serde_json::Value;

use super::{CountryStat, Counts, IndiaRow, NumericPolicy, RawStateStat, TOTAL_ROW_MARKER};
use crate::Entity;

/// One district of a state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRow {
    pub district: String,
    pub confirmed: f64,
    pub last_updated: Option<String>,
}

#[derive(Deserialize)]
struct RawDistrict {
    district: String,
    #[serde(default)]
    confirmed: Value,
    #[serde(default)]
    lastupdatedtime: Option<String>,
}

fn counts_at(obj: &Value, policy: &NumericPolicy) -> Counts {
    let field = |name: &str| policy.value_or_fallback(obj.get(name).unwrap_or(&Value::Null));
    Counts {
        confirmed: field("confirmed"),
        recovered: field("recovered"),
        deaths: field("deaths"),
    }
}

/// Headline figures from a `summary` query result
pub fn summary_figures(payload: &Value, entity: Entity, policy: &NumericPolicy) -> Option<Counts> {
    let figures = match entity {
        Entity::World => payload.get("summary"),
        Entity::India => payload.pointer("/country/mostRecent"),
    }?;
    figures.is_object().then(|| counts_at(figures, policy))
}

/// The single country of a country-detail result, counts coerced leniently
pub fn country_detail(payload: &Value, policy: &NumericPolicy) -> Option<CountryStat> {
    let country = payload.get("country")?;
    match CountryStat::deserialize(country) {
        Ok(stat) => stat.coerce(&lenient(policy)),
        Err(e) => {
            tracing::debug!("Malformed country detail: {}", e);
            None
        }
    }
}

/// Districts of a district-detail result, in payload order
pub fn district_rows(payload: &Value, policy: &NumericPolicy) -> Vec<DistrictRow> {
    let Some(list) = payload.pointer("/district/districtData").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|item| match RawDistrict::deserialize(item) {
            Ok(raw) => Some(DistrictRow {
                confirmed: policy.value_or_fallback(&raw.confirmed),
                district: raw.district,
                last_updated: raw.lastupdatedtime,
            }),
            Err(e) => {
                tracing::debug!("Skipping malformed district row: {}", e);
                None
            }
        })
        .collect()
}

/// The India `Total` aggregate row, coerced like any state row
pub fn total_row(payload: &Value, policy: &NumericPolicy) -> Option<IndiaRow> {
    let item = super::source_list(payload, Entity::India)
        .iter()
        .find(|item| item.get("state").and_then(Value::as_str) == Some(TOTAL_ROW_MARKER))?;
    let raw = RawStateStat::deserialize(item).ok()?;
    raw.coerce(&lenient(policy))
}

/// Single-item screens show the item even when a count is invalid
fn lenient(policy: &NumericPolicy) -> NumericPolicy {
    NumericPolicy {
        on_invalid: super::InvalidNumber::Zero,
        ..policy.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_world_summary() {
        let payload = json!({ "summary": { "confirmed": 1000, "deaths": 10, "recovered": 600 } });
        let counts = summary_figures(&payload, Entity::World, &NumericPolicy::default()).unwrap();
        assert_eq!(counts, Counts { confirmed: 1000.0, recovered: 600.0, deaths: 10.0 });
    }

    #[test]
    fn test_india_summary_reads_most_recent() {
        let payload = json!({
            "country": { "name": "India", "mostRecent": { "confirmed": 20, "deaths": 2, "recovered": 15 } }
        });
        let counts = summary_figures(&payload, Entity::India, &NumericPolicy::default()).unwrap();
        assert_eq!(counts.confirmed, 20.0);
        assert!(summary_figures(&json!({}), Entity::India, &NumericPolicy::default()).is_none());
    }

    #[test]
    fn test_country_detail() {
        let payload = json!({
            "country": { "name": "Brazil", "mostRecent": { "confirmed": 10, "recovered": 5, "deaths": 1 } }
        });
        let policy = NumericPolicy::default().with_on_invalid(super::super::InvalidNumber::HideRow);
        let stat = country_detail(&payload, &policy).unwrap();
        assert_eq!(stat.name, "Brazil");
        assert_eq!(stat.counts.deaths, 1.0);
        assert!(country_detail(&json!({ "country": null }), &policy).is_none());

        let partial = json!({ "country": { "name": "Chad", "mostRecent": { "confirmed": "7" } } });
        let stat = country_detail(&partial, &policy).unwrap();
        assert_eq!(stat.counts.confirmed, 7.0);
        assert_eq!(stat.invalid_fields, vec!["recovered", "deaths"]);
    }

    #[test]
    fn test_district_rows() {
        let payload = json!({
            "district": {
                "state": "Kerala",
                "districtData": [
                    { "district": "Ernakulam", "confirmed": 12, "lastupdatedtime": "" },
                    { "district": "Kasaragod", "confirmed": "7" },
                    { "confirmed": 3 }
                ]
            }
        });
        let rows = district_rows(&payload, &NumericPolicy::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].district, "Ernakulam");
        assert_eq!(rows[1].confirmed, 7.0);
        assert_eq!(rows[1].last_updated, None);
    }

    #[test]
    fn test_total_row() {
        let payload = json!({
            "india": { "statewise": [
                { "state": "Kerala", "confirmed": "50", "recovered": "40", "deaths": "1" },
                { "state": "Total", "confirmed": "100", "recovered": "-", "deaths": "3" }
            ] }
        });
        let policy = NumericPolicy::default().with_on_invalid(super::super::InvalidNumber::HideRow);
        let total = total_row(&payload, &policy).unwrap();
        assert_eq!(total.confirmed, 100.0);
        assert_eq!(total.recovered, 0.0);
        assert_eq!(total.invalid_fields, vec!["recovered"]);
    }
}
