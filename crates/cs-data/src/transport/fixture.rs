//! Offline transport answering queries from a JSON document

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use serde_json::{json, Value};
use cs_core::QueryDocument;

use super::StatsTransport;
use crate::DataError;

/// Transport serving a recorded dataset.
///
/// The dataset is the union of the `data` roots the backend would return
/// (`summary`, `country`, `countries`, `india`, `districts`, `tests`, ...).
/// Parametrized detail queries are resolved against the list roots.
pub struct FixtureTransport {
    name: String,
    data: Arc<Value>,
}

impl FixtureTransport {
    /// Create a fixture transport from an in-memory dataset
    pub fn from_value(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(unwrap_envelope(data)),
        }
    }

    /// Load a dataset file on a blocking task
    pub async fn load(path: PathBuf) -> Result<Self, DataError> {
        let name = source_label(&path);
        let data = tokio::task::spawn_blocking(move || -> Result<Value, DataError> {
            let reader = BufReader::new(File::open(&path)?);
            Ok(serde_json::from_reader(reader)?)
        })
        .await??;

        tracing::info!("Loaded fixture dataset {}", name);
        Ok(Self::from_value(name, data))
    }

    /// Answer a document from the dataset
    fn resolve(&self, query: &QueryDocument) -> Result<Value, DataError> {
        let variable = |name: &str| {
            query.variables().get(name).and_then(Value::as_str).ok_or_else(|| {
                DataError::GraphQl(vec![format!("variable '${}' is not bound", name)])
            })
        };

        match query.operation() {
            "CountryDetail" => {
                let name = variable("name")?;
                let country = find_by(&self.data, "countries", "name", name)
                    .or_else(|| {
                        self.data
                            .get("country")
                            .filter(|c| c.get("name").and_then(Value::as_str) == Some(name))
                    })
                    .cloned()
                    .ok_or_else(|| DataError::GraphQl(vec![format!("Country '{}' not found", name)]))?;
                Ok(json!({ "country": country }))
            }
            "DistrictDetail" => {
                let state = variable("stateName")?;
                let district = find_by(&self.data, "districts", "state", state)
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(json!({ "district": district }))
            }
            _ => Ok(self.data.as_ref().clone()),
        }
    }
}

/// Accept either bare roots or a saved `{ "data": ... }` response
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn find_by<'a>(data: &'a Value, list: &str, key: &str, wanted: &str) -> Option<&'a Value> {
    data.get(list)?
        .as_array()?
        .iter()
        .find(|item| item.get(key).and_then(Value::as_str) == Some(wanted))
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("fixture.json")
        .to_string()
}

#[async_trait]
impl StatsTransport for FixtureTransport {
    async fn execute(&self, query: &QueryDocument) -> Result<Value, DataError> {
        tracing::debug!("Fixture {} answering {}", self.name, query.operation());
        self.resolve(query)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
