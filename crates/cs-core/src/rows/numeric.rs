//! Numeric coercion policy for count fields that may arrive as strings

use serde::{Serialize, Deserialize};
use serde_json::Value;

/// What to do with a count that is missing or does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidNumber {
    /// Store 0 and flag the field on the row
    #[default]
    Zero,
    /// Store NaN and let it reach the table and chart
    Propagate,
    /// Drop the whole row
    HideRow,
}

/// Numeric coercion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericPolicy {
    /// Handling of invalid values
    pub on_invalid: InvalidNumber,

    /// String values treated as missing
    pub missing_patterns: Vec<String>,

    /// Whether to trim whitespace before parsing
    pub trim_whitespace: bool,
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            on_invalid: InvalidNumber::default(),
            missing_patterns: vec![
                String::new(),
                "-".to_string(),
                "N/A".to_string(),
                "null".to_string(),
            ],
            trim_whitespace: true,
        }
    }
}

impl NumericPolicy {
    pub fn with_on_invalid(mut self, on_invalid: InvalidNumber) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    /// Check if a raw string counts as missing (case-insensitive)
    pub fn is_missing(&self, raw: &str) -> bool {
        let raw = if self.trim_whitespace { raw.trim() } else { raw };
        self.missing_patterns
            .iter()
            .any(|pattern| raw.eq_ignore_ascii_case(pattern))
    }

    /// Parse a JSON number or numeric string; `None` when invalid
    pub fn parse(&self, value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                if self.is_missing(s) {
                    return None;
                }
                let s = if self.trim_whitespace { s.trim() } else { s.as_str() };
                s.parse::<f64>().ok()
            }
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// Value stored in place of an invalid count
    pub fn fallback(&self) -> f64 {
        match self.on_invalid {
            InvalidNumber::Propagate => f64::NAN,
            InvalidNumber::Zero | InvalidNumber::HideRow => 0.0,
        }
    }

    /// Parse, falling back per policy. Never hides anything.
    pub fn value_or_fallback(&self, value: &Value) -> f64 {
        self.parse(value).unwrap_or_else(|| self.fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings() {
        let policy = NumericPolicy::default();
        assert_eq!(policy.parse(&json!(12)), Some(12.0));
        assert_eq!(policy.parse(&json!("12")), Some(12.0));
        assert_eq!(policy.parse(&json!(" 7.5 ")), Some(7.5));
        assert_eq!(policy.parse(&json!("12abc")), None);
        assert_eq!(policy.parse(&json!("NaN")), None);
        assert_eq!(policy.parse(&Value::Null), None);
    }

    #[test]
    fn test_missing_patterns() {
        let policy = NumericPolicy::default();
        assert!(policy.is_missing(""));
        assert!(policy.is_missing(" n/a "));
        assert!(policy.is_missing("NULL"));
        assert!(!policy.is_missing("0"));
    }

    #[test]
    fn test_fallback_per_policy() {
        let zero = NumericPolicy::default();
        assert_eq!(zero.value_or_fallback(&json!("-")), 0.0);

        let propagate = NumericPolicy::default().with_on_invalid(InvalidNumber::Propagate);
        assert!(propagate.value_or_fallback(&json!("oops")).is_nan());
    }

    #[test]
    fn test_policy_from_partial_json() {
        let policy: NumericPolicy = serde_json::from_value(json!({ "on_invalid": "hide_row" })).unwrap();
        assert_eq!(policy.on_invalid, InvalidNumber::HideRow);
        assert!(policy.trim_whitespace);
        assert!(policy.is_missing("-"));
    }
}
