//! Daily statistics extracted from raw API payloads.
//!
//! An [`Observation`] holds one day's numbers for a single geography node.
//! Only the statistic keys of the raw payload are kept: `source` and
//! anything starting with `today` or `yesterday`. Values get a best-effort
//! numeric coercion with preference order integer > float > text.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Pattern selecting the statistic keys of a raw payload.
///
/// Anchored at the start of the key and case-sensitive, so `source_name`
/// and `today_confirmed` match while `name` and `date` do not.
fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(source|today.*|yesterday.*)").unwrap())
}

/// A single extracted statistic value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Coerces a raw JSON value: exact integer, else float, else text.
    fn coerce(value: &Value) -> FieldValue {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    FieldValue::Integer(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(s.clone())
                }
            }
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float; integers promote.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(_) => None,
        }
    }

    /// The value as text, if it stayed non-numeric.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One day's raw statistics for a single geography node.
///
/// Immutable once built; the owning node keys observations by date and a
/// later payload for the same date replaces the whole record.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    date: NaiveDate,
    fields: BTreeMap<String, FieldValue>,
}

impl Observation {
    /// Builds an observation from a raw payload object.
    ///
    /// The date comes from the payload's `date` field; a payload lacking a
    /// valid ISO-8601 date is a hard error. Keys matching the statistic
    /// filter are extracted and coerced, everything else is ignored.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| Error::Payload("observation payload is not an object".to_string()))?;

        let raw_date = object
            .get("date")
            .and_then(Value::as_str)
            .ok_or(Error::MissingDate)?;
        let date = parse_date(raw_date)?;

        let mut fields = BTreeMap::new();
        for (key, value) in object {
            if field_pattern().is_match(key) {
                fields.insert(key.clone(), FieldValue::coerce(value));
            }
        }

        Ok(Self { date, fields })
    }

    /// The calendar date this observation belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Names of the extracted fields, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterates the extracted fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Looks up an extracted field by name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] if the name was not in the filtered set,
    /// whether absent from the original payload or filtered out.
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.fields.get(name).ok_or_else(|| Error::UnknownField {
            name: name.to_string(),
        })
    }
}

/// Parses an ISO-8601 (`YYYY-MM-DD`) date string.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|source| Error::MalformedDate {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extraction_and_coercion() {
        let payload = json!({
            "date": "2021-01-10",
            "today_confirmed": "42",
            "yesterday_confirmed": "40",
            "source": "ministry"
        });
        let observation = Observation::from_payload(&payload).unwrap();

        assert_eq!(observation.date(), NaiveDate::from_ymd_opt(2021, 1, 10).unwrap());
        assert_eq!(
            observation.get("today_confirmed").unwrap(),
            &FieldValue::Integer(42)
        );
        assert_eq!(
            observation.get("yesterday_confirmed").unwrap(),
            &FieldValue::Integer(40)
        );
        assert_eq!(
            observation.get("source").unwrap(),
            &FieldValue::Text("ministry".to_string())
        );
        assert_eq!(
            observation.attributes(),
            ["source", "today_confirmed", "yesterday_confirmed"]
        );
    }

    #[test]
    fn test_filter_ignores_other_keys() {
        let payload = json!({
            "date": "2021-01-10",
            "id": "lanzarote",
            "name": "Lanzarote",
            "today_confirmed": 42
        });
        let observation = Observation::from_payload(&payload).unwrap();

        assert_eq!(observation.attributes(), ["today_confirmed"]);
        assert!(observation.get("name").is_err());
        assert!(observation.get("date").is_err());
    }

    #[test]
    fn test_filter_is_prefix_anchored() {
        let payload = json!({
            "date": "2021-01-10",
            "source_name": "ministry",
            "yesterday_deaths": 3,
            "not_today": 1
        });
        let observation = Observation::from_payload(&payload).unwrap();

        assert_eq!(observation.attributes(), ["source_name", "yesterday_deaths"]);
    }

    #[test]
    fn test_json_numbers_keep_their_kind() {
        let payload = json!({
            "date": "2021-01-10",
            "today_confirmed": 42,
            "today_vaccinated_percentage": 12.5
        });
        let observation = Observation::from_payload(&payload).unwrap();

        assert_eq!(
            observation.get("today_confirmed").unwrap(),
            &FieldValue::Integer(42)
        );
        assert_eq!(
            observation.get("today_vaccinated_percentage").unwrap(),
            &FieldValue::Float(12.5)
        );
    }

    #[test]
    fn test_string_float_coercion() {
        let payload = json!({"date": "2021-01-10", "today_death_rate": "1.75"});
        let observation = Observation::from_payload(&payload).unwrap();

        assert_eq!(
            observation.get("today_death_rate").unwrap(),
            &FieldValue::Float(1.75)
        );
    }

    #[test]
    fn test_unknown_field_error() {
        let payload = json!({"date": "2021-01-10", "today_confirmed": 42});
        let observation = Observation::from_payload(&payload).unwrap();

        let result = observation.get("today_deaths");
        match result {
            Err(Error::UnknownField { name }) => assert_eq!(name, "today_deaths"),
            other => panic!("Expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_date_is_fatal() {
        let payload = json!({"today_confirmed": 42});
        let result = Observation::from_payload(&payload);
        assert!(matches!(result, Err(Error::MissingDate)));
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let payload = json!({"date": "10/01/2021", "today_confirmed": 42});
        let result = Observation::from_payload(&payload);
        assert!(matches!(result, Err(Error::MalformedDate { .. })));
    }

    #[test]
    fn test_non_object_payload() {
        let result = Observation::from_payload(&json!([1, 2, 3]));
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Integer(42).as_i64(), Some(42));
        assert_eq!(FieldValue::Integer(42).as_f64(), Some(42.0));
        assert_eq!(FieldValue::Float(1.5).as_i64(), None);
        assert_eq!(FieldValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::Text("x".to_string()).as_f64(), None);
        assert_eq!(FieldValue::Text("x".to_string()).as_str(), Some("x"));
    }

    proptest! {
        #[test]
        fn prop_integer_strings_coerce_to_integers(n in any::<i64>()) {
            let payload = json!({"date": "2021-01-10", "today_confirmed": n.to_string()});
            let observation = Observation::from_payload(&payload).unwrap();
            prop_assert_eq!(
                observation.get("today_confirmed").unwrap(),
                &FieldValue::Integer(n)
            );
        }

        #[test]
        fn prop_fractional_strings_coerce_to_floats(f in -1e9f64..1e9f64) {
            prop_assume!(f.fract() != 0.0);
            let payload = json!({"date": "2021-01-10", "today_rate": f.to_string()});
            let observation = Observation::from_payload(&payload).unwrap();
            prop_assert_eq!(observation.get("today_rate").unwrap(), &FieldValue::Float(f));
        }

        #[test]
        fn prop_non_numeric_strings_stay_text(s in "[a-z ]{1,20}") {
            prop_assume!(s.trim().parse::<f64>().is_err());
            let payload = json!({"date": "2021-01-10", "source": s.clone()});
            let observation = Observation::from_payload(&payload).unwrap();
            prop_assert_eq!(observation.get("source").unwrap(), &FieldValue::Text(s));
        }
    }
}
