//! Finest geography level.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;
use crate::geography::payload_name;
use crate::observation::Observation;

/// A subregion, owning its date-indexed observations.
///
/// Created empty on first lookup through its [`Region`](crate::Region);
/// geography and data updates populate it. Remote fetches live on
/// [`Tracker::sub_region_data`](crate::Tracker::sub_region_data).
#[derive(Debug, Clone)]
pub struct SubRegion {
    id: String,
    name: Option<String>,
    data: BTreeMap<NaiveDate, Observation>,
}

impl SubRegion {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            data: BTreeMap::new(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name; unset until a fetch supplies one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All accumulated observations, keyed by date.
    pub fn data(&self) -> &BTreeMap<NaiveDate, Observation> {
        &self.data
    }

    /// Dates with a stored observation, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.data.keys().copied().collect()
    }

    /// Applies a geography descriptor. Leaf level: no recursion.
    pub fn update_from_geography(&mut self, payload: &Value) {
        self.set_name_if_unset(payload);
    }

    /// Applies a data payload: stores the observation keyed by its date
    /// (replacing any earlier one for the same date) and sets the name
    /// first-write-wins.
    pub fn update_from_data(&mut self, payload: &Value) -> Result<()> {
        let observation = Observation::from_payload(payload)?;
        self.data.insert(observation.date(), observation);
        self.set_name_if_unset(payload);
        Ok(())
    }

    fn set_name_if_unset(&mut self, payload: &Value) {
        if self.name.is_none() {
            self.name = payload_name(payload).map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_name_is_first_write_wins() {
        let mut subregion = SubRegion::new("lanzarote");
        assert_eq!(subregion.name(), None);

        subregion.update_from_geography(&json!({"id": "lanzarote", "name": "Lanzarote"}));
        assert_eq!(subregion.name(), Some("Lanzarote"));

        subregion.update_from_geography(&json!({"id": "lanzarote", "name": "Renamed"}));
        assert_eq!(subregion.name(), Some("Lanzarote"));
    }

    #[test]
    fn test_data_update_sets_name_if_unset() {
        let mut subregion = SubRegion::new("lanzarote");
        subregion
            .update_from_data(&json!({
                "date": "2021-01-10",
                "name": "Lanzarote",
                "today_confirmed": 42
            }))
            .unwrap();

        assert_eq!(subregion.name(), Some("Lanzarote"));
        assert_eq!(subregion.data().len(), 1);
    }

    #[test]
    fn test_data_accumulates_across_dates() {
        let mut subregion = SubRegion::new("lanzarote");
        subregion
            .update_from_data(&json!({"date": "2021-01-10", "today_confirmed": 42}))
            .unwrap();
        subregion
            .update_from_data(&json!({"date": "2021-01-11", "today_confirmed": 45}))
            .unwrap();

        assert_eq!(
            subregion.dates(),
            [
                NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 11).unwrap()
            ]
        );
    }

    #[test]
    fn test_later_payload_overwrites_same_date() {
        let mut subregion = SubRegion::new("lanzarote");
        subregion
            .update_from_data(&json!({"date": "2021-01-10", "today_confirmed": 42}))
            .unwrap();
        subregion
            .update_from_data(&json!({"date": "2021-01-10", "today_confirmed": 43}))
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2021, 1, 10).unwrap();
        let observation = &subregion.data()[&date];
        assert_eq!(observation.get("today_confirmed").unwrap().as_i64(), Some(43));
    }

    #[test]
    fn test_missing_name_leaves_name_unset() {
        let mut subregion = SubRegion::new("lanzarote");
        subregion
            .update_from_data(&json!({"date": "2021-01-10", "today_confirmed": 42}))
            .unwrap();
        assert_eq!(subregion.name(), None);
    }
}
