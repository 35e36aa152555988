//! Mid-level geography node.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geography::{descriptor_id, payload_name, SubRegion};
use crate::observation::Observation;

/// A region, owning its subregions and date-indexed observations.
///
/// The remote sub-region listing fetch lives on
/// [`Tracker::sub_regions`](crate::Tracker::sub_regions).
#[derive(Debug, Clone)]
pub struct Region {
    id: String,
    name: Option<String>,
    subregions: BTreeMap<String, SubRegion>,
    data: BTreeMap<NaiveDate, Observation>,
}

impl Region {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            subregions: BTreeMap::new(),
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

    /// Region-level observations, keyed by date.
    pub fn data(&self) -> &BTreeMap<NaiveDate, Observation> {
        &self.data
    }

    /// Looks up a subregion, creating it empty if absent. Never fails.
    pub fn subregion(&mut self, id: &str) -> &mut SubRegion {
        self.subregions
            .entry(id.to_string())
            .or_insert_with(|| SubRegion::new(id))
    }

    /// Looks up a subregion without creating it.
    pub fn get_subregion(&self, id: &str) -> Option<&SubRegion> {
        self.subregions.get(id)
    }

    /// Known subregion identifiers.
    pub fn subregion_ids(&self) -> Vec<&str> {
        self.subregions.keys().map(String::as_str).collect()
    }

    /// Applies a subregion listing: one descriptor per subregion, each
    /// dispatched to the named child (lazy-creating as needed).
    pub fn update_from_geography(&mut self, payload: &Value) -> Result<()> {
        let descriptors = payload
            .as_array()
            .ok_or_else(|| Error::Payload("subregion listing is not an array".to_string()))?;

        for descriptor in descriptors {
            let id = descriptor_id(descriptor, "subregion")?;
            self.subregion(id).update_from_geography(descriptor);
        }
        Ok(())
    }

    /// Applies a region data payload and cascades into the `sub_regions`
    /// entries, lazy-creating children as needed.
    pub fn update_from_data(&mut self, payload: &Value) -> Result<()> {
        let observation = Observation::from_payload(payload)?;
        self.data.insert(observation.date(), observation);
        if self.name.is_none() {
            self.name = payload_name(payload).map(str::to_string);
        }

        if let Some(entries) = payload.get("sub_regions").and_then(Value::as_array) {
            for entry in entries {
                let id = descriptor_id(entry, "subregion")?;
                self.subregion(id).update_from_data(entry)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_subregion_lookup_is_idempotent() {
        let mut region = Region::new("canarias");
        region.subregion("lanzarote").update_from_geography(&json!({"name": "Lanzarote"}));

        // Second lookup returns the stored instance, not a fresh one.
        assert_eq!(region.subregion("lanzarote").name(), Some("Lanzarote"));
        assert_eq!(region.subregion_ids(), ["lanzarote"]);
    }

    #[test]
    fn test_geography_update_fans_out() {
        let mut region = Region::new("canarias");
        region
            .update_from_geography(&json!([
                {"id": "lanzarote", "name": "Lanzarote"},
                {"id": "tenerife", "name": "Tenerife"}
            ]))
            .unwrap();

        assert_eq!(region.subregion_ids(), ["lanzarote", "tenerife"]);
        assert_eq!(region.get_subregion("tenerife").unwrap().name(), Some("Tenerife"));
    }

    #[test]
    fn test_geography_update_requires_descriptor_id() {
        let mut region = Region::new("canarias");
        let result = region.update_from_geography(&json!([{"name": "Lanzarote"}]));
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[test]
    fn test_geography_update_rejects_non_array() {
        let mut region = Region::new("canarias");
        let result = region.update_from_geography(&json!({"id": "lanzarote"}));
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[test]
    fn test_data_update_cascades_to_subregions() {
        let mut region = Region::new("canarias");
        region
            .update_from_data(&json!({
                "date": "2021-01-10",
                "name": "Canarias",
                "today_confirmed": 100,
                "sub_regions": [
                    {"date": "2021-01-10", "id": "lanzarote", "name": "Lanzarote", "today_confirmed": 42}
                ]
            }))
            .unwrap();

        assert_eq!(region.name(), Some("Canarias"));
        assert_eq!(region.data().len(), 1);

        let subregion = region.get_subregion("lanzarote").unwrap();
        assert_eq!(subregion.name(), Some("Lanzarote"));
        assert_eq!(subregion.data().len(), 1);
    }

    #[test]
    fn test_data_update_without_children_list() {
        let mut region = Region::new("canarias");
        region
            .update_from_data(&json!({"date": "2021-01-10", "today_confirmed": 100}))
            .unwrap();

        assert_eq!(region.data().len(), 1);
        assert!(region.subregion_ids().is_empty());
    }

    #[test]
    fn test_name_not_overwritten_by_data_update() {
        let mut region = Region::new("canarias");
        region
            .update_from_geography(&json!([{"id": "lanzarote"}]))
            .unwrap();
        region.name = Some("Canarias".to_string());

        region
            .update_from_data(&json!({"date": "2021-01-10", "name": "Islas Canarias"}))
            .unwrap();
        assert_eq!(region.name(), Some("Canarias"));
    }
}
