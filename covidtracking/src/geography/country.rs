//! Top geography node.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geography::{descriptor_id, payload_name, Region};
use crate::observation::Observation;

/// A country, owning its regions and date-indexed observations.
///
/// Same shape as [`Region`] one level up. Remote fetches live on the
/// [`Tracker`](crate::Tracker).
#[derive(Debug, Clone)]
pub struct Country {
    id: String,
    name: Option<String>,
    regions: BTreeMap<String, Region>,
    data: BTreeMap<NaiveDate, Observation>,
}

impl Country {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            regions: BTreeMap::new(),
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

    /// Country-level observations, keyed by date.
    pub fn data(&self) -> &BTreeMap<NaiveDate, Observation> {
        &self.data
    }

    /// Looks up a region, creating it empty if absent. Never fails.
    pub fn region(&mut self, id: &str) -> &mut Region {
        self.regions
            .entry(id.to_string())
            .or_insert_with(|| Region::new(id))
    }

    /// Looks up a region without creating it.
    pub fn get_region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Known region identifiers.
    pub fn region_ids(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    /// Applies a region listing: an object mapping region ids to
    /// descriptors, each dispatched to the named child.
    pub fn update_from_geography(&mut self, payload: &Value) -> Result<()> {
        let entries = payload
            .as_object()
            .ok_or_else(|| Error::Payload("region listing is not an object".to_string()))?;

        for (region_id, descriptor) in entries {
            self.region(region_id).update_from_geography(descriptor)?;
        }
        Ok(())
    }

    /// Applies a country data payload for one response day and cascades
    /// into the `regions` entries.
    ///
    /// The stored observation is keyed by the payload's own `date` field;
    /// `date` is the response-level day the registry resolved.
    pub fn update_from_data(&mut self, date: NaiveDate, payload: &Value) -> Result<()> {
        let observation = Observation::from_payload(payload)?;
        if observation.date() != date {
            debug!(
                country = %self.id,
                response_date = %date,
                payload_date = %observation.date(),
                "Response date differs from payload date"
            );
        }
        self.data.insert(observation.date(), observation);
        if self.name.is_none() {
            self.name = payload_name(payload).map(str::to_string);
        }

        if let Some(entries) = payload.get("regions").and_then(Value::as_array) {
            for entry in entries {
                let id = descriptor_id(entry, "region")?;
                self.region(id).update_from_data(entry)?;
            }
        }
        Ok(())
    }
}
