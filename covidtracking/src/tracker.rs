//! Registry and entry point: the lazily-built country tree plus all
//! remote fetch operations.
//!
//! Every fetch issues one blocking GET, parses the JSON body and routes
//! it through one of the two dispatchers, which walk the payload creating
//! or updating nodes as needed. The fetch then returns the node's full
//! accumulated view, never just the newly fetched slice.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::client::{HttpClient, ReqwestClient};
use crate::config::Config;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::geography::{descriptor_id, Country};
use crate::observation::{parse_date, Observation};

/// Top-level client over the Covid19Tracking API.
///
/// Owns the HTTP client, the endpoint table and the country map. This is
/// the single fan-in/fan-out point: all levels route their payloads
/// through [`update_from_data`](Tracker::update_from_data) and
/// [`update_from_geography`](Tracker::update_from_geography).
pub struct Tracker<C: HttpClient = ReqwestClient> {
    client: C,
    endpoints: Endpoints,
    countries: BTreeMap<String, Country>,
}

impl Tracker<ReqwestClient> {
    /// Creates a tracker against the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Creates a tracker from a configuration.
    pub fn with_config(config: &Config) -> Result<Self> {
        let client = ReqwestClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(client, Endpoints::new(config.base_url.clone())))
    }
}

impl<C: HttpClient> Tracker<C> {
    /// Creates a tracker with an injected HTTP client.
    pub fn with_client(client: C, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            countries: BTreeMap::new(),
        }
    }

    /// Looks up a country, creating it empty if absent. Never fails.
    pub fn country(&mut self, id: &str) -> &mut Country {
        self.countries
            .entry(id.to_string())
            .or_insert_with(|| Country::new(id))
    }

    /// Looks up a country without creating it.
    pub fn get_country(&self, id: &str) -> Option<&Country> {
        self.countries.get(id)
    }

    /// Known country identifiers.
    pub fn country_ids(&self) -> Vec<&str> {
        self.countries.keys().map(String::as_str).collect()
    }

    /// Applies a multi-date, multi-country data response.
    ///
    /// Walks `payload["dates"]`, skipping the reserved `info` entry of
    /// each day, and dispatches every country entry by its `id` field.
    /// A date key that fails ISO-8601 parsing is a hard error.
    pub fn update_from_data(&mut self, payload: &Value) -> Result<()> {
        let dates = payload
            .get("dates")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::Payload("data response has no dates object".to_string()))?;

        for (raw_date, day) in dates {
            let date = parse_date(raw_date)?;
            let countries = day
                .get("countries")
                .and_then(Value::as_object)
                .ok_or_else(|| {
                    Error::Payload(format!("day {} has no countries object", raw_date))
                })?;

            for (key, entry) in countries {
                if key == "info" {
                    continue;
                }
                let id = descriptor_id(entry, "country")?;
                self.country(id).update_from_data(date, entry)?;
            }
        }
        Ok(())
    }

    /// Applies a geography listing: an array whose elements map country
    /// ids to region descriptors, each dispatched to the named country.
    pub fn update_from_geography(&mut self, payload: &Value) -> Result<()> {
        let elements = payload
            .as_array()
            .ok_or_else(|| Error::Payload("geography response is not an array".to_string()))?;

        for element in elements {
            let entries = element
                .as_object()
                .ok_or_else(|| Error::Payload("geography entry is not an object".to_string()))?;
            for (country_id, descriptor) in entries {
                self.country(country_id).update_from_geography(descriptor)?;
            }
        }
        Ok(())
    }

    /// Fetches the country listing, merges it into the tree and returns
    /// the known country ids.
    pub fn countries(&mut self) -> Result<Vec<String>> {
        let payload = self.fetch_json(&self.endpoints.countries())?;
        self.apply_geography_response(payload)?;
        Ok(self.countries.keys().cloned().collect())
    }

    /// Fetches a country's region listing and returns its known region ids.
    pub fn regions(&mut self, country_id: &str) -> Result<Vec<String>> {
        let payload = self.fetch_json(&self.endpoints.regions(country_id))?;
        self.apply_geography_response(payload)?;
        Ok(self
            .country(country_id)
            .region_ids()
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Fetches a region's subregion listing and returns its known
    /// subregion ids.
    pub fn sub_regions(&mut self, country_id: &str, region_id: &str) -> Result<Vec<String>> {
        let payload = self.fetch_json(&self.endpoints.sub_regions(country_id, region_id))?;
        self.apply_geography_response(payload)?;
        Ok(self
            .country(country_id)
            .region(region_id)
            .subregion_ids()
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Fetches country-level data for a date range and returns the
    /// country's full accumulated map.
    pub fn country_data(
        &mut self,
        country_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<&BTreeMap<NaiveDate, Observation>> {
        let payload = self.fetch_json(&self.endpoints.country_data(country_id, from, to))?;
        self.update_from_data(&payload)?;
        Ok(self.country(country_id).data())
    }

    /// Fetches region-level data for a date range and returns the
    /// region's full accumulated map.
    pub fn region_data(
        &mut self,
        country_id: &str,
        region_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<&BTreeMap<NaiveDate, Observation>> {
        let payload =
            self.fetch_json(&self.endpoints.region_data(country_id, region_id, from, to))?;
        self.update_from_data(&payload)?;
        Ok(self.country(country_id).region(region_id).data())
    }

    /// Fetches a single day of subregion data (`date_from == date_to`)
    /// and returns the subregion's full accumulated map, previously
    /// cached dates included.
    pub fn sub_region_data(
        &mut self,
        country_id: &str,
        region_id: &str,
        subregion_id: &str,
        from: NaiveDate,
    ) -> Result<&BTreeMap<NaiveDate, Observation>> {
        let url = self
            .endpoints
            .sub_region_data(country_id, region_id, subregion_id, from, from);
        let payload = self.fetch_json(&url)?;
        self.update_from_data(&payload)?;
        Ok(self
            .country(country_id)
            .region(region_id)
            .subregion(subregion_id)
            .data())
    }

    fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!(url = %url, "Fetching");
        let body = self.client.get(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Unwraps the `{"countries": [...]}` envelope of geography responses
    /// and dispatches the bare listing. A bare array is accepted as-is.
    fn apply_geography_response(&mut self, mut payload: Value) -> Result<()> {
        let listing = match payload.get_mut("countries") {
            Some(inner) => inner.take(),
            None => payload,
        };
        self.update_from_geography(&listing)
    }
}
