//! Endpoint URL construction for the Covid19Tracking REST API.
//!
//! All six endpoints are simple templates over the base URL. Geography
//! listings live under `/countries`, data ranges under `/country`, with
//! ISO-8601 (`YYYY-MM-DD`) date query parameters.

use chrono::NaiveDate;

/// Base URL of the public API.
pub const DEFAULT_BASE_URL: &str = "https://api.covid19tracking.narrativa.com/api";

/// Renders the templated endpoint URLs against a base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Creates an endpoint table. Trailing slashes on the base are trimmed.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// `GET /countries` for the country listing.
    pub fn countries(&self) -> String {
        format!("{}/countries", self.base)
    }

    /// `GET /countries/{country}/regions` for the region listing.
    pub fn regions(&self, country: &str) -> String {
        format!("{}/countries/{}/regions", self.base, country)
    }

    /// `GET /countries/{country}/regions/{region}/sub_regions` for the subregion listing.
    pub fn sub_regions(&self, country: &str, region: &str) -> String {
        format!(
            "{}/countries/{}/regions/{}/sub_regions",
            self.base, country, region
        )
    }

    /// `GET /country/{country}?date_from=..&date_to=..` for a country data range.
    pub fn country_data(&self, country: &str, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "{}/country/{}?date_from={}&date_to={}",
            self.base, country, from, to
        )
    }

    /// `GET /country/{country}/region/{region}?date_from=..&date_to=..` for a region data range.
    pub fn region_data(
        &self,
        country: &str,
        region: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> String {
        format!(
            "{}/country/{}/region/{}?date_from={}&date_to={}",
            self.base, country, region, from, to
        )
    }

    /// `GET /country/{country}/region/{region}/sub_region/{subregion}?date_from=..&date_to=..`
    /// for a subregion data range.
    pub fn sub_region_data(
        &self,
        country: &str,
        region: &str,
        subregion: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> String {
        format!(
            "{}/country/{}/region/{}/sub_region/{}?date_from={}&date_to={}",
            self.base, country, region, subregion, from, to
        )
    }
}
