//! CLI command implementations.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use covidtracking::{Observation, Tracker};

use crate::error::CliError;

/// List known country ids after a listing fetch.
pub fn countries(tracker: &mut Tracker) -> Result<(), CliError> {
    print_ids(&tracker.countries()?);
    Ok(())
}

/// List a country's region ids after a listing fetch.
pub fn regions(tracker: &mut Tracker, country: &str) -> Result<(), CliError> {
    print_ids(&tracker.regions(country)?);
    Ok(())
}

/// List a region's subregion ids after a listing fetch.
pub fn sub_regions(tracker: &mut Tracker, country: &str, region: &str) -> Result<(), CliError> {
    print_ids(&tracker.sub_regions(country, region)?);
    Ok(())
}

/// Fetch and print observations at the chosen geography level.
///
/// Country and region level take a date range; subregion level uses the
/// single-day contract.
pub fn data(
    tracker: &mut Tracker,
    country: &str,
    region: Option<&str>,
    sub_region: Option<&str>,
    date_from: NaiveDate,
    date_to: Option<NaiveDate>,
    json: bool,
) -> Result<(), CliError> {
    let date_to = date_to.unwrap_or(date_from);

    let data = match (region, sub_region) {
        (Some(region), Some(sub_region)) => {
            tracker.sub_region_data(country, region, sub_region, date_from)?
        }
        (Some(region), None) => tracker.region_data(country, region, date_from, date_to)?,
        (None, None) => tracker.country_data(country, date_from, date_to)?,
        (None, Some(_)) => {
            return Err(CliError::Usage(
                "a subregion requires its region".to_string(),
            ))
        }
    };

    print_observations(data, json)
}

/// Print the confirmed-case delta for a subregion on one day.
pub fn new_cases(
    tracker: &mut Tracker,
    country: &str,
    region: &str,
    sub_region: &str,
    date: Option<NaiveDate>,
) -> Result<(), CliError> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let data = tracker.sub_region_data(country, region, sub_region, date)?;

    for (day, observation) in data {
        let today = observation.get("today_confirmed")?;
        let yesterday = observation.get("yesterday_confirmed")?;
        match (today.as_f64(), yesterday.as_f64()) {
            (Some(today), Some(yesterday)) => {
                println!("{day}: {} new confirmed cases", today - yesterday);
            }
            _ => println!("{day}: confirmed counts unavailable"),
        }
    }
    Ok(())
}

fn print_ids(ids: &[String]) {
    for id in ids {
        println!("{id}");
    }
}

fn print_observations(
    data: &BTreeMap<NaiveDate, Observation>,
    json: bool,
) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    for (day, observation) in data {
        let fields = observation
            .fields()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{day} {fields}");
    }
    Ok(())
}
