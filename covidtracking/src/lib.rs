//! Client library for the Narrativa COVID-19 tracking REST API.
//!
//! Exposes a navigable hierarchy of [`Country`] → [`Region`] → [`SubRegion`]
//! nodes rooted in a [`Tracker`]. Nodes are created lazily on lookup and
//! populated on demand: each fetch operation issues one blocking HTTP
//! request, parses the JSON response and merges it into the tree. Daily
//! statistics are stored as date-indexed [`Observation`]s on every node.
//!
//! # Quick example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use covidtracking::Tracker;
//!
//! # fn main() -> covidtracking::Result<()> {
//! let mut tracker = Tracker::new()?;
//!
//! // Discover the subregions of a region, then fetch one day of data.
//! tracker.sub_regions("spain", "canarias")?;
//! let date = NaiveDate::from_ymd_opt(2021, 1, 10).unwrap();
//! let data = tracker.sub_region_data("spain", "canarias", "lanzarote", date)?;
//!
//! for (day, observation) in data {
//!     let today = observation.get("today_confirmed")?.as_f64().unwrap_or(0.0);
//!     let yesterday = observation.get("yesterday_confirmed")?.as_f64().unwrap_or(0.0);
//!     println!("{day}: {} new confirmed cases", today - yesterday);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod geography;
pub mod logging;
pub mod observation;
pub mod tracker;

pub use client::{HttpClient, HttpError, ReqwestClient};
pub use config::Config;
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use geography::{Country, Region, SubRegion};
pub use observation::{FieldValue, Observation};
pub use tracker::Tracker;
