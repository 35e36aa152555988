//! Geography node hierarchy: Country → Region → SubRegion.
//!
//! Each node is identified by a stable id, optionally named, and owns
//! date-indexed observations; Country and Region also own their child
//! maps. Lookup is lazy-create-or-return: indexing by id never fails, an
//! absent child is created empty. Display names are first-write-wins.

mod country;
mod region;
mod subregion;

pub use country::Country;
pub use region::Region;
pub use subregion::SubRegion;

use serde_json::Value;

use crate::error::{Error, Result};

/// Extracts the display name of a payload, if any.
pub(crate) fn payload_name(payload: &Value) -> Option<&str> {
    payload.get("name").and_then(Value::as_str)
}

/// Extracts the mandatory `id` of a child descriptor.
pub(crate) fn descriptor_id<'a>(descriptor: &'a Value, level: &'static str) -> Result<&'a str> {
    descriptor
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Payload(format!("{} descriptor has no id", level)))
}
