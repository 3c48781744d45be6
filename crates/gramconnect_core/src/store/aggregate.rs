//! Decoding and version coercion of the stored aggregate blob.
//!
//! # Invariants
//! - A blob at `CURRENT_VERSION` is decoded as-is.
//! - Any other version (or a missing one) is coerced by overlaying the
//!   stored top-level fields on the seed aggregate and stamping
//!   `CURRENT_VERSION`. Nested records are not transformed.
//! - Collections decode record by record: one unreadable record is skipped
//!   and listed, it never discards its siblings or the other collections.
//! - A collection absent from a current-version blob decodes as empty.

use crate::model::aggregate::{StorageData, CURRENT_VERSION};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    Current,
    Migrated { from_version: Option<u64> },
}

/// Outcome of decoding a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub data: StorageData,
    pub origin: Origin,
    /// `field[index]: reason` for every entry left out of `data`.
    pub skipped: Vec<String>,
}

/// Fails only when `raw` is not JSON at all.
pub(crate) fn decode_aggregate(raw: &str) -> serde_json::Result<Decoded> {
    let stored: Value = serde_json::from_str(raw)?;
    let from_version = stored.get("version").and_then(Value::as_u64);

    let (fields, origin) = if from_version == Some(u64::from(CURRENT_VERSION)) {
        (object_fields(stored), Origin::Current)
    } else {
        (
            shallow_merge_over_seed(stored)?,
            Origin::Migrated { from_version },
        )
    };

    let mut skipped = Vec::new();
    let data = StorageData {
        complaints: decode_records(&fields, "complaints", &mut skipped),
        reminders: decode_records(&fields, "reminders", &mut skipped),
        notices: decode_records(&fields, "notices", &mut skipped),
        version: CURRENT_VERSION,
    };
    Ok(Decoded {
        data,
        origin,
        skipped,
    })
}

fn object_fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn shallow_merge_over_seed(stored: Value) -> serde_json::Result<Map<String, Value>> {
    let mut merged = object_fields(serde_json::to_value(StorageData::seeded())?);
    // Non-object blobs contribute no fields.
    merged.extend(object_fields(stored));
    merged.insert("version".to_string(), Value::from(CURRENT_VERSION));
    Ok(merged)
}

fn decode_records<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    field: &str,
    skipped: &mut Vec<String>,
) -> Vec<T> {
    let records = match fields.get(field) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(records)) => records,
        Some(other) => {
            skipped.push(format!("{field}: expected an array, found {}", kind_of(other)));
            return Vec::new();
        }
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match T::deserialize(record) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                skipped.push(format!("{field}[{index}]: {err}"));
                None
            }
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
