//! Turns an energy-charts JSON payload into a `Table`.
//!
//! Payloads carry a time index under `unix_seconds` (epoch seconds) or
//! `time` (date strings), and series under any of:
//! - `forecast_values` + `production_type`: one flat series with its name
//! - `data`: one flat unnamed series, stored as `frequency`
//! - `production_types` / `countries`: lists of `{name, data}` objects
//!
//! Every series must have exactly one value per index entry.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::date::parse_timestamp;
use crate::error::ApiError;
use crate::registry::json_kind;
use crate::table::Table;

const UNIX_SECONDS: &str = "unix_seconds";
const TIME: &str = "time";
const FORECAST_VALUES: &str = "forecast_values";
const PRODUCTION_TYPE: &str = "production_type";
const DATA: &str = "data";
const FREQUENCY_COLUMN: &str = "frequency";
const SERIES_LISTS: [&str; 2] = ["production_types", "countries"];

/// Normalize a raw response.
///
/// Fails with `EmptyResponse` on `null` or an empty object/array, and with
/// `MissingTimeIndex` when neither time field is present.
pub fn normalize(raw: &Value) -> Result<Table, ApiError> {
    let data = match raw {
        Value::Null => return Err(ApiError::EmptyResponse),
        Value::Object(map) if map.is_empty() => return Err(ApiError::EmptyResponse),
        Value::Array(items) if items.is_empty() => return Err(ApiError::EmptyResponse),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            )))
        }
    };

    let mut table = Table::new(time_index(data)?);
    let rows = table.num_rows();

    if let Some(values) = data.get(FORECAST_VALUES) {
        let name = data
            .get(PRODUCTION_TYPE)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::MalformedResponse(format!(
                    "'{FORECAST_VALUES}' without a '{PRODUCTION_TYPE}' name"
                ))
            })?;
        table.insert_column(name, series(name, values, rows)?);
    } else if let Some(values) = data.get(DATA) {
        table.insert_column(FREQUENCY_COLUMN, series(FREQUENCY_COLUMN, values, rows)?);
    }

    for key in SERIES_LISTS {
        let Some(entries) = data.get(key) else {
            continue;
        };
        let entries = entries.as_array().ok_or_else(|| {
            ApiError::MalformedResponse(format!("'{key}' is {}, not an array", json_kind(entries)))
        })?;
        for entry in entries {
            let name = entry.get("name").and_then(Value::as_str).ok_or_else(|| {
                ApiError::MalformedResponse(format!("entry in '{key}' has no string 'name'"))
            })?;
            let values = entry.get(DATA).ok_or_else(|| {
                ApiError::MalformedResponse(format!("entry '{name}' in '{key}' has no 'data'"))
            })?;
            table.insert_column(name, series(name, values, rows)?);
        }
    }

    Ok(table)
}

fn time_index(data: &Map<String, Value>) -> Result<Vec<DateTime<Utc>>, ApiError> {
    if let Some(seconds) = data.get(UNIX_SECONDS) {
        array(UNIX_SECONDS, seconds)?
            .iter()
            .map(epoch_seconds)
            .collect()
    } else if let Some(times) = data.get(TIME) {
        array(TIME, times)?
            .iter()
            .map(|t| {
                t.as_str()
                    .and_then(parse_timestamp)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or_else(|| ApiError::InvalidTimestamp(t.to_string()))
            })
            .collect()
    } else {
        Err(ApiError::MissingTimeIndex)
    }
}

fn epoch_seconds(value: &Value) -> Result<DateTime<Utc>, ApiError> {
    let ts = if let Some(secs) = value.as_i64() {
        Utc.timestamp_opt(secs, 0).single()
    } else if let Some(secs) = value.as_f64().filter(|s| s.is_finite()) {
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round() as u32;
        Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single()
    } else {
        None
    };
    ts.ok_or_else(|| ApiError::InvalidTimestamp(value.to_string()))
}

fn series(name: &str, values: &Value, rows: usize) -> Result<Vec<Option<f64>>, ApiError> {
    let values = array(name, values)?;
    if values.len() != rows {
        return Err(ApiError::LengthMismatch {
            column: name.to_string(),
            expected: rows,
            found: values.len(),
        });
    }
    values
        .iter()
        .map(|v| match v {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(ApiError::MalformedResponse(format!(
                "series '{name}' contains {}",
                json_kind(other)
            ))),
        })
        .collect()
}

fn array<'a>(field: &str, value: &'a Value) -> Result<&'a Vec<Value>, ApiError> {
    value.as_array().ok_or_else(|| {
        ApiError::MalformedResponse(format!("'{field}' is {}, not an array", json_kind(value)))
    })
}
