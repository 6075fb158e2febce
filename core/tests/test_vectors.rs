//! Verify request building and normalization against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Inputs are fed through the untyped (`serde_json::Value`) entry points so
//! the vectors can also describe wrong-kind arguments.

use chrono::{DateTime, Utc};
use energy_charts_core::{build_request, normalize, ApiError, DateArg};
use serde_json::Value;

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidArgument(_) => "InvalidArgument",
        ApiError::UnknownCountry(_) => "UnknownCountry",
        ApiError::UnknownEndpoint(_) => "UnknownEndpoint",
        ApiError::InvalidDate(_) => "InvalidDate",
        ApiError::EmptyResponse => "EmptyResponse",
        ApiError::MissingTimeIndex => "MissingTimeIndex",
        ApiError::InvalidTimestamp(_) => "InvalidTimestamp",
        ApiError::MalformedResponse(_) => "MalformedResponse",
        ApiError::LengthMismatch { .. } => "LengthMismatch",
    }
}

fn optional_date(value: &Value) -> Option<DateArg> {
    if value.is_null() {
        None
    } else {
        Some(DateArg::from(value))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = build_request(
            &case["country"],
            &case["endpoint"],
            optional_date(&case["start"]),
            optional_date(&case["end"]),
        );

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(name);
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}: error");
            continue;
        }

        let query = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        let expected = &case["expected_request"];
        assert_eq!(query.path, expected["path"].as_str().unwrap(), "{name}: path");

        let expected_params: Vec<(String, String)> = expected["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| {
                let pair = p.as_array().unwrap();
                (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(query.params, expected_params, "{name}: params");
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = normalize(&case["response"]);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(name);
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}: error");
            continue;
        }

        let table = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        let expected = &case["expected"];

        let expected_index: Vec<DateTime<Utc>> = expected["index"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap().parse().unwrap())
            .collect();
        assert_eq!(table.index(), expected_index.as_slice(), "{name}: index");

        let expected_columns = expected["columns"].as_array().unwrap();
        assert_eq!(table.num_columns(), expected_columns.len(), "{name}: column count");
        for (column, expected) in table.columns().iter().zip(expected_columns) {
            assert_eq!(column.name, expected[0].as_str().unwrap(), "{name}: column order");
            let values: Vec<Option<f64>> = expected[1]
                .as_array()
                .unwrap()
                .iter()
                .map(Value::as_f64)
                .collect();
            assert_eq!(column.values, values, "{name}: values of {}", column.name);
            assert_eq!(column.values.len(), table.num_rows(), "{name}: column length");
        }
    }
}
