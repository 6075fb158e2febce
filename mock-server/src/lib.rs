//! In-process stand-in for `api.energy-charts.info`.
//!
//! Serves canned payloads in the shapes the real API uses so clients can be
//! exercised over real HTTP. Query parameters are echoed back under
//! `request` so tests can see exactly what was sent.
//!
//! - unknown or missing `country` -> 422 with a `detail` message
//! - `country=ru` -> `{}` (the API has no data for it)
//! - `start` without `end` (or the reverse) -> 400

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const KNOWN_COUNTRIES: &[&str] = &[
    "de", "ch", "eu", "all", "al", "am", "at", "az", "ba", "be", "bg", "by", "cy", "cz", "dk",
    "es", "ee", "fi", "fr", "ge", "hr", "gr", "ie", "hu", "it", "lt", "lu", "lv", "md", "mk",
    "me", "mt", "nie", "nl", "no", "pl", "pt", "ro", "rs", "ru", "se", "si", "sk", "tr", "ua",
    "uk", "xk",
];

/// Country the mock answers with an empty payload.
pub const NO_DATA_COUNTRY: &str = "ru";

pub const UNIX_SECONDS: [i64; 2] = [1672531200, 1672534800];

type Params = HashMap<String, String>;
type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    Router::new()
        .route("/public_power", get(public_power))
        .route("/total_power", get(total_power))
        .route("/installed_power", get(installed_power))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn public_power(Query(params): Query<Params>) -> ApiResult {
    let country = check_country(&params)?;
    check_range(&params)?;
    if country == NO_DATA_COUNTRY {
        return Ok(Json(json!({})));
    }
    Ok(Json(json!({
        "unix_seconds": UNIX_SECONDS,
        "production_types": [
            {"name": "Solar", "data": [100.0, 200.0]},
            {"name": "Wind onshore", "data": [300.0, null]},
            {"name": "Load", "data": [scale(country, 50.0), scale(country, 55.0)]}
        ],
        "deprecated": false,
        "request": params,
    })))
}

async fn total_power(Query(params): Query<Params>) -> ApiResult {
    let country = check_country(&params)?;
    check_range(&params)?;
    if country == NO_DATA_COUNTRY {
        return Ok(Json(json!({})));
    }
    Ok(Json(json!({
        "unix_seconds": UNIX_SECONDS,
        "production_types": [
            {"name": "Fossil gas", "data": [12.5, 13.0]},
            {"name": "Solar", "data": [100.0, 200.0]}
        ],
        "deprecated": false,
        "request": params,
    })))
}

async fn installed_power(Query(params): Query<Params>) -> ApiResult {
    let country = check_country(&params)?;
    if country == NO_DATA_COUNTRY {
        return Ok(Json(json!({})));
    }
    Ok(Json(json!({
        "time": ["2002", "2003"],
        "production_types": [
            {"name": "Wind onshore", "data": [12.0, 14.5]},
            {"name": "Solar", "data": [0.296, 0.435]}
        ],
        "last_update": 1700000000,
        "request": params,
    })))
}

fn check_country(params: &Params) -> Result<&str, (StatusCode, Json<Value>)> {
    match params.get("country") {
        Some(code) if KNOWN_COUNTRIES.contains(&code.as_str()) => Ok(code.as_str()),
        Some(code) => Err(unprocessable(format!("unknown country '{code}'"))),
        None => Err(unprocessable("country is required".to_string())),
    }
}

fn check_range(params: &Params) -> Result<(), (StatusCode, Json<Value>)> {
    if params.contains_key("start") != params.contains_key("end") {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "start and end must be given together"})),
        ));
    }
    Ok(())
}

fn unprocessable(detail: String) -> (StatusCode, Json<Value>) {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail })))
}

/// Per-country load so concurrent fetches are distinguishable.
fn scale(country: &str, base: f64) -> f64 {
    let position = KNOWN_COUNTRIES
        .iter()
        .position(|c| *c == country)
        .unwrap_or(0);
    base + position as f64
}
