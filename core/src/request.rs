//! Query building for the three endpoints. No I/O happens here.

use crate::date::{format_date, DateArg};
use crate::error::ApiError;
use crate::registry::{resolve_country, resolve_endpoint, CountryArg, EndpointArg};

/// The endpoint path and its query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointQuery {
    pub path: &'static str,
    pub params: Vec<(String, String)>,
}

/// Resolve `country`/`endpoint` and assemble the query.
///
/// `start` and `end` are sent only when both are supplied. A lone bound is
/// dropped without being validated.
pub fn build_request(
    country: impl Into<CountryArg>,
    endpoint: impl Into<EndpointArg>,
    start: Option<DateArg>,
    end: Option<DateArg>,
) -> Result<EndpointQuery, ApiError> {
    let country = resolve_country(country)?;
    let endpoint = resolve_endpoint(endpoint)?;

    let mut params = vec![("country".to_string(), country.code().to_string())];

    let start = start.filter(|d| !d.is_blank());
    let end = end.filter(|d| !d.is_blank());
    match (start, end) {
        (Some(start), Some(end)) => {
            params.push(("start".to_string(), format_date(start)?));
            params.push(("end".to_string(), format_date(end)?));
        }
        (None, None) => {}
        (start, end) => {
            tracing::debug!(
                endpoint = %endpoint,
                has_start = start.is_some(),
                has_end = end.is_some(),
                "partial date range dropped"
            );
        }
    }

    Ok(EndpointQuery {
        path: endpoint.path(),
        params,
    })
}
