//! Parser facade over the energy-charts API.
//!
//! # Design
//! Request building and normalization are pure functions. This module only
//! composes them with a transport, once for blocking calls and once for
//! async calls, and applies the failure policy:
//! - bad identifiers, bad dates and malformed payloads are returned as
//!   `ApiError`;
//! - transport failures are logged and produce `Table::empty()`, so a caller
//!   looping over many countries keeps going.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::date::{self, DateArg};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize;
use crate::registry::{self, Country, CountryArg, Endpoint, EndpointArg};
use crate::request;
use crate::table::Table;
use crate::transport::{AsyncTransport, HttpTransport, Transport};

/// Operations every energy data source offers.
pub trait EnergyDataParser {
    fn resolve_country(&self, country: CountryArg) -> Result<Country, ApiError>;

    fn format_date(&self, date: DateArg) -> Result<String, ApiError>;

    fn normalize(&self, raw: &Value) -> Result<Table, ApiError>;

    fn fetch_generation(
        &self,
        country: CountryArg,
        start: DateArg,
        end: DateArg,
    ) -> Result<Table, ApiError>;
}

/// Client for `api.energy-charts.info`, generic over its transport.
#[derive(Debug, Clone)]
pub struct EnergyChartsParser<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl EnergyChartsParser<HttpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl Default for EnergyChartsParser<HttpTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T> EnergyChartsParser<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the full request for `endpoint` without sending it.
    pub fn build_request(
        &self,
        country: impl Into<CountryArg>,
        endpoint: impl Into<EndpointArg>,
        start: Option<DateArg>,
        end: Option<DateArg>,
    ) -> Result<HttpRequest, ApiError> {
        let query = request::build_request(country, endpoint, start, end)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{}", self.config.base_url, query.path),
            path: query.path,
            params: query.params,
        })
    }

    fn tabulate(
        &self,
        request: &HttpRequest,
        result: Result<Value, TransportError>,
    ) -> Result<Table, ApiError> {
        let raw = match result {
            Ok(raw) => raw,
            Err(TransportError::Status { status, body }) => {
                error!(url = %request.url, status, %body, "request failed");
                return Ok(Table::empty());
            }
            Err(e) => {
                error!(url = %request.url, error = %e, "request failed");
                return Ok(Table::empty());
            }
        };

        if is_blank(&raw) {
            warn!(url = %request.url, "API returned no data");
            return Ok(Table::empty());
        }

        let table = normalize::normalize(&raw)?;
        info!(
            path = request.path,
            rows = table.num_rows(),
            columns = table.num_columns(),
            "normalized response"
        );
        Ok(table)
    }
}

impl<T: Transport> EnergyChartsParser<T> {
    /// Blocking fetch of any endpoint.
    pub fn fetch(
        &self,
        country: impl Into<CountryArg>,
        endpoint: impl Into<EndpointArg>,
        start: Option<DateArg>,
        end: Option<DateArg>,
    ) -> Result<Table, ApiError> {
        let request = self.build_request(country, endpoint, start, end)?;
        debug!(url = %request.url, params = ?request.params, "querying API");
        let result = self.transport.get_json(&request.url, &request.params);
        self.tabulate(&request, result)
    }

    pub fn fetch_generation(
        &self,
        country: impl Into<CountryArg>,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Table, ApiError> {
        let country = registry::resolve_country(country)?;
        let (start, end) = required_range(start.into(), end.into())?;
        self.fetch(country, Endpoint::Generation, start, end)
    }

    pub fn fetch_total_power(
        &self,
        country: impl Into<CountryArg>,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Table, ApiError> {
        let country = registry::resolve_country(country)?;
        let (start, end) = required_range(start.into(), end.into())?;
        self.fetch(country, Endpoint::TotalPower, start, end)
    }

    /// Installed capacity is a snapshot; no date range is sent.
    pub fn fetch_installed_power(
        &self,
        country: impl Into<CountryArg>,
    ) -> Result<Table, ApiError> {
        self.fetch(country, Endpoint::InstalledPower, None, None)
    }
}

impl<T: AsyncTransport> EnergyChartsParser<T> {
    /// Non-blocking fetch of any endpoint.
    pub async fn fetch_async(
        &self,
        country: impl Into<CountryArg>,
        endpoint: impl Into<EndpointArg>,
        start: Option<DateArg>,
        end: Option<DateArg>,
    ) -> Result<Table, ApiError> {
        let request = self.build_request(country, endpoint, start, end)?;
        self.send_async(&request).await
    }

    pub async fn fetch_generation_async(
        &self,
        country: impl Into<CountryArg>,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Table, ApiError> {
        let country = registry::resolve_country(country)?;
        let (start, end) = required_range(start.into(), end.into())?;
        self.fetch_async(country, Endpoint::Generation, start, end)
            .await
    }

    pub async fn fetch_total_power_async(
        &self,
        country: impl Into<CountryArg>,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Table, ApiError> {
        let country = registry::resolve_country(country)?;
        let (start, end) = required_range(start.into(), end.into())?;
        self.fetch_async(country, Endpoint::TotalPower, start, end)
            .await
    }

    pub async fn fetch_installed_power_async(
        &self,
        country: impl Into<CountryArg>,
    ) -> Result<Table, ApiError> {
        self.fetch_async(country, Endpoint::InstalledPower, None, None)
            .await
    }

    /// Fetch the generation mix for several countries concurrently.
    ///
    /// All countries and dates are validated before any request is sent.
    /// Results come back in input order.
    pub async fn fetch_generation_for_countries_async<C>(
        &self,
        countries: impl IntoIterator<Item = C>,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Vec<(Country, Table)>, ApiError>
    where
        C: Into<CountryArg>,
    {
        let (start, end) = (start.into(), end.into());
        let requests = countries
            .into_iter()
            .map(|c| -> Result<(Country, HttpRequest), ApiError> {
                let country = registry::resolve_country(c)?;
                let (start, end) = required_range(start.clone(), end.clone())?;
                let request = self.build_request(country, Endpoint::Generation, start, end)?;
                Ok((country, request))
            })
            .collect::<Result<Vec<_>, _>>()?;

        join_all(requests.iter().map(|(country, request)| async move {
            self.send_async(request)
                .await
                .map(|table| (*country, table))
        }))
        .await
        .into_iter()
        .collect()
    }

    async fn send_async(&self, request: &HttpRequest) -> Result<Table, ApiError> {
        debug!(url = %request.url, params = ?request.params, "querying API");
        let result = self.transport.get_json(&request.url, &request.params).await;
        self.tabulate(request, result)
    }
}

impl<T: Transport> EnergyDataParser for EnergyChartsParser<T> {
    fn resolve_country(&self, country: CountryArg) -> Result<Country, ApiError> {
        registry::resolve_country(country)
    }

    fn format_date(&self, date: DateArg) -> Result<String, ApiError> {
        date::format_date(date)
    }

    fn normalize(&self, raw: &Value) -> Result<Table, ApiError> {
        normalize::normalize(raw)
    }

    fn fetch_generation(
        &self,
        country: CountryArg,
        start: DateArg,
        end: DateArg,
    ) -> Result<Table, ApiError> {
        Self::fetch_generation(self, country, start, end)
    }
}

/// Series endpoints need both bounds; unlike the generic `fetch`, a blank
/// bound here is an invalid date rather than a dropped filter.
fn required_range(
    start: DateArg,
    end: DateArg,
) -> Result<(Option<DateArg>, Option<DateArg>), ApiError> {
    date::format_date(start.clone())?;
    date::format_date(end.clone())?;
    Ok((Some(start), Some(end)))
}

/// `null`, `{}`, `[]` or `""`: the API was reached but had nothing to say.
fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
