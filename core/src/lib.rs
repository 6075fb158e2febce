//! Typed client core for the energy-charts public API.
//!
//! # Overview
//! Builds validated requests for the three supported endpoints
//! (`/public_power`, `/total_power`, `/installed_power`), sends them through
//! a blocking or async transport, and normalizes the JSON payload into a
//! time-indexed `Table`.
//!
//! # Design
//! - Registry, date formatting, request building and normalization are pure
//!   functions with no I/O.
//! - `EnergyChartsParser` is generic over its transport so tests can inject
//!   a fake one. `HttpTransport` uses `ureq` (blocking) and `reqwest` (async).
//! - Caller mistakes surface as `ApiError`; transport failures are logged
//!   through `tracing` and yield an empty `Table`.

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod http;
pub mod normalize;
pub mod registry;
pub mod request;
pub mod table;
pub mod transport;

pub use client::{EnergyChartsParser, EnergyDataParser};
pub use config::{ClientConfig, ConfigError};
pub use date::{format_date, DateArg};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::normalize;
pub use registry::{resolve_country, resolve_endpoint, Country, CountryArg, Endpoint, EndpointArg};
pub use request::{build_request, EndpointQuery};
pub use table::{Column, Row, Table};
pub use transport::{AsyncTransport, HttpTransport, Transport};
