//! Error types for the energy-charts client.
//!
//! # Design
//! Two families are kept apart. `ApiError` covers contract violations on the
//! caller's side (bad identifiers, bad dates) and responses that cannot be
//! normalized; these always surface to the caller. `TransportError` covers
//! the HTTP round-trip; the facade logs it and degrades to an empty table so
//! batch callers can keep iterating.

use thiserror::Error;

/// Errors returned by the registry, date formatter, request builder,
/// normalizer and facade.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The value is of the wrong kind (e.g. a number where a country name
    /// or a date was expected).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A well-formed country name that is not in the registry.
    #[error("country '{0}' not available at the energy-charts API")]
    UnknownCountry(String),

    /// A well-formed endpoint name that is not one of the three endpoints.
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// Textual date that could not be parsed.
    #[error("invalid date format: {0}")]
    InvalidDate(String),

    /// The normalizer was handed nothing to normalize.
    #[error("response is empty, no table can be created")]
    EmptyResponse,

    /// The response has neither `unix_seconds` nor `time`.
    #[error("no time information found in response")]
    MissingTimeIndex,

    /// An element of the time index could not be turned into a timestamp.
    #[error("invalid timestamp in time index: {0}")]
    InvalidTimestamp(String),

    /// The response is not a JSON object, or a field has the wrong shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A series does not have one value per index entry.
    #[error("column '{column}' has {found} values, index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Failures of the HTTP round-trip itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A 200 response whose body is not JSON.
    #[error("could not decode response body: {0}")]
    Decode(String),
}
