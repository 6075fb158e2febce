//! Closed catalogs of the countries and endpoints the energy-charts API knows.
//!
//! # Design
//! Both catalogs are static lookup tables rather than anything dispatched at
//! runtime. Names match case-insensitively, with `_`, `-` and spaces treated
//! alike, so `"GERMANY"`, `"germany"` and `"European Union"` all resolve.
//!
//! Inputs arrive as `CountryArg` / `EndpointArg` so callers can hand over a
//! name, an already resolved value, or an untyped JSON value. Anything that
//! is not a string or a resolved value is rejected as `InvalidArgument`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

macro_rules! countries {
    ($($variant:ident => ($name:literal, $code:literal)),+ $(,)?) => {
        /// A country (or aggregate region) served by the API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Country {
            $($variant),+
        }

        impl Country {
            /// Every country in registry order.
            pub const ALL: &'static [Country] = &[$(Country::$variant),+];

            /// Human-readable name, the key used for lookups.
            pub fn name(self) -> &'static str {
                match self {
                    $(Country::$variant => $name),+
                }
            }

            /// Code sent verbatim as the `country` query parameter.
            pub fn code(self) -> &'static str {
                match self {
                    $(Country::$variant => $code),+
                }
            }
        }
    };
}

countries! {
    Germany => ("Germany", "de"),
    Switzerland => ("Switzerland", "ch"),
    EuropeanUnion => ("European Union", "eu"),
    Europe => ("Europe", "all"),
    Albania => ("Albania", "al"),
    Armenia => ("Armenia", "am"),
    Austria => ("Austria", "at"),
    Azerbaijan => ("Azerbaijan", "az"),
    BosniaHerzegovina => ("Bosnia Herzegovina", "ba"),
    Belgium => ("Belgium", "be"),
    Bulgaria => ("Bulgaria", "bg"),
    Belarus => ("Belarus", "by"),
    Cyprus => ("Cyprus", "cy"),
    CzechRepublic => ("Czech Republic", "cz"),
    Denmark => ("Denmark", "dk"),
    Spain => ("Spain", "es"),
    Estonia => ("Estonia", "ee"),
    Finland => ("Finland", "fi"),
    France => ("France", "fr"),
    Georgia => ("Georgia", "ge"),
    Croatia => ("Croatia", "hr"),
    Greece => ("Greece", "gr"),
    Ireland => ("Ireland", "ie"),
    Hungary => ("Hungary", "hu"),
    Italy => ("Italy", "it"),
    Lithuania => ("Lithuania", "lt"),
    Luxembourg => ("Luxembourg", "lu"),
    Latvia => ("Latvia", "lv"),
    Moldova => ("Moldova", "md"),
    NorthMacedonia => ("North Macedonia", "mk"),
    Montenegro => ("Montenegro", "me"),
    Malta => ("Malta", "mt"),
    NorthIreland => ("North Ireland", "nie"),
    Netherlands => ("Netherlands", "nl"),
    Norway => ("Norway", "no"),
    Poland => ("Poland", "pl"),
    Portugal => ("Portugal", "pt"),
    Romania => ("Romania", "ro"),
    Serbia => ("Serbia", "rs"),
    Russia => ("Russia", "ru"),
    Sweden => ("Sweden", "se"),
    Slovenia => ("Slovenia", "si"),
    SlovakRepublic => ("Slovak Republic", "sk"),
    Turkey => ("Turkey", "tr"),
    Ukraine => ("Ukraine", "ua"),
    UnitedKingdom => ("United Kingdom", "uk"),
    Kosovo => ("Kosovo", "xk"),
}

impl Country {
    /// Look a country up by its API code (`"de"`, `"nie"`, ...).
    pub fn from_code(code: &str) -> Option<Country> {
        let code = code.trim();
        Country::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three remote resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Public net electricity generation mix.
    Generation,
    /// Total electricity production including industrial self-supply.
    TotalPower,
    /// Installed capacity snapshot per production type.
    InstalledPower,
}

impl Endpoint {
    pub const ALL: &'static [Endpoint] = &[
        Endpoint::Generation,
        Endpoint::TotalPower,
        Endpoint::InstalledPower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Generation => "generation",
            Endpoint::TotalPower => "total_power",
            Endpoint::InstalledPower => "installed_power",
        }
    }

    /// Fixed request path, appended to the base url.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Generation => "/public_power",
            Endpoint::TotalPower => "/total_power",
            Endpoint::InstalledPower => "/installed_power",
        }
    }

    /// Whether the endpoint accepts a `start`/`end` range.
    pub fn takes_date_range(self) -> bool {
        !matches!(self, Endpoint::InstalledPower)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything a caller may pass where a country is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum CountryArg {
    Name(String),
    Resolved(Country),
    /// A value of the wrong kind; holds a description of what was given.
    Invalid(String),
}

impl From<&str> for CountryArg {
    fn from(name: &str) -> Self {
        CountryArg::Name(name.to_string())
    }
}

impl From<String> for CountryArg {
    fn from(name: String) -> Self {
        CountryArg::Name(name)
    }
}

impl From<&String> for CountryArg {
    fn from(name: &String) -> Self {
        CountryArg::Name(name.clone())
    }
}

impl From<Country> for CountryArg {
    fn from(country: Country) -> Self {
        CountryArg::Resolved(country)
    }
}

impl From<&Country> for CountryArg {
    fn from(country: &Country) -> Self {
        CountryArg::Resolved(*country)
    }
}

impl From<&Value> for CountryArg {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => CountryArg::Name(s.clone()),
            other => CountryArg::Invalid(json_kind(other).to_string()),
        }
    }
}

impl From<Value> for CountryArg {
    fn from(value: Value) -> Self {
        CountryArg::from(&value)
    }
}

/// Anything a caller may pass where an endpoint is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointArg {
    Name(String),
    Resolved(Endpoint),
    Invalid(String),
}

impl From<&str> for EndpointArg {
    fn from(name: &str) -> Self {
        EndpointArg::Name(name.to_string())
    }
}

impl From<String> for EndpointArg {
    fn from(name: String) -> Self {
        EndpointArg::Name(name)
    }
}

impl From<Endpoint> for EndpointArg {
    fn from(endpoint: Endpoint) -> Self {
        EndpointArg::Resolved(endpoint)
    }
}

impl From<&Value> for EndpointArg {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => EndpointArg::Name(s.clone()),
            other => EndpointArg::Invalid(json_kind(other).to_string()),
        }
    }
}

impl From<Value> for EndpointArg {
    fn from(value: Value) -> Self {
        EndpointArg::from(&value)
    }
}

/// Resolve a country name (or pass a resolved `Country` through).
pub fn resolve_country(input: impl Into<CountryArg>) -> Result<Country, ApiError> {
    match input.into() {
        CountryArg::Resolved(country) => Ok(country),
        CountryArg::Name(name) => {
            let key = lookup_key(&name);
            Country::ALL
                .iter()
                .copied()
                .find(|c| lookup_key(c.name()) == key)
                .ok_or(ApiError::UnknownCountry(name))
        }
        CountryArg::Invalid(kind) => Err(ApiError::InvalidArgument(format!(
            "country must be a name or a Country, got {kind}"
        ))),
    }
}

/// Resolve an endpoint name (or pass a resolved `Endpoint` through).
pub fn resolve_endpoint(input: impl Into<EndpointArg>) -> Result<Endpoint, ApiError> {
    match input.into() {
        EndpointArg::Resolved(endpoint) => Ok(endpoint),
        EndpointArg::Name(name) => {
            let key = lookup_key(&name);
            Endpoint::ALL
                .iter()
                .copied()
                .find(|e| lookup_key(e.name()) == key)
                .ok_or(ApiError::UnknownEndpoint(name))
        }
        EndpointArg::Invalid(kind) => Err(ApiError::InvalidArgument(format!(
            "endpoint must be a name or an Endpoint, got {kind}"
        ))),
    }
}

fn lookup_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
