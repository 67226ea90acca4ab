//! Core types used throughout the CLI.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Postal code as typed by the user.
///
/// Holds the input verbatim apart from the trailing line terminator. Only
/// emptiness is checked; digit count and charset are left to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cep(String);

impl Cep {
    /// Builds a CEP from a raw input line.
    ///
    /// Returns `None` when the input is empty or whitespace only.
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }
        Some(Self(line.to_string()))
    }

    /// Returns the CEP as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address returned by the lookup service.
///
/// Every field is an opaque pass-through string; absent keys and `null`
/// values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Postal code.
    #[serde(rename = "cep")]
    pub postal_code: Option<String>,

    /// Street name.
    #[serde(rename = "logradouro")]
    pub street: Option<String>,

    #[serde(rename = "complemento")]
    pub complement: Option<String>,

    #[serde(rename = "bairro")]
    pub neighborhood: Option<String>,

    #[serde(rename = "localidade")]
    pub city: Option<String>,

    /// Two-letter state abbreviation.
    #[serde(rename = "uf")]
    pub state: Option<String>,

    /// IBGE municipality code.
    pub ibge: Option<String>,

    /// GIA tax-collection area code.
    pub gia: Option<String>,

    /// Telephone area code.
    pub ddd: Option<String>,

    /// SIAFI treasury-system code.
    pub siafi: Option<String>,
}

/// Key the service uses to flag an unknown CEP.
const ERROR_FLAG_KEY: &str = "erro";

/// Decoded body of a successful lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Body describes an address.
    Address(Address),
    /// Body carries the error flag.
    NotFound,
}

impl Payload {
    /// Parses a response body.
    ///
    /// Keys are matched case-insensitively. The error flag is accepted both
    /// as a JSON boolean and as the string `"true"`.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(body)?;
        let fields: Map<String, Value> = object
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        if fields.get(ERROR_FLAG_KEY).is_some_and(is_flag_set) {
            return Ok(Payload::NotFound);
        }

        let address = serde_json::from_value(Value::Object(fields))?;
        Ok(Payload::Address(address))
    }
}

fn is_flag_set(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
