//! HTTP client for the ViaCEP lookup service.
//!
//! # Example
//!
//! ```ignore
//! use viacep::api_client::ViaCepClient;
//! use viacep::config::DEFAULT_BASE_URL;
//!
//! let client = ViaCepClient::new(DEFAULT_BASE_URL, None)?;
//! let lookup = client.get_address(&cep).await?;
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::Result;
use crate::types::{Address, Cep, Payload};

/// Classified response of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressLookup {
    /// The service resolved the CEP.
    Found(Address),
    /// The service answered with its error flag set.
    NotFound,
    /// The service answered with a non-success status.
    Status(StatusCode),
}

/// HTTP client for the ViaCEP API.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    /// Base URL for the API (e.g., "https://viacep.com.br").
    base_url: String,

    /// Underlying HTTP client.
    client: Client,
}

impl ViaCepClient {
    /// Creates a new API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://viacep.com.br")
    /// * `timeout` - Request timeout; `None` keeps the reqwest default
    ///
    /// # Errors
    ///
    /// Returns `CliError::NetworkError` if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Returns the lookup URL for a CEP.
    ///
    /// The CEP is substituted verbatim, without percent-encoding.
    pub fn lookup_url(&self, cep: &Cep) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep.as_str())
    }

    /// Looks up the address for a CEP.
    ///
    /// Calls `GET /ws/:cep/json/`. A non-success status is returned as
    /// `AddressLookup::Status` without reading the body.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NetworkError` if the request fails or the body
    /// cannot be read, and `CliError::DecodeError` if the body is not an
    /// address object.
    pub async fn get_address(&self, cep: &Cep) -> Result<AddressLookup> {
        let url = self.lookup_url(cep);

        debug!(url = %url, "Looking up CEP");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "Lookup failed");
            return Ok(AddressLookup::Status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received lookup response");

        match Payload::from_json(&body)? {
            Payload::Address(address) => Ok(AddressLookup::Found(address)),
            Payload::NotFound => {
                debug!(cep = %cep, "CEP not found");
                Ok(AddressLookup::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn cep(raw: &str) -> Cep {
        Cep::parse(raw).unwrap()
    }

    #[test]
    fn test_client_new_trims_trailing_slash() {
        let client = ViaCepClient::new("https://viacep.com.br/", None).unwrap();
        assert_eq!(client.base_url, "https://viacep.com.br");
    }

    #[test]
    fn test_lookup_url_is_verbatim() {
        let client = ViaCepClient::new("https://viacep.com.br", None).unwrap();

        assert_eq!(
            client.lookup_url(&cep("01001000")),
            "https://viacep.com.br/ws/01001000/json/"
        );
        assert_eq!(
            client.lookup_url(&cep("01001-000")),
            "https://viacep.com.br/ws/01001-000/json/"
        );
    }

    #[tokio::test]
    async fn test_get_address_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ws/01001000/json/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"cep": "01001-000", "logradouro": "Praça da Sé", "uf": "SP"}"#)
            .create_async()
            .await;

        let client = ViaCepClient::new(&server.url(), None).unwrap();
        let lookup = client.get_address(&cep("01001000")).await.unwrap();

        let AddressLookup::Found(address) = &lookup else {
            panic!("expected address, got {:?}", lookup);
        };
        assert_eq!(address.postal_code.as_deref(), Some("01001-000"));
        assert_eq!(address.state.as_deref(), Some("SP"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_address_error_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/99999999/json/")
            .with_status(200)
            .with_body(r#"{"erro": true}"#)
            .create_async()
            .await;

        let client = ViaCepClient::new(&server.url(), None).unwrap();
        let lookup = client.get_address(&cep("99999999")).await.unwrap();

        assert_eq!(lookup, AddressLookup::NotFound);
    }

    #[tokio::test]
    async fn test_get_address_bad_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/123/json/")
            .with_status(400)
            .with_body("<html>Bad Request</html>")
            .create_async()
            .await;

        let client = ViaCepClient::new(&server.url(), None).unwrap();
        let lookup = client.get_address(&cep("123")).await.unwrap();

        assert_eq!(lookup, AddressLookup::Status(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_get_address_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/01001000/json/")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = ViaCepClient::new(&server.url(), None).unwrap();
        let err = client.get_address(&cep("01001000")).await.unwrap_err();

        assert!(matches!(err, CliError::DecodeError(_)));
    }
}
