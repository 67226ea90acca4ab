//! The lookup session: read a CEP, query the service, print the result.
//!
//! Every failure is turned into a [`LookupOutcome`] so the caller decides
//! what to print from a single exhaustive match.

use std::io::{BufRead, Write};

use reqwest::StatusCode;
use tracing::debug;

use crate::api_client::{AddressLookup, ViaCepClient};
use crate::error::Result;
use crate::types::{Address, Cep};

/// Prompt shown before reading the CEP.
pub const INPUT_PROMPT: &str = "Enter the CEP (numbers only): ";

/// Message for empty or whitespace-only input.
pub const EMPTY_INPUT_MESSAGE: &str = "CEP cannot be empty.";

/// Prefix of the message for transport and decode failures.
pub const UNEXPECTED_ERROR_PREFIX: &str = "An unexpected error occurred: ";

/// Prompt shown before waiting for the final key press.
pub const CLOSING_PROMPT: &str = "Press any key to exit...";

/// Result of one lookup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The service resolved the CEP.
    Found(Address),
    /// The user entered nothing; no request was made.
    InputEmpty,
    /// The service flagged the CEP as unknown. Holds the submitted CEP.
    NotFound(String),
    /// The service answered with a non-success status.
    HttpFailure(StatusCode),
    /// The request failed, the response could not be decoded, or the
    /// input could not be read.
    TransportError(String),
}

impl LookupOutcome {
    /// Whether the run ends with the closing key-press prompt.
    ///
    /// Empty input exits straight away. Every other outcome, not-found
    /// included, ends on the same prompt.
    pub fn reaches_closing_prompt(&self) -> bool {
        !matches!(self, LookupOutcome::InputEmpty)
    }
}

/// Prompts for a CEP and reads one line.
///
/// End of input yields an empty string. Invalid UTF-8 is replaced rather
/// than rejected.
pub fn read_cep<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "{}", INPUT_PROMPT)?;
    out.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Formats an error together with its source chain, skipping causes
/// already quoted by an outer message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Drives a single lookup and writes user-facing text to `out`.
pub struct Session<W> {
    client: ViaCepClient,
    out: W,
    show_all_fields: bool,
}

impl<W: Write> Session<W> {
    /// Creates a session that owns its HTTP client for the whole run.
    pub fn new(client: ViaCepClient, out: W, show_all_fields: bool) -> Self {
        Self {
            client,
            out,
            show_all_fields,
        }
    }

    /// Prompts for a CEP on `input`, looks it up and prints the result.
    ///
    /// A failed read is reported like any other unexpected error.
    pub async fn prompt_and_run<R: BufRead>(&mut self, input: &mut R) -> Result<LookupOutcome> {
        match read_cep(input, &mut self.out) {
            Ok(raw) => self.run(&raw).await,
            Err(e) => {
                debug!(error = %e, "Failed to read CEP");
                let outcome = LookupOutcome::TransportError(error_chain(&e));
                self.render(&outcome)?;
                Ok(outcome)
            }
        }
    }

    /// Looks up a raw CEP line and prints the result.
    pub async fn run(&mut self, raw: &str) -> Result<LookupOutcome> {
        let outcome = self.lookup(raw).await?;
        self.render(&outcome)?;
        Ok(outcome)
    }

    /// Looks up a raw CEP line.
    ///
    /// Empty input returns before any network access. Otherwise the request
    /// URL is announced and exactly one request is issued.
    pub async fn lookup(&mut self, raw: &str) -> Result<LookupOutcome> {
        let Some(cep) = Cep::parse(raw) else {
            debug!("Empty CEP, skipping lookup");
            return Ok(LookupOutcome::InputEmpty);
        };

        writeln!(
            self.out,
            "\nFetching data from API: {}...",
            self.client.lookup_url(&cep)
        )?;
        self.out.flush()?;

        let outcome = match self.client.get_address(&cep).await {
            Ok(AddressLookup::Found(address)) => LookupOutcome::Found(address),
            Ok(AddressLookup::NotFound) => LookupOutcome::NotFound(cep.to_string()),
            Ok(AddressLookup::Status(status)) => LookupOutcome::HttpFailure(status),
            Err(e) => {
                debug!(error = %e, "Lookup failed");
                LookupOutcome::TransportError(error_chain(&e))
            }
        };
        Ok(outcome)
    }

    /// Prints the message for an outcome.
    pub fn render(&mut self, outcome: &LookupOutcome) -> Result<()> {
        let out = &mut self.out;
        match outcome {
            LookupOutcome::Found(address) => {
                writeln!(out, "\n--- Address Found ---")?;
                writeln!(out, "CEP: {}", field(&address.postal_code))?;
                writeln!(out, "Street: {}", field(&address.street))?;
                writeln!(out, "Neighborhood: {}", field(&address.neighborhood))?;
                writeln!(
                    out,
                    "City/State: {} - {}",
                    field(&address.city),
                    field(&address.state)
                )?;
                if self.show_all_fields {
                    writeln!(out, "Complement: {}", field(&address.complement))?;
                    writeln!(out, "IBGE: {}", field(&address.ibge))?;
                    writeln!(out, "GIA: {}", field(&address.gia))?;
                    writeln!(out, "DDD: {}", field(&address.ddd))?;
                    writeln!(out, "SIAFI: {}", field(&address.siafi))?;
                }
            }
            LookupOutcome::InputEmpty => {
                writeln!(out, "\n{}", EMPTY_INPUT_MESSAGE)?;
            }
            LookupOutcome::NotFound(cep) => {
                writeln!(out, "\n[ERROR] CEP '{}' not found.", cep)?;
            }
            LookupOutcome::HttpFailure(status) => {
                writeln!(
                    out,
                    "\n[HTTP ERROR] Failed to communicate with the API. Status: {}",
                    status
                )?;
            }
            LookupOutcome::TransportError(message) => {
                writeln!(out, "\n{}{}", UNEXPECTED_ERROR_PREFIX, message)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Consumes the session, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
