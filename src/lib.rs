//! CLI library crate.
//!
//! This module exposes the CLI internals for testing purposes.

pub mod api_client;
pub mod config;
pub mod error;
pub mod session;
pub mod terminal;
pub mod types;
pub mod ui;
