//! Typed retrieval and validation of team records.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable records and configuration
//! - [`core`] - Pure validation and URL construction
//! - [`effects`] - I/O behind the [`TeamSource`] trait
//!
//! Responses are untrusted: every payload goes through [`validate_team`]
//! (or [`assert_is_typed_array`] for collections) before a [`Team`] is handed
//! back. Failures keep their category: transport, HTTP status (carrying a
//! [`roster_http::HttpErrorKind`]), decode, or validation.

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{
    ValidationError, assert_is_typed_array, is_channel, is_team, json_type, validate_channel,
    validate_team,
};
pub use data::{Channel, ClientConfig, Team};
pub use effects::TeamSource;

#[cfg(feature = "reqwest")]
pub use effects::{API_ERROR_MESSAGE, TeamsClient};

pub use error::{ConfigError, Error, Result};
