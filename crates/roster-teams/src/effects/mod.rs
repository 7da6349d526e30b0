//! Network access to the teams API.

mod source;

#[cfg(feature = "reqwest")]
mod client;

pub use source::TeamSource;

#[cfg(feature = "reqwest")]
pub use client::{API_ERROR_MESSAGE, TeamsClient};
