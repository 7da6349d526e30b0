//! Immutable records and configuration.

mod config;
mod team;

pub use config::{ClientConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use team::{Channel, Team};
