//! Pure shape checks and URL construction.
//!
//! Nothing here performs I/O; every check returns a `Result` naming the
//! first mismatch it found.

mod endpoint;
mod validation;

pub use endpoint::{endpoint, parse_base_url};
pub use validation::{
    ValidationError, assert_is_typed_array, is_channel, is_team, json_type, validate_channel,
    validate_team,
};
