//! HTTP status classification for Roster.
//!
//! [`HttpError`] is raised when a response arrives with a failing status.
//! It carries the status band ([`HttpErrorKind`]) so callers can tell a
//! client mistake from a server fault without inspecting the raw code.
//!
//! No retry or recovery lives here; classification only.

mod error;
mod kind;

pub use error::HttpError;
pub use kind::HttpErrorKind;
