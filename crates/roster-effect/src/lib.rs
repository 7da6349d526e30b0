//! Lifecycle-bound async data effects.
//!
//! An [`AsyncDataEffect`] runs an async fetch when it is mounted and again
//! whenever its monitored dependencies change, and writes each result
//! through a caller-supplied setter. Results that arrive after a newer fetch
//! was started, or after the effect was unmounted, are discarded: every
//! fetch is tagged with a generation number that must still be current when
//! it resolves.
//!
//! Fetch failures are never swallowed silently. They go to the optional
//! error handler as an [`EffectFailure`], or are logged at `warn`.

mod effect;
mod error;
mod options;

pub use effect::AsyncDataEffect;
pub use error::{EffectError, EffectFailure, Result};
pub use options::{EffectOptions, ErrorHandler, Setter};
