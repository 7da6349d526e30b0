use thiserror::Error;

pub type Result<T> = std::result::Result<T, EffectError>;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("no tokio runtime is running; effects must be mounted inside one")]
    NoRuntime,
}

/// A fetch failed while it was still the current one.
///
/// Failures of superseded fetches are dropped like their successes.
#[derive(Debug, Error)]
#[error("fetch for `{state_name}` (generation {generation}) failed: {error}")]
pub struct EffectFailure<E> {
    pub state_name: String,
    pub generation: u64,
    pub error: E,
}
