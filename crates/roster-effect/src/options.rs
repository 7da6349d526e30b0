use std::fmt;
use std::sync::Arc;

use crate::error::EffectFailure;

pub type Setter<T> = Arc<dyn Fn(T) + Send + Sync>;
pub type ErrorHandler<E> = Arc<dyn Fn(EffectFailure<E>) + Send + Sync>;

/// How an [`AsyncDataEffect`](crate::AsyncDataEffect) reports its results.
///
/// # Examples
///
/// ```
/// use roster_effect::EffectOptions;
///
/// let options: EffectOptions<Vec<String>, String, u32> =
///     EffectOptions::new("teams", |teams: Vec<String>| println!("{} teams", teams.len()))
///         .monitor(vec![1])
///         .on_error(|failure| eprintln!("{failure}"));
/// ```
pub struct EffectOptions<T, E, D> {
    /// Label used in log spans and failure reports.
    pub state_name: String,

    /// Dependency values; a change re-runs the fetch.
    ///
    /// Default: empty
    pub other_states_to_monitor: Vec<D>,

    /// Receives every current result. Called while the effect's internal
    /// lock is held, so it must not call back into the effect.
    pub setter: Setter<T>,

    /// Receives failures of current fetches. When absent they are logged at
    /// `warn` and dropped.
    ///
    /// Default: None
    pub on_error: Option<ErrorHandler<E>>,
}

impl<T, E, D> EffectOptions<T, E, D> {
    pub fn new<S>(state_name: impl Into<String>, setter: S) -> Self
    where
        S: Fn(T) + Send + Sync + 'static,
    {
        Self {
            state_name: state_name.into(),
            other_states_to_monitor: Vec::new(),
            setter: Arc::new(setter),
            on_error: None,
        }
    }

    pub fn monitor(mut self, deps: Vec<D>) -> Self {
        self.other_states_to_monitor = deps;
        self
    }

    pub fn on_error<H>(mut self, handler: H) -> Self
    where
        H: Fn(EffectFailure<E>) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }
}

impl<T, E, D: fmt::Debug> fmt::Debug for EffectOptions<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectOptions")
            .field("state_name", &self.state_name)
            .field("other_states_to_monitor", &self.other_states_to_monitor)
            .field("setter", &"{ ... }")
            .field("on_error", &self.on_error.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}
