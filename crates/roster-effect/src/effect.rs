use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info_span, trace, warn};

use crate::error::{EffectError, EffectFailure, Result};
use crate::options::{EffectOptions, ErrorHandler, Setter};

#[derive(Debug)]
struct Slot {
    generation: u64,
    mounted: bool,
    in_flight: bool,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An async fetch bound to its owner's lifetime.
///
/// Mounting runs `get_data` once. Every later trigger ([`update`] with
/// changed dependencies, or [`refresh`]) starts a new generation, aborts the
/// outstanding task and spawns a fresh one. A task delivers its result only
/// if its generation is still current and the effect is still mounted; the
/// check and the delivery happen under one lock, so a superseded or
/// unmounted fetch never reaches the setter.
///
/// Dropping the effect unmounts it.
///
/// [`update`]: AsyncDataEffect::update
/// [`refresh`]: AsyncDataEffect::refresh
pub struct AsyncDataEffect<T, E, D, F> {
    get_data: F,
    state_name: Arc<str>,
    deps: Vec<D>,
    setter: Setter<T>,
    on_error: Option<ErrorHandler<E>>,
    slot: Arc<Mutex<Slot>>,
    task: Option<JoinHandle<()>>,
    runtime: Handle,
}

impl<T, E, D, F, Fut> AsyncDataEffect<T, E, D, F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    D: PartialEq,
{
    /// Mount the effect and start the first fetch.
    ///
    /// # Errors
    ///
    /// [`EffectError::NoRuntime`] when called outside a tokio runtime.
    pub fn mount(get_data: F, options: EffectOptions<T, E, D>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| EffectError::NoRuntime)?;

        let mut effect = Self {
            get_data,
            state_name: options.state_name.into(),
            deps: options.other_states_to_monitor,
            setter: options.setter,
            on_error: options.on_error,
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                mounted: true,
                in_flight: false,
            })),
            task: None,
            runtime,
        };
        effect.trigger();
        Ok(effect)
    }

    /// Replace the monitored dependencies, re-fetching if they changed.
    ///
    /// Returns `true` when a new fetch was started.
    pub fn update(&mut self, deps: Vec<D>) -> bool {
        if deps == self.deps {
            return false;
        }
        self.deps = deps;
        self.trigger();
        true
    }

    /// Start a new fetch regardless of dependencies.
    pub fn refresh(&mut self) {
        self.trigger();
    }

    /// Re-fetch whenever the watched dependency list changes.
    ///
    /// Runs until the sender is dropped, then unmounts the effect.
    pub async fn drive(mut self, mut deps: watch::Receiver<Vec<D>>)
    where
        D: Clone,
    {
        loop {
            let next = deps.borrow_and_update().clone();
            self.update(next);
            if deps.changed().await.is_err() {
                break;
            }
        }
        debug!(state = %self.state_name, "dependency source closed");
    }

    fn trigger(&mut self) {
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.in_flight = true;
            slot.generation
        };

        if let Some(previous) = self.task.take() {
            previous.abort();
        }

        debug!(state = %self.state_name, generation, "starting fetch");

        let fetch = (self.get_data)();
        let delivery = Delivery {
            slot: Arc::clone(&self.slot),
            state_name: Arc::clone(&self.state_name),
            setter: Arc::clone(&self.setter),
            on_error: self.on_error.clone(),
            generation,
        };
        let span = info_span!("async_data_effect", state = %self.state_name, generation);

        let task = async move {
            match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(result) => delivery.deliver(result),
                Err(panic) => delivery.abandon(panic_message(&*panic)),
            }
        };
        self.task = Some(self.runtime.spawn(task.instrument(span)));
    }
}

impl<T, E, D, F> AsyncDataEffect<T, E, D, F> {
    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn dependencies(&self) -> &[D] {
        &self.deps
    }

    /// Number of fetches started so far.
    pub fn generation(&self) -> u64 {
        lock(&self.slot).generation
    }

    /// `true` while the current fetch has not resolved.
    pub fn is_in_flight(&self) -> bool {
        lock(&self.slot).in_flight
    }

    /// Tear down; any outstanding result is discarded.
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        {
            let mut slot = lock(&self.slot);
            if !slot.mounted {
                return;
            }
            slot.mounted = false;
            slot.in_flight = false;
            slot.generation += 1;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!(state = %self.state_name, "unmounted");
    }
}

impl<T, E, D, F> Drop for AsyncDataEffect<T, E, D, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, E, D: fmt::Debug, F> fmt::Debug for AsyncDataEffect<T, E, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncDataEffect")
            .field("state_name", &self.state_name)
            .field("deps", &self.deps)
            .field("slot", &*lock(&self.slot))
            .finish_non_exhaustive()
    }
}

/// Everything a spawned fetch needs to hand its result back.
struct Delivery<T, E> {
    slot: Arc<Mutex<Slot>>,
    state_name: Arc<str>,
    setter: Setter<T>,
    on_error: Option<ErrorHandler<E>>,
    generation: u64,
}

impl<T, E: fmt::Display> Delivery<T, E> {
    fn deliver(self, result: std::result::Result<T, E>) {
        let mut slot = lock(&self.slot);

        if !slot.mounted || slot.generation != self.generation {
            trace!(current = slot.generation, "discarding stale result");
            return;
        }
        slot.in_flight = false;

        match result {
            Ok(value) => (self.setter)(value),
            Err(error) => match &self.on_error {
                Some(handler) => handler(EffectFailure {
                    state_name: self.state_name.to_string(),
                    generation: self.generation,
                    error,
                }),
                None => warn!(%error, "fetch failed and no error handler is set"),
            },
        }
    }

    /// The fetch panicked: release the in-flight flag without delivering.
    fn abandon(self, reason: &str) {
        let mut slot = lock(&self.slot);

        if !slot.mounted || slot.generation != self.generation {
            trace!(current = slot.generation, "discarding stale panic");
            return;
        }
        slot.in_flight = false;
        error!(state = %self.state_name, reason, "fetch panicked");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
