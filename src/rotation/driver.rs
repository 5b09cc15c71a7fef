//! The rotation driver: loads a sample, shows it, and keeps swapping it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, info, warn};

use super::{GallerySink, RotationConfig, RotationState, Transition};
use crate::telemetry;
use crate::traits::CollectionSource;
use crate::types::TokenRecord;
use crate::{FeedError, Result};

/// Drives a gallery from a [`CollectionSource`].
///
/// Owns at most one timer task. Every cancellation (hover, re-render,
/// destroy) aborts the task and bumps a generation counter; a sample that
/// arrives for an older generation is dropped, so nothing is rendered
/// between a pause and the matching resume.
///
/// Dropping the driver aborts its timer.
pub struct RotationDriver {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn CollectionSource>,
    sink: Arc<dyn GallerySink>,
    config: RotationConfig,
    state: Mutex<DriverState>,
}

#[derive(Default)]
struct DriverState {
    phase: RotationState,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    paused_for_hover: bool,
}

impl DriverState {
    /// Abort the timer (if any) and invalidate in-flight samples.
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation += 1;
    }
}

impl RotationDriver {
    /// Create an idle driver. Fails when `config` does not validate.
    pub fn new(
        source: Arc<dyn CollectionSource>,
        sink: Arc<dyn GallerySink>,
        config: RotationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                source,
                sink,
                config,
                state: Mutex::new(DriverState::default()),
            }),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RotationState {
        self.inner.lock().phase
    }

    /// Whether a rotation timer is scheduled.
    pub fn is_rotating(&self) -> bool {
        self.inner.lock().timer.is_some()
    }

    pub fn config(&self) -> &RotationConfig {
        &self.inner.config
    }

    /// Show a loading state, fetch `limit` tokens and display them.
    ///
    /// With rotation enabled the fetch is a cycling sample and a timer
    /// starts afterwards; any previous timer is cancelled first. A failure
    /// moves the driver to [`RotationState::Error`].
    pub async fn render(&self, limit: usize) -> Result<()> {
        let generation = {
            let mut state = self.inner.lock();
            if state.phase == RotationState::Destroyed {
                return Err(FeedError::InvalidInput("rotation driver destroyed".into()));
            }
            state.cancel_timer();
            state.paused_for_hover = false;
            state.phase = RotationState::Loading;
            self.inner.sink.show_loading();
            state.generation
        };

        let cycling = self.inner.config.enabled;
        let result = self.inner.source.get_collection_nfts(limit, cycling).await;

        let mut state = self.inner.lock();
        if state.generation != generation {
            debug!(limit, "render superseded");
            return Ok(());
        }
        match result {
            Ok(tokens) => {
                self.inner.show(&tokens, Transition::None);
                state.phase = RotationState::Displaying;
                info!(limit, count = tokens.len(), "gallery rendered");
                if cycling {
                    state.timer = Some(Inner::spawn_timer(&self.inner, limit, generation));
                }
                Ok(())
            }
            Err(e) => {
                warn!(limit, error = %e, "gallery failed to load");
                self.inner.sink.show_error(&e);
                state.phase = RotationState::Error;
                Err(e)
            }
        }
    }

    /// Re-run [`render`](Self::render) with the default limit after an error.
    ///
    /// Does nothing outside the error state.
    pub async fn retry(&self) -> Result<()> {
        if self.state() != RotationState::Error {
            debug!(state = %self.state(), "retry ignored");
            return Ok(());
        }
        self.render(self.inner.config.default_limit).await
    }

    /// Pointer entered the gallery: stop rotating, keep the content.
    pub fn hover_enter(&self) {
        let mut state = self.inner.lock();
        if state.timer.is_none() {
            return;
        }
        state.cancel_timer();
        state.paused_for_hover = true;
        state.phase = RotationState::Paused;
        debug!("rotation paused");
    }

    /// Pointer left the gallery: resume rotating with the default limit.
    ///
    /// Must be called from within a tokio runtime.
    pub fn hover_leave(&self) {
        let mut state = self.inner.lock();
        if !state.paused_for_hover {
            return;
        }
        state.paused_for_hover = false;
        state.generation += 1;
        state.phase = RotationState::Displaying;
        let limit = self.inner.config.default_limit;
        state.timer = Some(Inner::spawn_timer(&self.inner, limit, state.generation));
        debug!(limit, "rotation resumed");
    }

    /// Cancel the timer and detach the sink. Terminal.
    pub fn destroy(&self) {
        let mut state = self.inner.lock();
        if state.phase == RotationState::Destroyed {
            return;
        }
        state.cancel_timer();
        state.paused_for_hover = false;
        state.phase = RotationState::Destroyed;
        self.inner.sink.detach();
        debug!("rotation driver destroyed");
    }
}

impl Drop for RotationDriver {
    fn drop(&mut self) {
        self.inner.lock().cancel_timer();
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn show(&self, tokens: &[TokenRecord], transition: Transition) {
        if tokens.is_empty() {
            self.sink.show_empty();
        } else {
            self.sink.show_tokens(tokens, transition);
        }
    }

    /// Spawn the repeating timer. The first tick fires one period from now.
    fn spawn_timer(this: &Arc<Self>, limit: usize, generation: u64) -> JoinHandle<()> {
        let inner = Arc::clone(this);
        let period = inner.config.period;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = IntervalStream::new(interval);

            while ticks.next().await.is_some() {
                if !inner.begin_rotation(generation) {
                    break;
                }
                let result = inner.source.get_collection_nfts(limit, true).await;
                if !inner.finish_rotation(generation, limit, result) {
                    break;
                }
            }
        })
    }

    fn begin_rotation(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            return false;
        }
        state.phase = RotationState::Rotating;
        true
    }

    fn finish_rotation(
        &self,
        generation: u64,
        limit: usize,
        result: Result<Vec<TokenRecord>>,
    ) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            return false;
        }
        match result {
            Ok(tokens) => {
                self.show(&tokens, Transition::Swap);
                metrics::counter!(telemetry::ROTATIONS_TOTAL).increment(1);
                debug!(limit, count = tokens.len(), "gallery rotated");
            }
            // Keep the current set on screen and try again next period
            Err(e) => warn!(limit, error = %e, "rotation sample failed"),
        }
        state.phase = RotationState::Displaying;
        true
    }
}
