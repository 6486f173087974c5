//! The search widget
//!
//! Input values are debounced; when the quiet window elapses the latest
//! term is searched and the rendered results replace the sink content.
//! Provider failures are logged and leave the display as it was.

use crate::input::InputSource;
use crate::sink::RenderSink;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use typeahead_core::Renderer;
use typeahead_debounce::{DebounceError, Debouncer, Timer, TokioTimer, DEFAULT_DELAY};
use typeahead_provider::SearchProvider;

/// How often `settle` re-checks for outstanding work
const SETTLE_POLL: Duration = Duration::from_millis(10);

/// Widget behaviour settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Quiet window before a search fires
    pub delay: Duration,
    /// Drop results of a search that was overtaken by a newer one
    pub discard_stale: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            discard_stale: true,
        }
    }
}

/// State shared between the widget and its in-flight searches
struct Shared {
    provider: Arc<dyn SearchProvider>,
    sink: Arc<dyn RenderSink>,
    renderer: Renderer,
    discard_stale: bool,
    runtime: Handle,
    /// Bumped by every fired search and every clear; guards sink writes
    generation: Mutex<u64>,
    in_flight: AtomicUsize,
}

impl Shared {
    /// Debounced action: search `term` in the background
    fn start_search(self: &Arc<Self>, term: String) {
        let generation = {
            let mut current = self.generation.lock();
            *current += 1;
            *current
        };

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let shared = Arc::clone(self);

        self.runtime.spawn(async move {
            let _in_flight = InFlight(Arc::clone(&shared));
            debug!("Searching for {:?} (generation {})", term, generation);

            match shared.provider.search(&term).await {
                Ok(results) => {
                    let markup = shared.renderer.render(&results, &term);

                    let current = shared.generation.lock();
                    if shared.discard_stale && *current != generation {
                        debug!("Discarding stale results for {:?}", term);
                        return;
                    }
                    shared.sink.replace(markup);
                    info!("Displayed {} results for {:?}", results.len(), term);
                }
                Err(e) => {
                    warn!("Search for {:?} failed: {}", term, e);
                }
            }
        });
    }

    /// Blank the display and invalidate anything in flight
    fn clear(&self) {
        let mut current = self.generation.lock();
        *current += 1;
        self.sink.replace(String::new());
    }
}

/// Decrements the in-flight count when a search task ends
struct InFlight(Arc<Shared>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Debounced search box driving a provider and a display sink
pub struct SearchWidget<T: Timer = TokioTimer> {
    debouncer: Debouncer<String, T>,
    shared: Arc<Shared>,
}

impl SearchWidget<TokioTimer> {
    /// Widget on the current tokio runtime
    pub fn with_tokio(
        provider: Arc<dyn SearchProvider>,
        sink: Arc<dyn RenderSink>,
        renderer: Renderer,
        options: WidgetOptions,
    ) -> Result<Self, DebounceError> {
        Self::new(provider, sink, renderer, options, TokioTimer::current()?)
    }
}

impl<T: Timer> SearchWidget<T> {
    /// Assemble a widget; searches run on the current tokio runtime
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        sink: Arc<dyn RenderSink>,
        renderer: Renderer,
        options: WidgetOptions,
        timer: T,
    ) -> Result<Self, DebounceError> {
        let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;

        let shared = Arc::new(Shared {
            provider,
            sink,
            renderer,
            discard_stale: options.discard_stale,
            runtime,
            generation: Mutex::new(0),
            in_flight: AtomicUsize::new(0),
        });

        let action_shared = Arc::clone(&shared);
        let debouncer = Debouncer::new(
            move |term: String| action_shared.start_search(term),
            options.delay,
            timer,
        );

        Ok(Self { debouncer, shared })
    }

    /// Handle one "input changed" event
    ///
    /// An empty value clears the display at once without contacting the
    /// provider; anything else is searched after the quiet window.
    pub fn on_input(&self, term: impl Into<String>) {
        let term = term.into();
        if term.is_empty() {
            self.debouncer.cancel();
            self.shared.clear();
            debug!("Search box emptied, display cleared");
        } else {
            self.debouncer.call(term);
        }
    }

    /// Search the pending term now instead of waiting
    pub fn flush(&self) -> bool {
        self.debouncer.flush()
    }

    /// Whether nothing is pending and no search is in flight
    pub fn is_idle(&self) -> bool {
        // Debouncer first: a firing action registers its search before it
        // stops counting as firing
        self.debouncer.is_idle() && self.shared.in_flight.load(Ordering::SeqCst) == 0
    }

    /// Wait until pending and in-flight searches have finished
    ///
    /// A pending call only finishes when its timer fires, so with a
    /// `ManualTimer` advance the clock (or `flush`) before settling;
    /// otherwise this never returns.
    pub async fn settle(&self) {
        while !self.is_idle() {
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }

    /// Feed every value from `source`, then settle
    ///
    /// Needs a timer that advances on its own, such as `TokioTimer`.
    pub async fn run<S: InputSource>(&self, mut source: S) {
        while let Some(term) = source.next_input().await {
            self.on_input(term);
        }
        self.settle().await;
    }
}
