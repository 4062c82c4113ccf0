//! Debounced, cached search driven by position updates.
//!
//! [`DebouncedFetcher::spawn`] starts a worker task that owns the cache,
//! the debounce timer and the generation counter. Callers push positions
//! with [`DebouncedFetcher::update`] and read [`FetchEvent`]s with
//! [`DebouncedFetcher::next_event`].
//!
//! ```text
//!  update ──► cache hit? ──yes──► Resolved (from_cache)
//!                │no
//!                ▼
//!             Pending ──(debounce elapsed)──► Loading ──► Resolved | Failed
//!                ▲                               │
//!                └────── newer update ───────────┘ (request cancelled)
//! ```
//!
//! At most one request is live at a time. A newer update cancels the
//! previous request's [`CancellationToken`], and completions tagged with
//! an older generation are dropped, so a slow response can never overwrite
//! a newer one.

use std::sync::Arc;

use hospital_finder_facility_models::{Facility, Position};
use hospital_finder_overpass::{OverpassError, OverpassResponse, build_query};
use hospital_finder_spatial::CacheKey;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::cache::FacilityCache;
use crate::classify::classify;
use crate::{FETCH_FAILED_MESSAGE, FacilitySource, FetchError, SearchSettings};

/// Progress of the search for one position update.
///
/// `generation` increases by one per update; events for an older
/// generation than the latest one seen are obsolete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FetchEvent {
    /// Waiting for the debounce period to pass.
    Pending {
        /// Update sequence number.
        generation: u64,
        /// Search center.
        center: Position,
    },
    /// Request sent, waiting for the response.
    Loading {
        /// Update sequence number.
        generation: u64,
        /// Search center.
        center: Position,
    },
    /// Ranked results are available.
    Resolved {
        /// Update sequence number.
        generation: u64,
        /// Search center.
        center: Position,
        /// Ranked facilities.
        facilities: Vec<Facility>,
        /// Whether the results came from the cache.
        from_cache: bool,
    },
    /// The request failed.
    Failed {
        /// Update sequence number.
        generation: u64,
        /// Search center.
        center: Position,
        /// User-facing error message.
        message: String,
    },
}

impl FetchEvent {
    /// Update sequence number this event belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Pending { generation, .. }
            | Self::Loading { generation, .. }
            | Self::Resolved { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }

    /// Search center this event belongs to.
    #[must_use]
    pub const fn center(&self) -> Position {
        match self {
            Self::Pending { center, .. }
            | Self::Loading { center, .. }
            | Self::Resolved { center, .. }
            | Self::Failed { center, .. } => *center,
        }
    }

    /// Whether this event ends its generation (`Resolved` or `Failed`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Failed { .. })
    }
}

/// Handle to a running search worker.
pub struct DebouncedFetcher {
    updates: mpsc::UnboundedSender<Position>,
    events: mpsc::UnboundedReceiver<FetchEvent>,
    shutdown: CancellationToken,
    worker: JoinHandle<()>,
}

impl DebouncedFetcher {
    /// Spawns the worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(source: Arc<dyn FacilitySource>, settings: SearchSettings) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let worker = Worker::new(source, settings, events_tx);
        let handle = tokio::spawn(worker.run(updates_rx, shutdown.clone()));

        Self {
            updates: updates_tx,
            events: events_rx,
            shutdown,
            worker: handle,
        }
    }

    /// Reports a new position.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::WorkerStopped`] if the worker has exited.
    pub fn update(&self, position: Position) -> Result<(), FetchError> {
        self.updates
            .send(position)
            .map_err(|_| FetchError::WorkerStopped)
    }

    /// Waits for the next event. Returns `None` once the worker has exited
    /// and all events have been read.
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        self.events.recv().await
    }

    /// Waits until the current generation resolves or fails, returning the
    /// terminal event. Intermediate and obsolete events are skipped.
    pub async fn settle(&mut self) -> Option<FetchEvent> {
        while let Some(event) = self.next_event().await {
            if event.is_terminal() {
                return Some(event);
            }
        }
        None
    }

    /// Stops the worker and cancels any in-flight request.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.worker.await {
            log::error!("Search worker panicked: {e}");
        }
    }
}

/// A search waiting for its debounce deadline.
#[derive(Debug, Clone, Copy)]
struct PendingSearch {
    center: Position,
    deadline: Instant,
}

/// Result of a request task, tagged with the generation that started it.
struct Completion {
    generation: u64,
    center: Position,
    result: Result<OverpassResponse, OverpassError>,
}

struct Worker {
    source: Arc<dyn FacilitySource>,
    settings: SearchSettings,
    cache: FacilityCache,
    generation: u64,
    pending: Option<PendingSearch>,
    in_flight: Option<CancellationToken>,
    events: mpsc::UnboundedSender<FetchEvent>,
}

impl Worker {
    fn new(
        source: Arc<dyn FacilitySource>,
        settings: SearchSettings,
        events: mpsc::UnboundedSender<FetchEvent>,
    ) -> Self {
        Self {
            source,
            settings,
            cache: FacilityCache::new(),
            generation: 0,
            pending: None,
            in_flight: None,
            events,
        }
    }

    async fn run(
        mut self,
        mut updates: mpsc::UnboundedReceiver<Position>,
        shutdown: CancellationToken,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        loop {
            let deadline = self.pending.map(|p| p.deadline);

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                update = updates.recv() => {
                    let Some(position) = update else { break };
                    self.on_position(position);
                }
                Some(completion) = done_rx.recv() => self.on_completion(completion),
                () = sleep_until(deadline) => self.dispatch(&done_tx),
            }
        }

        self.cancel_in_flight();
        log::debug!("Search worker stopped after {} updates", self.generation);
    }

    fn on_position(&mut self, center: Position) {
        self.generation += 1;
        self.pending = None;
        self.cancel_in_flight();

        let key = CacheKey::from_position(center);
        if let Some(cached) = self.cache.get(&key) {
            log::debug!(
                "Cache hit for {key} ({} facilities, generation {})",
                cached.len(),
                self.generation
            );
            let event = FetchEvent::Resolved {
                generation: self.generation,
                center,
                facilities: cached.to_vec(),
                from_cache: true,
            };
            self.emit(event);
            return;
        }

        self.pending = Some(PendingSearch {
            center,
            deadline: Instant::now() + self.settings.debounce(),
        });
        self.emit(FetchEvent::Pending {
            generation: self.generation,
            center,
        });
    }

    fn dispatch(&mut self, done: &mpsc::UnboundedSender<Completion>) {
        let Some(PendingSearch { center, .. }) = self.pending.take() else {
            return;
        };
        let generation = self.generation;
        let query = build_query(center, &self.settings.query);

        log::info!(
            "Searching for hospitals within {} m of {center} (generation {generation})",
            self.settings.query.radius_m
        );

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.emit(FetchEvent::Loading { generation, center });

        let source = Arc::clone(&self.source);
        let done = done.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    log::debug!("Request for generation {generation} cancelled");
                }
                result = source.fetch(&query) => {
                    // The worker may already have stopped; nothing to report to.
                    let _ = done.send(Completion { generation, center, result });
                }
            }
        });
    }

    fn on_completion(&mut self, completion: Completion) {
        let Completion {
            generation,
            center,
            result,
        } = completion;

        if generation != self.generation {
            log::debug!(
                "Discarding response for generation {generation} (current {})",
                self.generation
            );
            return;
        }
        self.in_flight = None;

        let event = match result {
            Ok(response) => {
                let facilities = classify(&response, center, &self.settings);
                log::info!("Found {} hospitals near {center}", facilities.len());
                if response.elements.is_some() {
                    self.cache
                        .put(CacheKey::from_position(center), facilities.clone());
                } else {
                    log::debug!("Not caching response without elements for {center}");
                }
                FetchEvent::Resolved {
                    generation,
                    center,
                    facilities,
                    from_cache: false,
                }
            }
            Err(e) => {
                log::error!("Hospital search near {center} failed: {e}");
                FetchEvent::Failed {
                    generation,
                    center,
                    message: FETCH_FAILED_MESSAGE.to_string(),
                }
            }
        };
        self.emit(event);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    fn emit(&self, event: FetchEvent) {
        if self.events.send(event).is_err() {
            log::debug!("Search event dropped: receiver closed");
        }
    }
}

/// Sleeps until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
