//! Feed polling and state

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::sync::DropGuard;

use super::EventFilter;
use super::EventSource;
use super::InboxConfig;
use super::InboxFrame;
use super::InboxItem;
use super::ReadState;
use crate::error::Error;
use crate::model::Event;

/// The notification feed.
///
/// Cheap to clone; clones share state and the frame channel.
#[derive(Clone)]
pub struct Inbox {
    inner: Arc<InboxInner>,
}

struct InboxInner {
    source: Arc<dyn EventSource>,
    read_state: ReadState,
    config: InboxConfig,
    generation: AtomicU64,
    state: Mutex<FeedState>,
    frames: mpsc::UnboundedSender<InboxFrame>,
}

#[derive(Default)]
struct FeedState {
    batch: Vec<Event>,
    error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    filter: EventFilter,
    /// Generation and token of the live poll task, if any.
    poll: Option<(u64, CancellationToken)>,
}

impl FeedState {
    fn store(&mut self, events: Vec<Event>) {
        self.batch = events;
        self.error = None;
        self.fetched_at = Some(Utc::now());
    }

    fn is_active(&self) -> bool {
        self.poll
            .as_ref()
            .is_some_and(|(_, token)| !token.is_cancelled())
    }
}

/// Handle to a running poll task, returned by [`Inbox::activate`].
///
/// Dropping the handle stops the task; a fetch in flight still finishes.
#[derive(Debug)]
pub struct PollHandle {
    generation: u64,
    cancel: DropGuard,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Generation this task polls for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Inbox {
    /// Creates the feed and the receiver its frames are delivered on.
    pub fn new(
        source: Arc<dyn EventSource>,
        read_state: ReadState,
        config: InboxConfig,
    ) -> (Self, mpsc::UnboundedReceiver<InboxFrame>) {
        let (frames, rx) = mpsc::unbounded_channel();
        let inbox = Self {
            inner: Arc::new(InboxInner {
                source,
                read_state,
                config,
                generation: AtomicU64::new(0),
                state: Mutex::new(FeedState::default()),
                frames,
            }),
        };
        (inbox, rx)
    }

    pub fn config(&self) -> &InboxConfig {
        &self.inner.config
    }

    pub fn read_state(&self) -> &ReadState {
        &self.inner.read_state
    }

    /// Current generation. Bumped by every activation and deactivation.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Whether a poll task is live. Redraws outside a poll are only sent
    /// while it is.
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        // State is plain data; a poisoned lock still holds a usable value.
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts polling: one fetch right away, then one per poll interval.
    ///
    /// Any earlier activation becomes stale and its task is cancelled, so
    /// at most one poll task is alive per feed.
    pub fn activate(&self) -> PollHandle {
        let cancel = CancellationToken::new();
        let generation = {
            let mut state = self.state();
            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((_, previous)) = state.poll.replace((generation, cancel.clone())) {
                previous.cancel();
            }
            generation
        };
        let period = self.inner.config.poll_interval;
        log::debug!("inbox polling started (generation {})", generation);

        let inbox = self.clone();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticks.tick() => {}
                }
                inbox.poll(generation).await;
            }
            log::debug!("inbox polling stopped (generation {})", generation);
        });

        PollHandle {
            generation,
            cancel: cancel.drop_guard(),
            task,
        }
    }

    /// Stops polling.
    ///
    /// A fetch already in flight runs to completion but its result is
    /// discarded. The returned task handle resolves once the loop exits.
    pub fn deactivate(&self, handle: PollHandle) -> JoinHandle<()> {
        {
            let mut state = self.state();
            // A superseded handle must not stale the live activation.
            if state.poll.as_ref().is_some_and(|(generation, _)| *generation == handle.generation) {
                self.inner.generation.fetch_add(1, Ordering::SeqCst);
                state.poll = None;
            }
        }
        let PollHandle { cancel, task, .. } = handle;
        drop(cancel);
        task
    }

    /// One guarded fetch-and-render cycle for `generation`.
    async fn poll(&self, generation: u64) {
        let result = self
            .inner
            .source
            .fetch_events(self.inner.config.page_size)
            .await;

        {
            // Generations only move under this lock, so a fetch that is
            // current here cannot go stale before its batch is stored.
            let mut state = self.state();
            if !self.is_current(generation) {
                log::debug!("discarding stale inbox fetch (generation {})", generation);
                return;
            }
            match result {
                Ok(events) => state.store(events),
                Err(e) => {
                    log::warn!("inbox fetch failed: {}", e);
                    state.error = Some(e.message());
                }
            }
        }

        let frame = self.frame().await;
        if self.is_current(generation) {
            self.emit(frame);
        }
    }

    fn emit(&self, frame: InboxFrame) {
        if self.inner.frames.send(frame).is_err() {
            log::debug!("inbox frame dropped, no receiver");
        }
    }

    /// Sends a redraw only while the feed is being shown.
    fn redraw(&self, frame: InboxFrame) {
        if self.is_active() {
            self.emit(frame);
        } else {
            log::debug!("inbox inactive, redraw skipped");
        }
    }

    /// Fetches once and returns the resulting frame.
    ///
    /// Unlike a poll, a failure is returned to the caller and the last good
    /// batch is left untouched.
    pub async fn refresh(&self) -> Result<InboxFrame, Error> {
        let events = self
            .inner
            .source
            .fetch_events(self.inner.config.page_size)
            .await?;
        self.state().store(events);
        Ok(self.frame().await)
    }

    /// Builds the frame for the last batch under the current filter.
    pub async fn frame(&self) -> InboxFrame {
        let read = self.inner.read_state.load().await;
        let state = self.state();
        InboxFrame {
            items: state
                .filter
                .apply(&state.batch)
                .into_iter()
                .map(|event| InboxItem::new(event.clone(), read.contains(&event.id)))
                .collect(),
            error: state.error.clone(),
            fetched_at: state.fetched_at,
        }
    }

    pub fn filter(&self) -> EventFilter {
        self.state().filter
    }

    /// Changes the filter and redraws from the last batch without a fetch.
    pub async fn set_filter(&self, filter: EventFilter) {
        self.state().filter = filter;
        let frame = self.frame().await;
        self.redraw(frame);
    }

    /// Flags an event as read. Shows on the next draw.
    pub async fn mark_read(&self, id: i64) {
        self.inner.read_state.mark_read(id).await;
    }

    /// Forgets all read flags and redraws.
    pub async fn clear_read(&self) {
        self.inner.read_state.clear().await;
        let frame = self.frame().await;
        self.redraw(frame);
    }
}
