//! Streak engine.
//!
//! One engine belongs to one consuming view. It owns the in-memory
//! [`StreakState`], refreshes it from the session service, and keeps a single
//! timer that re-fetches at every local midnight while the view is alive.
//!
//! Disposal (explicit [`StreakEngine::dispose`] or dropping the last
//! [`StreakEngine`] handle) cancels the timer and any in-flight fetch,
//! including one started by the timer. Once disposed, the state is never
//! written again and subscribers see no further changes.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use streak_core::{
    normalize, start_of_next_local_day, studied_today, week_view, CalendarDay, Clock,
    StreakError, StreakState,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::FetchError;
use crate::service::{NewStudySession, SessionPersistence, SessionRecorder};

struct EngineInner<C: Clock> {
    user_id: Uuid,
    persistence: Arc<dyn SessionPersistence>,
    recorder: Arc<dyn SessionRecorder>,
    clock: C,
    state: watch::Sender<Option<StreakState>>,
    disposed: watch::Sender<bool>,
    recheck: Mutex<Option<JoinHandle<()>>>,
}

/// Disposes the engine when the last consumer handle goes away. Only
/// [`StreakEngine`] clones hold one; the re-check task does not.
struct DisposeGuard<C: Clock> {
    inner: Arc<EngineInner<C>>,
}

impl<C: Clock> Drop for DisposeGuard<C> {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

/// Streak engine for a single user and consumer.
///
/// Clone-able; all clones share the same state and timer.
pub struct StreakEngine<C: Clock> {
    inner: Arc<EngineInner<C>>,
    _guard: Arc<DisposeGuard<C>>,
}

impl<C: Clock> Clone for StreakEngine<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _guard: Arc::clone(&self._guard),
        }
    }
}

impl<C: Clock> StreakEngine<C> {
    pub fn new(
        user_id: Uuid,
        persistence: Arc<dyn SessionPersistence>,
        recorder: Arc<dyn SessionRecorder>,
        clock: C,
    ) -> Self {
        let (state, _) = watch::channel(None);
        let (disposed, _) = watch::channel(false);
        let inner = Arc::new(EngineInner {
            user_id,
            persistence,
            recorder,
            clock,
            state,
            disposed,
            recheck: Mutex::new(None),
        });
        Self {
            _guard: Arc::new(DisposeGuard {
                inner: Arc::clone(&inner),
            }),
            inner,
        }
    }

    /// Last successfully fetched state, if any.
    pub fn current(&self) -> Option<StreakState> {
        *self.inner.state.borrow()
    }

    /// Receiver notified on every applied state.
    pub fn subscribe(&self) -> watch::Receiver<Option<StreakState>> {
        self.inner.state.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        *self.inner.disposed.borrow()
    }

    /// Fetch the streak and re-arm the midnight re-check.
    ///
    /// On error the previous state is kept and the error is returned as-is.
    pub async fn fetch_streak(&self) -> Result<StreakState, FetchError> {
        let state = self.inner.refresh().await?;
        self.schedule_recheck();
        Ok(state)
    }

    /// Record a finished session, then re-fetch the streak it updated.
    pub async fn record_session(
        &self,
        session: NewStudySession,
    ) -> Result<StreakState, FetchError> {
        if self.is_disposed() {
            return Err(FetchError::Cancelled);
        }
        let recorded = self
            .inner
            .recorder
            .record_session(self.inner.user_id, &session)
            .await?;
        debug!(session_id = %recorded.session_id, "recorded study session");
        self.fetch_streak().await
    }

    /// True if `last_session` falls on today's local calendar day.
    pub fn studied_today(&self, last_session: Option<DateTime<Utc>>) -> bool {
        let now = self.inner.clock.now();
        last_session
            .is_some_and(|last| studied_today(&last.with_timezone(&now.timezone()), &now))
    }

    /// Calendar for the current week using the last fetched streak.
    ///
    /// Before the first successful fetch the week shows no streak.
    pub fn week_view(&self) -> Result<Vec<CalendarDay>, StreakError> {
        let count = self.current().map_or(0, |s| s.current_streak_count);
        week_view(count, self.inner.clock.now().date_naive())
    }

    /// Stop the re-check timer and cancel any in-flight fetch.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    fn schedule_recheck(&self) {
        let Some(delay) = self.inner.delay_until_next_day() else {
            warn!(user_id = %self.inner.user_id, "no local midnight ahead, re-check not scheduled");
            return;
        };
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(recheck_loop(weak, delay));

        let mut slot = self.inner.recheck.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        // Lost a race with dispose
        if self.is_disposed() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

impl<C: Clock> EngineInner<C> {
    async fn refresh(&self) -> Result<StreakState, FetchError> {
        let disposed = self.disposed.subscribe();
        if *disposed.borrow() {
            return Err(FetchError::Cancelled);
        }

        let snapshot = tokio::select! {
            result = self.persistence.get_streak_and_last_session(self.user_id) => result?,
            _ = wait_disposed(disposed) => return Err(FetchError::Cancelled),
        };

        let now = self.clock.now();
        let tz = now.timezone();
        let last_study_date = snapshot
            .last_session_date
            .map(|last| last.with_timezone(&tz).date_naive());
        let state = normalize(snapshot.streak_count, last_study_date, now.date_naive())
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        if !self.apply(state) {
            return Err(FetchError::Cancelled);
        }
        debug!(
            user_id = %self.user_id,
            streak = state.current_streak_count,
            "streak refreshed"
        );
        Ok(state)
    }

    /// Store `state` unless disposed. Returns whether it was applied.
    fn apply(&self, state: StreakState) -> bool {
        // Runs under the state channel's write lock, as does `dispose`.
        self.state.send_if_modified(|current| {
            if *self.disposed.borrow() {
                return false;
            }
            *current = Some(state);
            true
        })
    }

    fn dispose(&self) {
        self.state.send_if_modified(|_| {
            self.disposed.send_replace(true);
            false
        });
        let mut slot = self.recheck.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    fn delay_until_next_day(&self) -> Option<Duration> {
        let now = self.clock.now();
        let next = start_of_next_local_day(&now)?;
        Some(next.signed_duration_since(&now).to_std().unwrap_or_default())
    }
}

async fn recheck_loop<C: Clock>(engine: Weak<EngineInner<C>>, mut delay: Duration) {
    loop {
        debug!(delay_secs = delay.as_secs(), "streak re-check scheduled");
        tokio::time::sleep(delay).await;

        let Some(inner) = engine.upgrade() else {
            return;
        };
        if let Err(e) = inner.refresh().await {
            // No retry until the consumer fetches again
            if e != FetchError::Cancelled {
                warn!(user_id = %inner.user_id, error = %e, "midnight streak re-check failed");
            }
            return;
        }
        match inner.delay_until_next_day() {
            Some(next) => delay = next,
            None => return,
        }
    }
}

async fn wait_disposed(mut disposed: watch::Receiver<bool>) {
    while !*disposed.borrow_and_update() {
        if disposed.changed().await.is_err() {
            return;
        }
    }
}
