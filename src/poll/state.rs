use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::CacheMode;

/// What a polled resource currently looks like to its consumers.
///
/// `data` keeps the last successful value across failures, so consumers keep rendering
/// the previous snapshot while a refetch is pending or after it fails.
#[derive(Debug)]
pub struct PollState<T> {
    /// Last successfully fetched value.
    pub data: Option<Arc<T>>,
    /// Message of the most recent failure; cleared by the next success.
    pub error: Option<String>,
    /// A fetch is in flight.
    pub is_fetching: bool,
    /// When `data` was last replaced.
    pub updated_at: Option<DateTime<Utc>>,
    /// Consecutive failed fetches since the last success.
    pub failure_count: u32,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_fetching: false,
            updated_at: None,
            failure_count: 0,
        }
    }
}

impl<T> Clone for PollState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
            updated_at: self.updated_at,
            failure_count: self.failure_count,
        }
    }
}

/// Inputs to the poll state machine.
#[derive(Debug)]
pub enum PollEvent<T> {
    /// The first consumer attached.
    Mount,
    /// The interval timer fired.
    Tick,
    /// The user asked for fresh data (pull to refresh).
    UserRefresh,
    /// A fetch completed.
    Loaded(T),
    /// A fetch failed after its retries were exhausted.
    Failed(String),
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEffect {
    None,
    Fetch(CacheMode),
}

impl<T> PollState<T> {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Apply `event`, returning the next state and the effect to run.
    pub fn reduce(mut self, event: PollEvent<T>) -> (Self, PollEffect) {
        let effect = match event {
            PollEvent::Mount | PollEvent::Tick if self.is_fetching => PollEffect::None,
            PollEvent::Mount | PollEvent::Tick => {
                self.is_fetching = true;
                PollEffect::Fetch(CacheMode::Use)
            }
            PollEvent::UserRefresh if self.is_fetching => PollEffect::None,
            PollEvent::UserRefresh => {
                self.is_fetching = true;
                PollEffect::Fetch(CacheMode::Refresh)
            }
            PollEvent::Loaded(value) => {
                self.data = Some(Arc::new(value));
                self.error = None;
                self.is_fetching = false;
                self.updated_at = Some(Utc::now());
                self.failure_count = 0;
                PollEffect::None
            }
            PollEvent::Failed(message) => {
                self.error = Some(message);
                self.is_fetching = false;
                self.failure_count += 1;
                PollEffect::None
            }
        };
        (self, effect)
    }
}
