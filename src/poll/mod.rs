//! Interval polling of a single resource.
//!
//! A spawned task feeds timer ticks, refresh requests, and fetch results through
//! [`PollState::reduce`] and publishes every new state on a `watch` channel.

mod state;

pub use state::{PollEffect, PollEvent, PollState};

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::{
    select,
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::core::{CacheMode, TfError};

/// A handle for a running poll task.
///
/// Dropping the handle stops the task.
pub struct PollHandle<T> {
    state: watch::Receiver<PollState<T>>,
    refresh_tx: mpsc::Sender<()>,
    stop_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl<T> PollHandle<T> {
    /// A copy of the current state.
    pub fn state(&self) -> PollState<T> {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Fetch now, bypassing the freshness window. Ignored while a fetch is in flight.
    pub async fn refresh(&self) {
        let _ = self.refresh_tx.send(()).await;
    }

    /// Politely ask the poller to stop and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.join).await;
    }

    /// Immediately abort the background task.
    pub fn abort(self) {
        self.join.abort();
    }
}

/// Spawn a poller that calls `fetch` right away and then every `every`.
pub(crate) fn spawn<T, F>(what: &'static str, every: Duration, fetch: F) -> PollHandle<T>
where
    T: Send + Sync + 'static,
    F: Fn(CacheMode) -> BoxFuture<'static, Result<T, TfError>> + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(PollState::<T>::default());
    let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // first tick completes immediately; the mount fetch stands in for it
        ticker.tick().await;

        let mut state = PollState::<T>::default();
        let mut pending = Some(PollEvent::Mount);

        loop {
            if let Some(event) = pending.take() {
                let (next, effect) = state.reduce(event);
                state = next;
                state_tx.send_replace(state.clone());

                if let PollEffect::Fetch(mode) = effect {
                    // stopping abandons the fetch along with any pending retries
                    let result = select! {
                        result = fetch(mode) => result,
                        _ = &mut stop_rx => break,
                    };
                    pending = Some(match result {
                        Ok(value) => PollEvent::Loaded(value),
                        Err(e) => {
                            tracing::warn!(what, error = %e, "poll fetch failed");
                            PollEvent::Failed(e.to_string())
                        }
                    });
                    continue;
                }
            }

            if state_tx.is_closed() {
                break;
            }

            select! {
                _ = ticker.tick() => pending = Some(PollEvent::Tick),
                Some(()) = refresh_rx.recv() => pending = Some(PollEvent::UserRefresh),
                _ = &mut stop_rx => break,
            }
        }
        tracing::debug!(what, "poller stopped");
    });

    PollHandle {
        state: state_rx,
        refresh_tx,
        stop_tx: Some(stop_tx),
        join,
    }
}
