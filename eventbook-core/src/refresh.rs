//! Periodic past-flag recomputation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::event::Event;
use crate::slot::EventSlot;
use crate::store::EventStore;

/// Store handle passed to everything that needs the collection concurrently
/// with the refresher.
pub type SharedStore<S, C = SystemClock> = Arc<Mutex<EventStore<S, C>>>;

pub fn shared<S, C>(store: EventStore<S, C>) -> SharedStore<S, C> {
    Arc::new(Mutex::new(store))
}

/// Handle to the background refresh task.
///
/// The task ticks once immediately and then every interval. Each tick works
/// from the slot's current contents, so events written by other processes in
/// the meantime are kept. Call
/// [`stop`](Self::stop) to end it cleanly; dropping the handle aborts it.
pub struct PastFlagRefresher {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PastFlagRefresher {
    /// Spawn the refresh loop on the current tokio runtime.
    ///
    /// `on_change` receives the events whose flag flipped on a tick, after
    /// the change has been persisted.
    pub fn start<S, C, F>(store: SharedStore<S, C>, every: Duration, mut on_change: F) -> Self
    where
        S: EventSlot + 'static,
        C: Clock + 'static,
        F: FnMut(&[Event]) + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let every = every.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }

                let mut guard = store.lock().await;
                match guard.refresh_past_flags() {
                    Ok(changed) if changed.is_empty() => {}
                    Ok(changed) => {
                        let events: Vec<Event> = changed
                            .iter()
                            .filter_map(|id| guard.get(id).cloned())
                            .collect();
                        info!(count = events.len(), "Past flags changed");
                        on_change(&events);
                    }
                    Err(e) => warn!(error = %e, "Past-flag refresh failed"),
                }
            }

            debug!("Past-flag refresher stopped");
        });

        debug!(every_secs = every.as_secs_f64(), "Past-flag refresher started");
        PastFlagRefresher {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signal the loop and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Past-flag refresher ended abnormally");
            }
        }
    }
}

impl Drop for PastFlagRefresher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
