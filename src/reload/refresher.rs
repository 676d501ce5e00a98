//! Periodic mapping file refresh.
//!
//! # Responsibilities
//! - Poll the source file's modification time on a fixed interval
//! - Reload the store when the file is strictly newer than the snapshot
//! - Keep running through stat and load failures

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::Instrument;

use crate::reload::loader::{modified_time, LoadError};
use crate::reload::store::MappingStore;

/// Result of one refresh check.
#[derive(Debug)]
pub enum TickOutcome {
    /// The file is not newer than the published snapshot.
    Unchanged,
    /// A new snapshot was published.
    Reloaded,
    /// Stat or load failed; the published snapshot is untouched.
    Failed(LoadError),
}

pub struct Refresher {
    store: Arc<MappingStore>,
    interval: Duration,
}

impl Refresher {
    pub fn new(store: Arc<MappingStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run a single refresh check.
    pub fn tick(&self) -> TickOutcome {
        let _entered = self.store.span().enter();
        tracing::debug!("Checking mapping file for changes");

        let modified = match modified_time(self.store.source()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::error!(error = %e, "Failed to check mapping file");
                return TickOutcome::Failed(e);
            }
        };

        if modified <= self.store.current().modified {
            return TickOutcome::Unchanged;
        }

        tracing::info!("Mapping file changed, reloading");
        match self.store.load() {
            Ok(()) => TickOutcome::Reloaded,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = e.kind(),
                    "Failed to reload mapping file. Keeping current mapping."
                );
                TickOutcome::Failed(e)
            }
        }
    }

    /// Tick every interval until `shutdown` fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let span = self.store.span().clone();

        async move {
            tracing::info!(interval = ?self.interval, "Mapping refresh loop starting");

            // The first check happens one full interval after startup.
            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.tick();
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Refresh loop received shutdown signal, exiting loop");
                        break;
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
