//! # Checkpoint Scheduler
//!
//! A fixed-interval background task that captures the current run state
//! and hands it to a [`CheckpointSink`] while the run remains editable.
//! This is advisory persistence, not transactional: a crash between ticks
//! loses at most one interval of answers.
//!
//! The scheduler is explicitly cancellable. `shutdown()` signals the task
//! over a watch channel and awaits it, so a run leaving its editable
//! state (or the session ending) never leaves an orphaned timer behind.
//!
//! Checkpointing never touches the run's status and performs no
//! validation. Sink failures are logged and skipped — the next tick tries
//! again with fresher state anyway.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::snapshot::RunSnapshot;

/// Error from a checkpoint sink.
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// The sink could not persist the snapshot.
    #[error("checkpoint sink failed: {0}")]
    Sink(String),
}

/// Destination for draft snapshots — the run store's checkpoint face.
///
/// Persistence may be asynchronous from the engine's perspective; the
/// trait is synchronous because the scheduler only needs hand-off, not
/// completion.
pub trait CheckpointSink: Send + Sync + 'static {
    /// Persist a snapshot as the latest durable draft for its run.
    fn persist(&self, snapshot: RunSnapshot) -> Result<(), CheckpointError>;
}

/// Handle to a running checkpoint task.
///
/// Dropping the handle without calling [`Checkpointer::shutdown`] aborts
/// the task via the watch channel closing on the next tick select.
#[derive(Debug)]
pub struct Checkpointer {
    handle: JoinHandle<u64>,
    shutdown: watch::Sender<bool>,
}

impl Checkpointer {
    /// Spawn the checkpoint task.
    ///
    /// Every `period`, the task calls `provider` for the current state.
    /// A `None` (no run in the session) or a snapshot of a non-editable
    /// run skips the tick; otherwise the snapshot goes to the sink. The
    /// first capture happens one full period after spawn.
    pub fn spawn<P, S>(period: Duration, provider: P, sink: S) -> Self
    where
        P: Fn() -> Option<RunSnapshot> + Send + 'static,
        S: CheckpointSink,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut persisted: u64 = 0;

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        // Signalled, or the sender side was dropped.
                        let _ = changed;
                        break;
                    }
                    _ = ticker.tick() => {
                        let Some(snapshot) = provider() else {
                            continue;
                        };
                        if !snapshot.status.is_editable() {
                            tracing::trace!(
                                run = %snapshot.run_id,
                                status = %snapshot.status,
                                "skipping checkpoint of non-editable run"
                            );
                            continue;
                        }
                        let run_id = snapshot.run_id;
                        match sink.persist(snapshot) {
                            Ok(()) => {
                                persisted += 1;
                                tracing::debug!(run = %run_id, total = persisted, "checkpoint persisted");
                            }
                            Err(e) => {
                                tracing::warn!(run = %run_id, "checkpoint persist failed: {e}");
                            }
                        }
                    }
                }
            }

            tracing::debug!(total = persisted, "checkpoint task stopped");
            persisted
        });

        Self { handle, shutdown }
    }

    /// Stop the task and wait for it to finish. Returns how many
    /// snapshots were persisted over the task's lifetime.
    pub async fn shutdown(self) -> u64 {
        // Receiver gone means the task already exited; await it either way.
        let _ = self.shutdown.send(true);
        self.handle.await.unwrap_or(0)
    }

    /// Whether the task has already exited on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
