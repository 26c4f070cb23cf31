//! IdleSessionSweeper - evicts sessions the browser abandoned.
//!
//! Runs on an interval, removes sessions untouched for the idle TTL, and
//! drops their locks.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `idle_ttl` | 1h | Sessions untouched this long are evicted |
//! | `sweep_interval` | 60s | Time between sweeps |

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::{SessionCommandError, SessionLocks};

/// Timing for the [`IdleSessionSweeper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleSweepConfig {
    pub idle_ttl: Duration,
    pub sweep_interval: Duration,
}

pub struct IdleSessionSweeper {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    config: IdleSweepConfig,
}

impl IdleSessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, locks: SessionLocks, config: IdleSweepConfig) -> Self {
        Self {
            store,
            locks,
            config,
        }
    }

    /// Sweeps on the configured interval until `shutdown` turns true or its
    /// sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Idle session sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::warn!(error = %e, "Idle session sweep failed");
                    }
                }
            }
        }
    }

    /// Runs one sweep and returns the evicted session ids.
    pub async fn sweep_once(&self) -> Result<Vec<SessionId>, SessionCommandError> {
        let Some(cutoff) = chrono::Duration::from_std(self.config.idle_ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return Ok(Vec::new());
        };

        let evicted = self.store.remove_idle(cutoff).await?;
        for id in &evicted {
            self.locks.forget(*id).await;
        }
        if !evicted.is_empty() {
            tracing::info!(evicted = evicted.len(), "Evicted idle sessions");
        }
        Ok(evicted)
    }
}
