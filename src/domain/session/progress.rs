//! Simulated crawl progress.
//!
//! The crawl gives no real progress signal, so the percentage is advanced
//! on a timer while the request is outstanding and held below completion
//! until the request actually resolves.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Percentage added on each tick.
pub const PROGRESS_STEP: u8 = 5;

/// Ticks never push progress past this value.
pub const PROGRESS_CAP: u8 = 95;

/// Interval between ticks while a crawl is outstanding.
pub const PROGRESS_TICK: Duration = Duration::from_millis(150);

/// Delay between snapping to 100% and resetting to zero.
pub const PROGRESS_RESET_DELAY: Duration = Duration::from_millis(600);

/// Crawl progress percentage (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlProgress(u8);

impl CrawlProgress {
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Advances one step, holding at the cap.
    pub fn tick(&mut self) {
        if self.0 < PROGRESS_CAP {
            self.0 = self.0.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP);
        }
    }

    /// Snaps to 100% once the request has resolved.
    pub fn complete(&mut self) {
        self.0 = 100;
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}
