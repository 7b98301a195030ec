// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-interval cadence for reconciliation.
//!
//! Links are recomputed by polling rather than by tracking which geometry
//! changed. Node counts are small (tens to low hundreds), so a full pass once
//! per frame is cheap and keeps the reconciler free of invalidation logic.

use core::time::Duration;

/// One frame at 60 Hz, rounded down.
pub const DEFAULT_RECONCILE_INTERVAL: Duration = Duration::from_millis(16);

/// Decides when the next reconciliation is due.
///
/// Time is passed in as a monotonic timestamp measured from any fixed epoch
/// the host chooses.
///
/// ```rust
/// use core::time::Duration;
/// use doclink_links::ReconcileSchedule;
///
/// let mut schedule = ReconcileSchedule::default();
/// assert!(schedule.poll(Duration::from_millis(0)));
/// assert!(!schedule.poll(Duration::from_millis(10)));
/// assert!(schedule.poll(Duration::from_millis(16)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ReconcileSchedule {
    interval: Duration,
    last_run: Option<Duration>,
}

impl Default for ReconcileSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_RECONCILE_INTERVAL)
    }
}

impl ReconcileSchedule {
    /// Creates a schedule that runs at most once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if a run is due at `now`.
    ///
    /// The first call is always due. A clock that goes backwards makes the
    /// next run due immediately.
    #[must_use]
    pub fn due(&self, now: Duration) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now < last || now - last >= self.interval,
        }
    }

    /// Records a run at `now`.
    pub fn mark_ran(&mut self, now: Duration) {
        self.last_run = Some(now);
    }

    /// Checks [`Self::due`] and, if due, records a run.
    pub fn poll(&mut self, now: Duration) -> bool {
        let due = self.due(now);
        if due {
            self.mark_ran(now);
        }
        due
    }

    /// Forgets the last run so the next poll is due.
    pub fn reset(&mut self) {
        self.last_run = None;
    }
}
