//! # Background Sweeps
//!
//! Two independent passes over the store:
//!
//! - [`OrderSweeper`] fails Pending orders whose payment window has elapsed.
//! - [`CleanupSweeper`] deletes Canceled/Failed orders and unissued tickets of
//!   showtimes that have already started.
//!
//! Each run is a single sequential pass. Items are written and saved one at a time, and
//! a failure on one item is logged and counted without stopping the pass. Only failures
//! that prevent the pass from starting (bad configuration, unreadable listing) end a run
//! with a [`SweepError`]; the scheduler retries those.

pub mod cleanup_sweeper;
pub mod order_sweeper;

pub use cleanup_sweeper::CleanupSweeper;
pub use order_sweeper::OrderSweeper;

use crate::config::ConfigError;
use crate::order_actor::OrderError;
use crate::showtime_actor::ShowtimeError;
use crate::ticket_actor::TicketError;
use std::fmt::Display;
use thiserror::Error;

/// Outcome of one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Items read from the store.
    pub examined: usize,
    /// Items written (status changed or deleted) and saved.
    pub transitioned: usize,
    /// Items another writer got to first.
    pub skipped: usize,
    /// Items whose write or save failed.
    pub failed: usize,
}

impl SweepReport {
    /// Adds the counts of `other` into `self`.
    pub fn merge(&mut self, other: SweepReport) {
        self.examined += other.examined;
        self.transitioned += other.transitioned;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

impl Display for SweepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "examined={} transitioned={} skipped={} failed={}",
            self.examined, self.transitioned, self.skipped, self.failed
        )
    }
}

/// Run-level sweep failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Order store error: {0}")]
    Orders(#[from] OrderError),

    #[error("Ticket store error: {0}")]
    Tickets(#[from] TicketError),

    #[error("Showtime store error: {0}")]
    Showtimes(#[from] ShowtimeError),
}

/// Per-item outcome, folded into a [`SweepReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Done,
    Skipped,
    Failed,
}

impl SweepReport {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Done => self.transitioned += 1,
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }
}
