//! Run-scoped budget and cancellation primitives
//!
//! One `RunBudget` is shared by every claim task in a run; charging is a
//! single atomic compare-and-swap, so concurrent tasks can never jointly
//! overdraw it. `CancelFlag` is polled by the engine between protocol
//! states, never mid-call.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared, atomic model-call budget for one verification run
#[derive(Debug)]
pub struct RunBudget {
    max_calls: u64,
    used: AtomicU64,
}

impl RunBudget {
    /// Create a budget allowing at most `max_calls` model calls
    pub fn new(max_calls: u64) -> Self {
        Self {
            max_calls,
            used: AtomicU64::new(0),
        }
    }

    /// A budget that never runs out
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Try to reserve one model call
    ///
    /// Returns `false` when the budget is already exhausted. Retries of a
    /// failed call charge again; the budget counts attempts, not successes.
    pub fn try_charge(&self) -> bool {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                if used < self.max_calls {
                    Some(used + 1)
                } else {
                    None
                }
            })
            .is_ok()
    }

    /// Calls charged so far
    pub fn used(&self) -> u64 {
        self.used.load(Ordering::SeqCst)
    }

    /// Calls remaining
    pub fn remaining(&self) -> u64 {
        self.max_calls.saturating_sub(self.used())
    }

    /// Whether no further calls can be charged
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// Cooperative cancellation flag checked between protocol states
#[derive(Debug, Default)]
pub struct CancelFlag {
    cancelled: AtomicBool,
}

impl CancelFlag {
    /// Create a flag in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; in-flight states finish, no new state starts
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
