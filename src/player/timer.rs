//! A scoped wall-clock deadline, polled cooperatively.
//!
//! Ports the source's signal-based `AlarmContextManager` to an explicit
//! handle passed down the call stack: entering a scope arms a deadline,
//! exiting disarms it, and every long-running routine (reasoner fixpoint,
//! minimax recursion, MCTS playouts) polls [`Timer::check`] at a bounded
//! interval instead of waiting on a signal.

use std::time::{Duration, Instant};

/// Raised by [`Timer::check`] once the deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUp;

impl std::fmt::Display for TimeUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "time up")
    }
}

impl std::error::Error for TimeUp {}

/// An armed deadline. Cheap to clone and to pass by reference through a
/// search's recursion; `check` is the only way to observe it.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    deadline: Instant,
}

impl Timer {
    /// Arms a deadline `budget` from now, minus `buffer` as a safety margin
    /// for the time it takes to actually return the chosen move over the
    /// wire.
    pub fn new(budget: Duration, buffer: Duration) -> Self {
        let budget = budget.saturating_sub(buffer);
        Timer { deadline: Instant::now() + budget }
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn check(&self) -> Result<(), TimeUp> {
        if self.expired() {
            Err(TimeUp)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_timer_with_ample_budget_has_not_expired() {
        let timer = Timer::new(Duration::from_secs(60), Duration::from_secs(1));
        assert!(timer.check().is_ok());
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let timer = Timer::new(Duration::from_secs(0), Duration::from_secs(0));
        assert!(timer.expired());
        assert_eq!(timer.check(), Err(TimeUp));
    }

    #[test]
    fn buffer_larger_than_budget_saturates_to_zero() {
        let timer = Timer::new(Duration::from_secs(1), Duration::from_secs(5));
        assert!(timer.expired());
    }
}
