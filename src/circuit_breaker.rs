//! # Circuit Breaker Module
//!
//! This module implements the circuit breaker pattern for AI requests.
//! When the API fails repeatedly, the breaker "opens" and further requests fail fast
//! until the reset timeout has passed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ai_config::RecoveryConfig;

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure_time: Option<Instant>,
}

/// Circuit breaker for AI requests
///
/// # State Machine
///
/// - **Closed**: Normal operation, requests pass through
/// - **Open**: Failure threshold reached, requests fail fast
/// - **Closed again**: after `circuit_breaker_reset_secs` without a new failure
///
/// # Configuration
///
/// Uses `RecoveryConfig` for:
/// - `circuit_breaker_threshold`: Failures before opening (default: 5)
/// - `circuit_breaker_reset_secs`: Time before attempting reset (default: 60s)
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealmind::ai_config::RecoveryConfig;
    /// use mealmind::circuit_breaker::CircuitBreaker;
    ///
    /// let circuit_breaker = CircuitBreaker::new(&RecoveryConfig::default());
    /// assert!(!circuit_breaker.is_open());
    /// ```
    pub fn new(config: &RecoveryConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold: config.circuit_breaker_threshold,
            reset_after: Duration::from_secs(config.circuit_breaker_reset_secs),
        }
    }

    /// Check if the breaker is open (blocking requests)
    ///
    /// Resets to closed once the reset timeout has elapsed since the last failure.
    pub fn is_open(&self) -> bool {
        let mut state = self.lock_state();

        if state.failure_count < self.threshold {
            return false;
        }

        match state.last_failure_time {
            Some(last_time) if last_time.elapsed() < self.reset_after => true,
            _ => {
                *state = BreakerState::default();
                false
            }
        }
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        let mut state = self.lock_state();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_time = Some(Instant::now());
    }

    /// Record a successful request, closing the breaker
    pub fn record_success(&self) {
        *self.lock_state() = BreakerState::default();
    }

    /// Number of failures since the last success or reset
    pub fn failure_count(&self) -> u32 {
        self.lock_state().failure_count
    }

    // A panic while holding the lock leaves plain counters behind, still usable
    fn lock_state(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, reset_secs: u64) -> CircuitBreaker {
        CircuitBreaker::new(&RecoveryConfig {
            circuit_breaker_threshold: threshold,
            circuit_breaker_reset_secs: reset_secs,
            ..Default::default()
        })
    }

    #[test]
    fn test_opens_at_threshold() {
        let cb = breaker(2, 60);
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(cb.is_open());
        assert_eq!(cb.failure_count(), 2);
    }

    #[test]
    fn test_success_closes() {
        let cb = breaker(1, 60);
        cb.record_failure();
        assert!(cb.is_open());

        cb.record_success();
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_resets_after_timeout() {
        let cb = breaker(1, 0);
        cb.record_failure();
        // Zero-second reset window: already elapsed
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }
}
