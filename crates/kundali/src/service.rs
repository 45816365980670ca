//! Request gating in front of the engine.
//!
//! The engine itself keeps no per-caller state. Throttling is a separate
//! component that a service consults before each computation.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::KundaliError;
use crate::input::BirthDetails;
use crate::settings::RateLimitConfig;
use crate::vedic::chart::KundaliEngine;
use crate::vedic::types::KundaliResult;

/// Decides whether a caller may make another request.
pub trait RequestGate: Send + Sync {
    /// Returns `true` and records the request when `key` is under its limit.
    fn check_and_record(&self, key: &str) -> bool;
}

/// A gate that admits everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGate;

impl RequestGate for OpenGate {
    fn check_and_record(&self, _key: &str) -> bool {
        true
    }
}

/// Sliding-window limit of `max_requests` per `window` for each key.
///
/// Keys whose window has drained are swept at most once per window, so the
/// map only holds callers seen recently.
#[derive(Debug)]
pub struct WindowedRateLimiter {
    max_requests: usize,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Debug, Default)]
struct WindowState {
    hits: HashMap<String, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
}

fn prune(queue: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&oldest) = queue.front() {
        if now.saturating_duration_since(oldest) >= window {
            queue.pop_front();
        } else {
            break;
        }
    }
}

impl WindowedRateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        WindowedRateLimiter {
            max_requests,
            window,
            state: Mutex::new(WindowState::default()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Same as [`RequestGate::check_and_record`] with an explicit clock.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let window = self.window;

        let sweep_due = state
            .last_sweep
            .map_or(true, |last| now.saturating_duration_since(last) >= window);
        if sweep_due {
            state.hits.retain(|_, queue| {
                prune(queue, now, window);
                !queue.is_empty()
            });
            state.last_sweep = Some(now);
        }

        let queue = state.hits.entry(key.to_string()).or_default();
        prune(queue, now, window);
        if queue.len() >= self.max_requests {
            log::debug!("Rate limit hit for {} ({} in window)", key, queue.len());
            if queue.is_empty() {
                state.hits.remove(key);
            }
            return false;
        }
        queue.push_back(now);
        true
    }

    /// Number of callers currently holding state.
    pub fn tracked_keys(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .hits
            .len()
    }
}

impl RequestGate for WindowedRateLimiter {
    fn check_and_record(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }
}

/// An engine behind a request gate.
pub struct ChartService<G: RequestGate = WindowedRateLimiter> {
    engine: KundaliEngine,
    gate: G,
}

impl<G: RequestGate> ChartService<G> {
    pub fn new(engine: KundaliEngine, gate: G) -> Self {
        ChartService { engine, gate }
    }

    pub fn engine(&self) -> &KundaliEngine {
        &self.engine
    }

    /// Compute a chart for `caller`, or fail with `RateLimited`.
    pub fn request_chart(&self, caller: &str, details: &BirthDetails) -> Result<KundaliResult, KundaliError> {
        if !self.gate.check_and_record(caller) {
            log::warn!("Rejected chart request from {}: rate limited", caller);
            return Err(KundaliError::RateLimited {
                key: caller.to_string(),
            });
        }
        self.engine.compute(details)
    }
}
