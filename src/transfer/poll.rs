// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bounded polling with exponential backoff.
//!
//! Used to wait for bridge attestations. A probe error counts as "not ready
//! yet" and is logged; only the overall wait budget ends the loop.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::Result;

const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MULTIPLIER: u32 = 2;
const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(20 * 60);

/// Backoff schedule and overall budget for a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub multiplier: u32,
    pub max_interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            multiplier: DEFAULT_MULTIPLIER,
            max_interval: DEFAULT_MAX_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl PollPolicy {
    pub fn next_interval(&self, current: Duration) -> Duration {
        current
            .saturating_mul(self.multiplier.max(1))
            .min(self.max_interval)
    }
}

/// Result of a bounded polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled<T> {
    Ready(T),
    TimedOut { waited: Duration, attempts: u32 },
}

/// Call `probe` until it yields a value or `policy.max_wait` has elapsed.
/// The last probe happens at the deadline.
pub async fn poll_until_ready<T, F, Fut>(policy: &PollPolicy, mut probe: F) -> Polled<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let started = Instant::now();
    let mut interval = policy.initial_interval;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match probe().await {
            Ok(Some(value)) => return Polled::Ready(value),
            Ok(None) => {}
            Err(e) => warn!(attempt = attempts, error = %e, "Poll attempt failed"),
        }

        let waited = started.elapsed();
        if waited >= policy.max_wait {
            return Polled::TimedOut { waited, attempts };
        }

        let sleep_for = interval.min(policy.max_wait - waited);
        debug!(
            attempt = attempts,
            next_poll_ms = sleep_for.as_millis() as u64,
            "Not ready, backing off"
        );
        tokio::time::sleep(sleep_for).await;
        interval = policy.next_interval(interval);
    }
}
