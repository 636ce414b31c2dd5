use crate::RateLimitMethod;

/// A trailing-edge rate limiter driven by caller-supplied timestamps.
///
/// It does not own a timer. The host reports triggers with [`RateLimiter::trigger`] and asks
/// whether the deferred work is due with [`RateLimiter::poll`], typically from the same frame
/// or timer tick that drives the rest of the UI. Work is never dropped: a burst of triggers
/// always ends in exactly one due poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimiter {
    interval_ms: u64,
    method: RateLimitMethod,
    deadline_ms: Option<u64>,
}

impl RateLimiter {
    pub fn new(interval_ms: u64, method: RateLimitMethod) -> Self {
        Self {
            interval_ms,
            method,
            deadline_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn method(&self) -> RateLimitMethod {
        self.method
    }

    /// Changes the interval and method. A pending deadline is kept as-is.
    pub fn reconfigure(&mut self, interval_ms: u64, method: RateLimitMethod) {
        self.interval_ms = interval_ms;
        self.method = method;
    }

    /// Records a trigger at `now_ms`.
    ///
    /// Returns `true` when the work should run right away, which only happens with a zero
    /// interval. Otherwise the work is deferred until a later [`Self::poll`].
    pub fn trigger(&mut self, now_ms: u64) -> bool {
        if self.interval_ms == 0 {
            self.deadline_ms = None;
            return true;
        }
        let next = now_ms.saturating_add(self.interval_ms);
        self.deadline_ms = match (self.method, self.deadline_ms) {
            (RateLimitMethod::FixedRate, Some(deadline)) => Some(deadline),
            _ => Some(next),
        };
        false
    }

    /// Returns `true` (and disarms) when a deferred run is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms and reports whether a run was pending, regardless of its deadline.
    pub fn take_pending(&mut self) -> bool {
        self.deadline_ms.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT_MS, RateLimitMethod::FixedRate)
    }
}

/// Default coalescing window for visible-slice commits.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 250;
