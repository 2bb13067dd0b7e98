use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Keys tracked before stale entries are swept on the next check.
const SWEEP_AT: usize = 1024;

/// In-memory sliding-window limiter keyed by client (e.g. "contact:<ip>").
pub struct RateLimiter {
    max_attempts: u64,
    window: Duration,
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_attempts: u64, window: Duration) -> Self {
        RateLimiter {
            max_attempts,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<Instant>>> {
        // A panic while holding the lock leaves plain timestamps behind; keep going.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record an attempt and return true if it is under the limit.
    pub fn check_and_record(&self, key: &str) -> bool {
        self.check_and_record_at(key, Instant::now())
    }

    fn check_and_record_at(&self, key: &str, now: Instant) -> bool {
        let mut map = self.entries();
        let cutoff = now.checked_sub(self.window);
        let fresh = |t: &Instant| cutoff.map_or(true, |c| *t > c);

        if map.len() >= SWEEP_AT {
            map.retain(|_, attempts| {
                attempts.retain(|t| fresh(t));
                !attempts.is_empty()
            });
        }

        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| fresh(t));

        if (attempts.len() as u64) < self.max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }
}
