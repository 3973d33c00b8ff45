use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sha2::{Digest, Sha256};

use crate::form::FormStep;

/// Per-IP-per-step submission rate limiter using a fixed window.
pub struct SubmissionRateLimiter {
    /// (step, ip) -> (count, window_start)
    entries: DashMap<(FormStep, IpAddr), (u32, Instant)>,
}

impl SubmissionRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if request is allowed. Returns Ok(()) or Err with retry-after seconds.
    pub fn check(&self, step: FormStep, ip: IpAddr, limit: u32, window_secs: u64) -> Result<(), u64> {
        let window = Duration::from_secs(window_secs);
        let now = Instant::now();

        let mut entry = self.entries.entry((step, ip)).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= limit {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(window_secs.saturating_sub(elapsed).max(1));
        }

        *count += 1;
        Ok(())
    }

    /// Remove stale entries older than the given duration.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

impl Default for SubmissionRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

enum KeyState {
    InFlight,
    Done(Instant),
}

/// Server-side duplicate prevention keyed on the applicant's email and the form step.
///
/// A key is reserved before the record is created, committed on success and
/// released on failure, so a failed delivery can be retried right away.
pub struct IdempotencyGuard {
    entries: DashMap<String, KeyState>,
    window: Duration,
}

/// Held while a delivery is in flight. Dropping it without `commit` frees the key.
pub struct Reservation<'a> {
    guard: &'a IdempotencyGuard,
    key: String,
    committed: bool,
}

impl IdempotencyGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            window,
        }
    }

    /// hex(SHA-256(step ":" normalized email))
    pub fn key(step: FormStep, email: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(step.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(email.trim().to_lowercase().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Reserve `key`, or `None` when it is in flight or was committed inside the window.
    pub fn reserve(&self, key: String) -> Option<Reservation<'_>> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let expired = match occupied.get() {
                    KeyState::InFlight => false,
                    KeyState::Done(at) => at.elapsed() >= self.window,
                };
                if !expired {
                    return None;
                }
                occupied.insert(KeyState::InFlight);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(KeyState::InFlight);
            }
        }

        Some(Reservation {
            guard: self,
            key,
            committed: false,
        })
    }

    /// Drop committed keys whose window has passed.
    pub fn cleanup(&self) {
        self.entries.retain(|_, state| match state {
            KeyState::InFlight => true,
            KeyState::Done(at) => at.elapsed() < self.window,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Reservation<'_> {
    pub fn commit(mut self) {
        self.guard
            .entries
            .insert(self.key.clone(), KeyState::Done(Instant::now()));
        self.committed = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.guard.entries.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip() -> IpAddr {
        IpAddr::from([10, 0, 0, 7])
    }

    #[test]
    fn limiter_blocks_after_limit() {
        let limiter = SubmissionRateLimiter::new();
        assert!(limiter.check(FormStep::One, ip(), 2, 60).is_ok());
        assert!(limiter.check(FormStep::One, ip(), 2, 60).is_ok());
        let retry = limiter.check(FormStep::One, ip(), 2, 60).unwrap_err();
        assert!(retry > 0 && retry <= 60);

        // Other step and other address have their own budget.
        assert!(limiter.check(FormStep::Two, ip(), 2, 60).is_ok());
        assert!(limiter.check(FormStep::One, IpAddr::from([10, 0, 0, 8]), 2, 60).is_ok());
    }

    #[test]
    fn limiter_cleanup_drops_old_windows() {
        let limiter = SubmissionRateLimiter::new();
        limiter.check(FormStep::One, ip(), 1, 60).unwrap();
        limiter.cleanup(Duration::ZERO);
        assert!(limiter.check(FormStep::One, ip(), 1, 60).is_ok());
    }

    #[test]
    fn key_normalizes_email_and_separates_steps() {
        let a = IdempotencyGuard::key(FormStep::One, " Ana@Example.com ");
        let b = IdempotencyGuard::key(FormStep::One, "ana@example.com");
        let c = IdempotencyGuard::key(FormStep::Two, "ana@example.com");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn committed_key_rejects_duplicates() {
        let guard = IdempotencyGuard::new(Duration::from_secs(60));
        let key = IdempotencyGuard::key(FormStep::One, "a@b.com");

        let reservation = guard.reserve(key.clone()).unwrap();
        assert!(guard.reserve(key.clone()).is_none(), "in-flight key must not be reserved twice");
        reservation.commit();

        assert!(guard.reserve(key).is_none());
    }

    #[test]
    fn released_key_can_be_retried() {
        let guard = IdempotencyGuard::new(Duration::from_secs(60));
        let key = IdempotencyGuard::key(FormStep::Two, "a@b.com");

        drop(guard.reserve(key.clone()).unwrap());
        assert!(guard.is_empty());
        assert!(guard.reserve(key).is_some());
    }

    #[test]
    fn expired_key_is_reusable() {
        let guard = IdempotencyGuard::new(Duration::ZERO);
        let key = IdempotencyGuard::key(FormStep::One, "a@b.com");

        guard.reserve(key.clone()).unwrap().commit();
        assert!(guard.reserve(key).is_some());
        guard.cleanup();
    }
}
