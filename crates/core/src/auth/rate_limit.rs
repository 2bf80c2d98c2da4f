//! Per-identifier login attempt limiting.
//!
//! Failed attempts are counted per identifier. Once the count reaches the
//! policy maximum the identifier is locked out for the lockout period. A
//! quiet period longer than the window clears the count.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use log::{debug, info, warn};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    /// Quiet period after which the failure count resets.
    pub window: Duration,
    pub lockout: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::minutes(15),
            lockout: Duration::minutes(30),
        }
    }
}

/// What the limiter remembers about one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    pub attempts: u32,
    pub last_attempt: DateTime<Utc>,
    pub blocked_until: Option<DateTime<Utc>>,
}

/// Key-value storage with per-entry expiry.
///
/// An entry read after its expiry must behave as absent.
pub trait RateLimitStore: Send + Sync {
    fn get(&self, key: &str, now: DateTime<Utc>) -> Option<AttemptRecord>;
    fn put(&self, key: &str, record: AttemptRecord, expires_at: DateTime<Utc>);
    fn remove(&self, key: &str);
    /// Drops every entry expired at `now`.
    fn purge_expired(&self, _now: DateTime<Utc>) {}
}

struct StoredAttempt {
    record: AttemptRecord,
    expires_at: DateTime<Utc>,
}

/// Process-local store backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    entries: DashMap<String, StoredAttempt>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn get(&self, key: &str, now: DateTime<Utc>) -> Option<AttemptRecord> {
        let expired = match self.entries.get(key) {
            Some(stored) if stored.expires_at >= now => return Some(stored.record),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn put(&self, key: &str, record: AttemptRecord, expires_at: DateTime<Utc>) {
        self.entries
            .insert(key.to_string(), StoredAttempt { record, expires_at });
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    fn purge_expired(&self, now: DateTime<Utc>) {
        let before = self.entries.len();
        self.entries.retain(|_, stored| stored.expires_at >= now);
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!("Purged {} expired login attempt record(s)", purged);
        }
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limited: bool,
    /// Whole minutes left on the lockout, rounded up.
    pub remaining_minutes: Option<i64>,
}

impl RateLimitStatus {
    fn open() -> Self {
        Self {
            limited: false,
            remaining_minutes: None,
        }
    }

    fn blocked(remaining: Duration) -> Self {
        Self {
            limited: true,
            remaining_minutes: Some(ceil_minutes(remaining)),
        }
    }
}

fn ceil_minutes(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds().max(0);
    (millis + 59_999) / 60_000
}

pub struct LoginRateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    /// Next time failed attempts sweep the store, once per window.
    next_purge: Mutex<DateTime<Utc>>,
}

impl LoginRateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, policy: RateLimitPolicy) -> Self {
        Self::with_clock(store, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn RateLimitStore>,
        policy: RateLimitPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let next_purge = Mutex::new(clock.now() + policy.window);
        Self {
            store,
            policy,
            clock,
            next_purge,
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    fn expiry_of(&self, record: &AttemptRecord) -> DateTime<Utc> {
        let window_end = record.last_attempt + self.policy.window;
        match record.blocked_until {
            Some(until) if until > window_end => until,
            _ => window_end,
        }
    }

    fn purge_if_due(&self, now: DateTime<Utc>) {
        let Ok(mut next_purge) = self.next_purge.lock() else {
            return;
        };
        if now < *next_purge {
            return;
        }
        *next_purge = now + self.policy.window;
        drop(next_purge);
        self.store.purge_expired(now);
    }

    /// Checks whether `identifier` may attempt a login now.
    ///
    /// Reaching the maximum starts the lockout on the first check after it.
    pub fn check(&self, identifier: &str) -> RateLimitStatus {
        let now = self.clock.now();
        let Some(mut record) = self.store.get(identifier, now) else {
            return RateLimitStatus::open();
        };

        if let Some(until) = record.blocked_until {
            if now < until {
                let status = RateLimitStatus::blocked(until - now);
                debug!(
                    "Login blocked for {}: {:?} minute(s) remaining",
                    identifier, status.remaining_minutes
                );
                return status;
            }
        }

        if now - record.last_attempt > self.policy.window {
            self.store.remove(identifier);
            debug!("Rate limit window expired for {}, resetting", identifier);
            return RateLimitStatus::open();
        }

        if record.attempts >= self.policy.max_attempts {
            record.blocked_until = Some(now + self.policy.lockout);
            self.store.put(identifier, record, self.expiry_of(&record));
            warn!(
                "Max login attempts reached for {}, blocking for {} minute(s)",
                identifier,
                self.policy.lockout.num_minutes()
            );
            return RateLimitStatus::blocked(self.policy.lockout);
        }

        RateLimitStatus::open()
    }

    /// Like [`check`](Self::check), but as an error.
    pub fn ensure_allowed(&self, identifier: &str) -> Result<()> {
        let status = self.check(identifier);
        if status.limited {
            return Err(Error::RateLimited {
                remaining_minutes: status.remaining_minutes.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Success clears the identifier; failure increments its count.
    pub fn record_attempt(&self, identifier: &str, success: bool) {
        if success {
            self.store.remove(identifier);
            info!("Login succeeded for {}, attempts reset", identifier);
            return;
        }

        let now = self.clock.now();
        self.purge_if_due(now);
        let mut record = self
            .store
            .get(identifier, now)
            .unwrap_or(AttemptRecord {
                attempts: 0,
                last_attempt: now,
                blocked_until: None,
            });
        record.attempts += 1;
        record.last_attempt = now;
        self.store.put(identifier, record, self.expiry_of(&record));
        warn!(
            "Failed login for {}, {} attempt(s) recorded",
            identifier, record.attempts
        );
    }

    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        match self.store.get(identifier, self.clock.now()) {
            Some(record) => self.policy.max_attempts.saturating_sub(record.attempts),
            None => self.policy.max_attempts,
        }
    }
}
