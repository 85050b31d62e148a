//! Rating eligibility gate
//!
//! A device may rate a given cafe once per cooldown window (seven days by
//! default). The last submission time is kept in a device-local key/value
//! store under `cafe-<id>-last-rating`, as milliseconds since the epoch.
//!
//! This is a convenience limit, not an access control: anyone who clears the
//! store can rate again immediately, and nothing is shared between devices.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::CafeId;
use crate::storage::LocalStorage;

pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

/// Store key holding the last rating time for a cafe
pub fn storage_key(cafe_id: CafeId) -> String {
    format!("cafe-{}-last-rating", cafe_id)
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Allowed,
    Denied {
        last_submission: DateTime<Utc>,
        next_eligible: DateTime<Utc>,
    },
}

impl Eligibility {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Eligibility::Allowed)
    }
}

/// Decides whether this device may rate a cafe right now
#[derive(Debug)]
pub struct EligibilityGate<S> {
    storage: S,
    cooldown: Duration,
}

impl<S: LocalStorage> EligibilityGate<S> {
    pub fn new(storage: S) -> Self {
        Self::with_cooldown(storage, Duration::days(DEFAULT_COOLDOWN_DAYS))
    }

    pub fn with_cooldown(storage: S, cooldown: Duration) -> Self {
        Self { storage, cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Last recorded rating time for a cafe, if any
    ///
    /// Unparseable stored values are treated as absent.
    pub fn last_submission(&self, cafe_id: CafeId) -> Result<Option<DateTime<Utc>>> {
        let key = storage_key(cafe_id);
        let Some(raw) = self.storage.get_item(&key)? else {
            return Ok(None);
        };

        let parsed = raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
        if parsed.is_none() {
            warn!(%key, value = %raw, "Ignoring unreadable last-rating timestamp");
        }
        Ok(parsed)
    }

    pub fn check(&self, cafe_id: CafeId, now: DateTime<Utc>) -> Result<Eligibility> {
        let Some(last) = self.last_submission(cafe_id)? else {
            return Ok(Eligibility::Allowed);
        };

        let Some(next_eligible) = last.checked_add_signed(self.cooldown) else {
            warn!(%cafe_id, %last, "Ignoring last-rating timestamp out of range");
            return Ok(Eligibility::Allowed);
        };
        if now >= next_eligible {
            Ok(Eligibility::Allowed)
        } else {
            Ok(Eligibility::Denied {
                last_submission: last,
                next_eligible,
            })
        }
    }

    pub fn can_submit(&self, cafe_id: CafeId, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.check(cafe_id, now)?.is_allowed())
    }

    /// Remember `now` as the last rating time, replacing any earlier value
    pub fn record_submission(&mut self, cafe_id: CafeId, now: DateTime<Utc>) -> Result<()> {
        let key = storage_key(cafe_id);
        self.storage
            .set_item(&key, &now.timestamp_millis().to_string())?;
        debug!(%key, at = %now, "Recorded rating submission");
        Ok(())
    }
}
