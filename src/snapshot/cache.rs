//! Per-country snapshot cache.
//!
//! Append-only per key: entries are never evicted, only replaced by a newer
//! computation for the same canonical country. The cache is an explicit value
//! owned by its caller, so every test (or UI session) gets a fresh one.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::ComparisonSnapshot;

/// Time source for cache bookkeeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached snapshot and when it was computed.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: Arc<ComparisonSnapshot>,
    pub computed_at: DateTime<Utc>,
}

pub struct SnapshotCache {
    entries: HashMap<String, CachedSnapshot>,
    clock: Arc<dyn Clock>,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SnapshotCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Cached snapshot for a canonical country name (case-sensitive).
    pub fn get(&self, country: &str) -> Option<Arc<ComparisonSnapshot>> {
        self.entries.get(country).map(|e| Arc::clone(&e.snapshot))
    }

    pub fn entry(&self, country: &str) -> Option<&CachedSnapshot> {
        self.entries.get(country)
    }

    /// Store a snapshot under its own country key, replacing any previous one.
    pub fn insert(&mut self, snapshot: ComparisonSnapshot) -> Arc<ComparisonSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.entries.insert(
            snapshot.country.clone(),
            CachedSnapshot {
                snapshot: Arc::clone(&snapshot),
                computed_at: self.clock.now(),
            },
        );
        snapshot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::TimeZone;

    use crate::domain::WageSeries;

    /// Manually advanced clock.
    pub(crate) struct FixedClock(pub Mutex<DateTime<Utc>>);

    impl FixedClock {
        pub(crate) fn at(year: i32) -> Self {
            Self(Mutex::new(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn snapshot(country: &str) -> ComparisonSnapshot {
        ComparisonSnapshot {
            country: country.to_string(),
            display_name: country.to_string(),
            inflation: None,
            wage: None,
            base_year: None,
            base_nominal: None,
            real_wage: None,
            index: None,
            wage_history: WageSeries::default(),
            inflation_data: None,
        }
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut cache = SnapshotCache::new(Arc::new(FixedClock::at(2024)));
        cache.insert(snapshot("ESP"));
        assert!(cache.get("ESP").is_some());
        assert!(cache.get("esp").is_none());
    }

    #[test]
    fn insert_replaces_and_restamps() {
        let clock = Arc::new(FixedClock::at(2024));
        let mut cache = SnapshotCache::new(clock.clone());
        cache.insert(snapshot("ESP"));
        let first = cache.entry("ESP").unwrap().computed_at;

        *clock.0.lock().unwrap() = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        cache.insert(snapshot("ESP"));

        assert_eq!(cache.len(), 1);
        assert!(cache.entry("ESP").unwrap().computed_at > first);
    }
}
