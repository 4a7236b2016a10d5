//! Advice-of-the-day cache
//!
//! Keeps the last fetched advice together with the calendar date it was
//! fetched on. A lookup only hits when that date is today.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use super::KeyValueStore;
use crate::data::Advice;

/// Store key for the serialized advice payload
pub const ADVICE_KEY: &str = "advice.daily";

/// Store key for the `YYYY-MM-DD` date stamp
pub const DATE_KEY: &str = "advice.date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar date (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Daily advice cache backed by two independent store entries
///
/// With no store (no cache directory available) every lookup misses and
/// writes are dropped.
#[derive(Debug, Clone)]
pub struct DailyCache {
    store: Option<KeyValueStore>,
}

impl DailyCache {
    /// Creates a cache over `store`
    pub fn new(store: Option<KeyValueStore>) -> Self {
        Self { store }
    }

    /// A cache that never hits
    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Returns today's advice if one was saved today
    pub fn load(&self) -> Option<Advice> {
        self.load_on(today())
    }

    /// Returns the saved advice if its date stamp equals `date`
    ///
    /// Missing entries, a different date and unparseable or empty payloads all
    /// count as a miss.
    pub fn load_on(&self, date: NaiveDate) -> Option<Advice> {
        let store = self.store.as_ref()?;

        let stamp = store.get(DATE_KEY)?;
        if stamp != date.format(DATE_FORMAT).to_string() {
            return None;
        }

        let payload = store.get(ADVICE_KEY)?;
        let advice: Advice = serde_json::from_str(&payload).ok()?;
        if advice.text.is_empty() {
            return None;
        }

        info!(id = ?advice.id, "daily advice cache hit");
        Some(advice)
    }

    /// Stores `advice` as today's advice
    pub fn save(&self, advice: &Advice) {
        self.save_on(advice, today());
    }

    /// Stores `advice` stamped with `date`
    pub fn save_on(&self, advice: &Advice, date: NaiveDate) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let payload = match serde_json::to_string(advice) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize advice: {}", e);
                return;
            }
        };

        if let Err(e) = store.set(ADVICE_KEY, &payload) {
            warn!("failed to write {}: {}", ADVICE_KEY, e);
            return;
        }
        if let Err(e) = store.set(DATE_KEY, &date.format(DATE_FORMAT).to_string()) {
            warn!("failed to write {}: {}", DATE_KEY, e);
            return;
        }
        info!(id = ?advice.id, %date, "saved daily advice");
    }

    /// Forces the next lookup to miss
    ///
    /// Only the date stamp is cleared; the payload stays until the next save
    /// overwrites it.
    pub fn invalidate(&self) {
        if let Some(store) = self.store.as_ref() {
            if let Err(e) = store.remove(DATE_KEY) {
                warn!("failed to clear {}: {}", DATE_KEY, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache() -> (DailyCache, KeyValueStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = KeyValueStore::with_dir(temp_dir.path().to_path_buf());
        (DailyCache::new(Some(store.clone())), store, temp_dir)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_save_then_load_same_day_returns_advice() {
        let (cache, _store, _dir) = create_test_cache();
        let advice = Advice::new("Be kind.", Some(42));

        cache.save_on(&advice, day(2026, 10, 16));

        assert_eq!(cache.load_on(day(2026, 10, 16)), Some(advice));
    }

    #[test]
    fn test_save_then_load_on_current_date_without_id() {
        let (cache, _store, _dir) = create_test_cache();
        let advice = Advice::new("Call your mother.", None);
        let date = today();

        cache.save_on(&advice, date);

        assert_eq!(cache.load_on(date), Some(advice));
    }

    #[test]
    fn test_load_on_another_day_misses() {
        let (cache, _store, _dir) = create_test_cache();
        cache.save_on(&Advice::new("Be kind.", Some(42)), day(2026, 10, 15));

        assert!(cache.load_on(day(2026, 10, 16)).is_none());
    }

    #[test]
    fn test_load_with_nothing_stored_misses() {
        let (cache, _store, _dir) = create_test_cache();
        assert!(cache.load_on(day(2026, 10, 16)).is_none());
    }

    #[test]
    fn test_invalidate_forces_miss() {
        let (cache, store, _dir) = create_test_cache();
        let date = today();
        cache.save_on(&Advice::new("Be kind.", Some(42)), date);

        cache.invalidate();

        assert!(cache.load_on(date).is_none());
        // payload stays behind until the next save
        assert!(store.get(ADVICE_KEY).is_some());
        assert!(store.get(DATE_KEY).is_none());
    }

    #[test]
    fn test_invalidate_on_empty_store_is_harmless() {
        let (cache, _store, _dir) = create_test_cache();
        cache.invalidate();
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_malformed_payload_misses() {
        let (cache, store, _dir) = create_test_cache();
        store.set(DATE_KEY, "2026-10-16").unwrap();
        store.set(ADVICE_KEY, "{not json").unwrap();

        assert!(cache.load_on(day(2026, 10, 16)).is_none());
    }

    #[test]
    fn test_payload_without_text_misses() {
        let (cache, store, _dir) = create_test_cache();
        store.set(DATE_KEY, "2026-10-16").unwrap();

        store.set(ADVICE_KEY, r#"{"id": 3}"#).unwrap();
        assert!(cache.load_on(day(2026, 10, 16)).is_none());

        store.set(ADVICE_KEY, r#"{"text": "", "id": 3}"#).unwrap();
        assert!(cache.load_on(day(2026, 10, 16)).is_none());
    }

    #[test]
    fn test_date_stamp_must_match_exactly() {
        let (cache, store, _dir) = create_test_cache();
        store.set(ADVICE_KEY, r#"{"text": "Be kind."}"#).unwrap();

        store.set(DATE_KEY, "2026-10-16T00:00:00").unwrap();
        assert!(cache.load_on(day(2026, 10, 16)).is_none());

        store.set(DATE_KEY, "2026-10-16").unwrap();
        assert_eq!(
            cache.load_on(day(2026, 10, 16)),
            Some(Advice::new("Be kind.", None))
        );
    }

    #[test]
    fn test_saved_entries_use_documented_format() {
        let (cache, store, _dir) = create_test_cache();
        cache.save_on(&Advice::new("Be kind.", Some(42)), day(2026, 1, 5));

        assert_eq!(store.get(DATE_KEY).as_deref(), Some("2026-01-05"));
        assert_eq!(
            store.get(ADVICE_KEY).as_deref(),
            Some(r#"{"text":"Be kind.","id":42}"#)
        );
    }

    #[test]
    fn test_disabled_cache_always_misses() {
        let cache = DailyCache::disabled();
        cache.save(&Advice::new("Be kind.", None));
        assert!(cache.load().is_none());
        cache.invalidate();
    }
}
