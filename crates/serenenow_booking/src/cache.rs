//! Read-through cache for slot lookups.
//!
//! Keyed by `(expert, service, date|"all", timezone)`. A hit is answered
//! synchronously with no network I/O; a miss is populated by the caller
//! after the fetch. There is no eviction and no TTL: entries accumulate
//! for the lifetime of one orchestrator instance, and a slot taken by a
//! concurrent tab can still be presented as available. The cache is owned
//! by its flow and never shared across unrelated booking attempts.

use std::collections::HashMap;

use chrono::NaiveDate;
use serenenow_common::models::DaySlots;

/// Placeholder date component for "every upcoming date" queries.
pub const ALL_DATES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotCacheKey {
    pub expert_id: String,
    pub service_id: String,
    /// `YYYY-MM-DD`, or [`ALL_DATES`] when no date was given.
    pub date: String,
    pub timezone: String,
}

impl SlotCacheKey {
    pub fn new(
        expert_id: &str,
        service_id: &str,
        date: Option<NaiveDate>,
        timezone: &str,
    ) -> Self {
        Self {
            expert_id: expert_id.to_string(),
            service_id: service_id.to_string(),
            date: date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| ALL_DATES.to_string()),
            timezone: timezone.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SlotCache {
    entries: HashMap<SlotCacheKey, Vec<DaySlots>>,
}

impl SlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SlotCacheKey) -> Option<&Vec<DaySlots>> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: SlotCacheKey, slots: Vec<DaySlots>) {
        self.entries.insert(key, slots);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenenow_common::models::TimeSlot;

    fn day(date: &str) -> DaySlots {
        DaySlots {
            date: date.parse().unwrap(),
            slots: vec![TimeSlot {
                start_time: "10:00".into(),
                available: true,
            }],
        }
    }

    #[test]
    fn dated_and_undated_queries_key_differently() {
        let dated = SlotCacheKey::new(
            "exp_1",
            "svc_1",
            NaiveDate::from_ymd_opt(2024, 12, 1),
            "Asia/Kolkata",
        );
        let undated = SlotCacheKey::new("exp_1", "svc_1", None, "Asia/Kolkata");
        assert_ne!(dated, undated);
        assert_eq!(dated.date, "2024-12-01");
        assert_eq!(undated.date, ALL_DATES);
    }

    #[test]
    fn timezone_is_part_of_the_key() {
        let kolkata = SlotCacheKey::new("exp_1", "svc_1", None, "Asia/Kolkata");
        let london = SlotCacheKey::new("exp_1", "svc_1", None, "Europe/London");
        assert_ne!(kolkata, london);
    }

    #[test]
    fn entries_accumulate_without_eviction() {
        let mut cache = SlotCache::new();
        assert!(cache.is_empty());
        for i in 0..10 {
            let key = SlotCacheKey::new("exp_1", &format!("svc_{i}"), None, "UTC");
            cache.insert(key, vec![day("2024-12-01")]);
        }
        assert_eq!(cache.len(), 10);
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut cache = SlotCache::new();
        let key = SlotCacheKey::new("exp_1", "svc_1", None, "UTC");
        let slots = vec![day("2024-12-01"), day("2024-12-02")];
        cache.insert(key.clone(), slots.clone());
        assert_eq!(cache.get(&key), Some(&slots));
    }
}
