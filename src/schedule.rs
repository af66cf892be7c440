//! Reconciles the in-memory day schedule with the key-value store.
//!
//! A [`Scheduler`] is built by [`Scheduler::load`] and then owns the day's
//! records. Every hour of the configured range always has exactly one record.
//! Saving rewrites the whole day blob; clearing removes it.

use crate::clock::{DayKey, TimeOracle, hour_label};
use crate::config::{HourRange, StorageKeys};
use crate::errors::ScheduleError;
use crate::models::{BlockView, DaySchedule, KvStore, Priority, TaskRecord, Theme};
use crate::storage::{EmptyReason, load_schedule, remove_schedule, save_schedule};
use std::collections::BTreeMap;
use tracing::warn;

/// What the user answered when asked to clear the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearDecision {
    Confirmed,
    Declined,
}

impl From<bool> for ClearDecision {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            ClearDecision::Confirmed
        } else {
            ClearDecision::Declined
        }
    }
}

/// Outcomes worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Cleared,
    ThemeChanged(Theme),
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Saved => "Saved",
            Notice::Cleared => "Cleared",
            Notice::ThemeChanged(Theme::Dark) => "Dark mode on",
            Notice::ThemeChanged(Theme::Light) => "Light mode on",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    day_key: DayKey,
    storage_key: String,
    range: HourRange,
    tasks: BTreeMap<u8, TaskRecord>,
    empty_reason: Option<EmptyReason>,
}

impl Scheduler {
    /// Reads today's blob and fills every hour of the range, defaulting
    /// hours the blob does not cover. Keys outside the range are ignored.
    pub fn load(store: &KvStore, keys: &StorageKeys, oracle: &TimeOracle) -> Self {
        let day_key = oracle.current_day_key();
        let storage_key = keys.tasks(day_key.as_str());
        let range = oracle.range();

        let loaded = load_schedule(store, &storage_key);
        let empty_reason = loaded.empty_reason();
        if empty_reason == Some(EmptyReason::Malformed) {
            warn!(key = %storage_key, "stored schedule is malformed, starting from defaults");
        }

        let stored = loaded.into_schedule();
        let tasks = range
            .hours()
            .map(|hour| {
                let record = stored.get(&hour.to_string()).cloned().unwrap_or_default();
                (hour, record)
            })
            .collect();

        Self {
            day_key,
            storage_key,
            range,
            tasks,
            empty_reason,
        }
    }

    pub fn day_key(&self) -> &DayKey {
        &self.day_key
    }

    pub fn range(&self) -> HourRange {
        self.range
    }

    /// `None` when the day's blob was parsed.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        self.empty_reason
    }

    pub fn record(&self, hour: u8) -> Option<&TaskRecord> {
        self.tasks.get(&hour)
    }

    pub fn records(&self) -> impl Iterator<Item = (u8, &TaskRecord)> {
        self.tasks.iter().map(|(hour, record)| (*hour, record))
    }

    pub fn save_hour(
        &mut self,
        store: &mut KvStore,
        hour: u8,
        text: &str,
        priority: Priority,
    ) -> Result<Notice, ScheduleError> {
        if !self.range.contains(hour) {
            return Err(ScheduleError::HourOutOfRange {
                hour,
                start: self.range.start(),
                end: self.range.end(),
            });
        }

        self.tasks.insert(
            hour,
            TaskRecord {
                text: text.trim().to_string(),
                priority,
            },
        );
        save_schedule(store, &self.storage_key, &self.snapshot())?;
        Ok(Notice::Saved)
    }

    /// Irreversible once confirmed. Declining leaves memory and storage alone.
    pub fn clear_day(&mut self, store: &mut KvStore, decision: ClearDecision) -> Option<Notice> {
        if decision == ClearDecision::Declined {
            return None;
        }

        for record in self.tasks.values_mut() {
            *record = TaskRecord::default();
        }
        remove_schedule(store, &self.storage_key);
        Some(Notice::Cleared)
    }

    pub fn snapshot(&self) -> DaySchedule {
        self.tasks
            .iter()
            .map(|(hour, record)| (hour.to_string(), record.clone()))
            .collect()
    }

    pub fn block(&self, hour: u8, oracle: &TimeOracle) -> Option<BlockView> {
        let record = self.tasks.get(&hour)?;
        Some(BlockView {
            hour,
            label: hour_label(hour),
            state: oracle.classify(hour),
            text: record.text.clone(),
            priority: record.priority,
        })
    }

    pub fn blocks(&self, oracle: &TimeOracle) -> Vec<BlockView> {
        self.range
            .hours()
            .filter_map(|hour| self.block(hour, oracle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, TimeState};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn oracle_at(day: u32, hour: u32) -> TimeOracle {
        let at = NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, 20, 0)
            .unwrap();
        TimeOracle::new(Arc::new(FixedClock(at)), HourRange::default())
    }

    fn today_key() -> String {
        StorageKeys::default().tasks("2026-10-16")
    }

    #[test]
    fn load_covers_exactly_the_range() {
        let mut store = KvStore::default();
        store.set(
            today_key(),
            r#"{"7": {"text": "gym", "priority": "low"}, "12": {"text": "lunch", "priority": "medium"}, "20": {"text": "late", "priority": "high"}}"#,
        );

        let scheduler = Scheduler::load(&store, &StorageKeys::default(), &oracle_at(16, 10));
        let hours: Vec<u8> = scheduler.records().map(|(hour, _)| hour).collect();
        assert_eq!(hours, (9..=17u8).collect::<Vec<_>>());
        assert_eq!(scheduler.record(12).unwrap().text, "lunch");
        assert!(scheduler.record(7).is_none());
        assert!(scheduler.record(20).is_none());
    }

    #[test]
    fn partial_storage_fills_defaults() {
        let mut store = KvStore::default();
        store.set(today_key(), r#"{"9": {"text":"old","priority":"low"}}"#);

        let scheduler = Scheduler::load(&store, &StorageKeys::default(), &oracle_at(16, 10));
        assert_eq!(scheduler.empty_reason(), None);
        assert_eq!(scheduler.record(9).unwrap().text, "old");
        for hour in 10..=17 {
            assert_eq!(scheduler.record(hour), Some(&TaskRecord::default()));
        }
    }

    #[test]
    fn malformed_storage_loads_defaults_with_reason() {
        let mut store = KvStore::default();
        store.set(today_key(), "{{{");

        let scheduler = Scheduler::load(&store, &StorageKeys::default(), &oracle_at(16, 10));
        assert_eq!(scheduler.empty_reason(), Some(EmptyReason::Malformed));
        assert!(scheduler.records().all(|(_, record)| *record == TaskRecord::default()));

        let fresh = Scheduler::load(&KvStore::default(), &StorageKeys::default(), &oracle_at(16, 10));
        assert_eq!(fresh.empty_reason(), Some(EmptyReason::Missing));
    }

    #[test]
    fn save_then_load_round_trips_trimmed_text() {
        let keys = StorageKeys::default();
        let oracle = oracle_at(16, 10);
        let mut store = KvStore::default();

        for (hour, priority) in (9..=17).zip(Priority::ALL.iter().cycle()) {
            let mut scheduler = Scheduler::load(&store, &keys, &oracle);
            let notice = scheduler
                .save_hour(&mut store, hour, &format!("  task {hour}\n"), *priority)
                .unwrap();
            assert_eq!(notice, Notice::Saved);

            let reloaded = Scheduler::load(&store, &keys, &oracle);
            let record = reloaded.record(hour).unwrap();
            assert_eq!(record.text, format!("task {hour}"));
            assert_eq!(record.priority, *priority);
        }
    }

    #[test]
    fn save_drops_out_of_range_keys_from_storage() {
        let keys = StorageKeys::default();
        let mut store = KvStore::default();
        store.set(today_key(), r#"{"20": {"text": "late", "priority": "high"}}"#);

        let mut scheduler = Scheduler::load(&store, &keys, &oracle_at(16, 10));
        scheduler.save_hour(&mut store, 9, "plan", Priority::Low).unwrap();

        let stored = crate::storage::load_schedule(&store, &today_key()).into_schedule();
        assert!(!stored.contains_key("20"));
        assert_eq!(stored.len(), 9);
    }

    #[test]
    fn save_rejects_hours_outside_range() {
        let mut store = KvStore::default();
        let mut scheduler = Scheduler::load(&store, &StorageKeys::default(), &oracle_at(16, 10));
        let err = scheduler.save_hour(&mut store, 18, "overtime", Priority::High).unwrap_err();
        assert!(matches!(err, ScheduleError::HourOutOfRange { hour: 18, start: 9, end: 17 }));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_removes_key_and_resets_records() {
        let keys = StorageKeys::default();
        let oracle = oracle_at(16, 10);
        let mut store = KvStore::default();
        let mut scheduler = Scheduler::load(&store, &keys, &oracle);
        scheduler.save_hour(&mut store, 11, "ship", Priority::High).unwrap();

        let notice = scheduler.clear_day(&mut store, ClearDecision::Confirmed);
        assert_eq!(notice, Some(Notice::Cleared));
        assert!(!store.contains_key(&today_key()));
        assert_eq!(scheduler.record(11), Some(&TaskRecord::default()));

        let reloaded = Scheduler::load(&store, &keys, &oracle);
        assert_eq!(reloaded.empty_reason(), Some(EmptyReason::Missing));
        assert!(reloaded.records().all(|(_, record)| *record == TaskRecord::default()));
    }

    #[test]
    fn declined_clear_changes_nothing() {
        let keys = StorageKeys::default();
        let oracle = oracle_at(16, 10);
        let mut store = KvStore::default();
        let mut scheduler = Scheduler::load(&store, &keys, &oracle);
        scheduler.save_hour(&mut store, 11, "ship", Priority::High).unwrap();

        assert_eq!(scheduler.clear_day(&mut store, ClearDecision::Declined), None);
        assert_eq!(scheduler.record(11).unwrap().text, "ship");

        let reloaded = Scheduler::load(&store, &keys, &oracle);
        assert_eq!(reloaded.record(11).unwrap().text, "ship");
        assert_eq!(reloaded.record(11).unwrap().priority, Priority::High);
    }

    #[test]
    fn days_are_stored_separately() {
        let keys = StorageKeys::default();
        let mut store = KvStore::default();
        let mut today = Scheduler::load(&store, &keys, &oracle_at(16, 10));
        today.save_hour(&mut store, 9, "friday", Priority::Low).unwrap();

        let tomorrow = Scheduler::load(&store, &keys, &oracle_at(17, 10));
        assert_eq!(tomorrow.day_key().as_str(), "2026-10-17");
        assert_eq!(tomorrow.record(9).unwrap().text, "");
    }

    #[test]
    fn afternoon_scenario_reload_shows_saved_present_block() {
        let keys = StorageKeys::default();
        let oracle = oracle_at(16, 14);
        let mut store = KvStore::default();
        let mut scheduler = Scheduler::load(&store, &keys, &oracle);
        scheduler
            .save_hour(&mut store, 14, "Write report", Priority::High)
            .unwrap();

        let blocks = Scheduler::load(&store, &keys, &oracle).blocks(&oracle);
        assert_eq!(blocks.len(), 9);
        let block = blocks.iter().find(|block| block.hour == 14).unwrap();
        assert_eq!(block.text, "Write report");
        assert_eq!(block.priority, Priority::High);
        assert_eq!(block.state, TimeState::Present);
        assert_eq!(blocks[0].state, TimeState::Past);
        assert_eq!(blocks[8].state, TimeState::Future);
        assert_eq!(blocks[0].label, "9:00 AM");
    }

    #[test]
    fn notice_messages() {
        assert_eq!(Notice::Saved.message(), "Saved");
        assert_eq!(Notice::Cleared.message(), "Cleared");
        assert_eq!(Notice::ThemeChanged(Theme::Dark).message(), "Dark mode on");
        assert_eq!(ClearDecision::from(false), ClearDecision::Declined);
    }
}
