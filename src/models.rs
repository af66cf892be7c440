use crate::clock::{NowOffset, TimeState};
use crate::storage::EmptyReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
}

/// One day's records keyed by hour, as stored.
pub type DaySchedule = BTreeMap<String, TaskRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The key-value store the scheduler persists into. Serialized as a flat
/// JSON object of string values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct KvStore {
    entries: BTreeMap<String, String>,
}

impl KvStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockView {
    pub hour: u8,
    pub label: String,
    pub state: TimeState,
    pub text: String,
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
pub struct SaveHourRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub date: String,
    pub day_key: String,
    pub theme: Theme,
    pub empty_reason: Option<EmptyReason>,
    pub blocks: Vec<BlockView>,
    pub now: Option<NowOffset>,
}

#[derive(Debug, Serialize)]
pub struct SaveHourResponse {
    pub block: BlockView,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
    pub status: Option<&'static str>,
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Serialize)]
pub struct HourState {
    pub hour: u8,
    pub state: TimeState,
}

#[derive(Debug, Serialize)]
pub struct NowResponse {
    pub hours: Vec<HourState>,
    pub now: Option<NowOffset>,
    pub focus_hour: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub status: String,
}
