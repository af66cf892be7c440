use crate::errors::AppError;
use crate::models::{DaySchedule, KvStore, TaskRecord};
use serde::Serialize;
use serde_json::Value;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/scheduler.json"))
}

pub async fn load_data(path: &Path) -> KvStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                KvStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => KvStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            KvStore::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &KvStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Nothing stored under the key.
    Missing,
    /// Something stored, but not a JSON object.
    Malformed,
}

/// Result of reading one day's blob. Never an error: unusable data
/// degrades to an empty schedule, tagged with why.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedSchedule {
    Parsed(DaySchedule),
    EmptyDefault(EmptyReason),
}

impl LoadedSchedule {
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            LoadedSchedule::Parsed(_) => None,
            LoadedSchedule::EmptyDefault(reason) => Some(*reason),
        }
    }

    pub fn into_schedule(self) -> DaySchedule {
        match self {
            LoadedSchedule::Parsed(schedule) => schedule,
            LoadedSchedule::EmptyDefault(_) => DaySchedule::new(),
        }
    }
}

pub fn load_schedule(store: &KvStore, key: &str) -> LoadedSchedule {
    let raw = match store.get(key) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return LoadedSchedule::EmptyDefault(EmptyReason::Missing),
    };

    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(_) => return LoadedSchedule::EmptyDefault(EmptyReason::Malformed),
        Err(err) => {
            debug!(key, "stored schedule is not valid JSON: {err}");
            return LoadedSchedule::EmptyDefault(EmptyReason::Malformed);
        }
    };

    let mut schedule = DaySchedule::new();
    for (hour, value) in entries {
        match serde_json::from_value::<TaskRecord>(value) {
            Ok(record) => {
                schedule.insert(hour, record);
            }
            Err(err) => debug!(key, hour = %hour, "skipping unreadable task record: {err}"),
        }
    }
    LoadedSchedule::Parsed(schedule)
}

pub fn save_schedule(
    store: &mut KvStore,
    key: &str,
    schedule: &DaySchedule,
) -> Result<(), serde_json::Error> {
    let blob = serde_json::to_string(schedule)?;
    store.set(key, blob);
    Ok(())
}

pub fn remove_schedule(store: &mut KvStore, key: &str) -> bool {
    store.remove(key)
}
