use crate::errors::ConfigError;
use serde::Serialize;
use std::{env, ops::RangeInclusive};

pub const DEFAULT_START_HOUR: u8 = 9;
pub const DEFAULT_END_HOUR: u8 = 17;
pub const DEFAULT_STORAGE_PREFIX: &str = "workday-scheduler.v2";
pub const DEFAULT_PORT: u16 = 8080;

/// Inclusive range of schedulable hours of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourRange {
    start: u8,
    end: u8,
}

impl HourRange {
    pub fn new(start: u8, end: u8) -> Result<Self, ConfigError> {
        if start > end || end > 23 {
            return Err(ConfigError::InvalidHourRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn contains(&self, hour: u8) -> bool {
        (self.start..=self.end).contains(&hour)
    }

    pub fn hours(&self) -> RangeInclusive<u8> {
        self.start..=self.end
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_HOUR,
            end: DEFAULT_END_HOUR,
        }
    }
}

/// Key names inside the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn tasks(&self, day_key: &str) -> String {
        format!("{}.tasks.{day_key}", self.prefix)
    }

    pub fn theme(&self) -> String {
        format!("{}.theme", self.prefix)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub port: u16,
    pub hours: HourRange,
    pub keys: StorageKeys,
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT", "a port number", DEFAULT_PORT)?;
        let start = parse_var(&lookup, "SCHEDULER_START_HOUR", "an hour 0-23", DEFAULT_START_HOUR)?;
        let end = parse_var(&lookup, "SCHEDULER_END_HOUR", "an hour 0-23", DEFAULT_END_HOUR)?;

        let prefix = lookup("SCHEDULER_STORAGE_PREFIX")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STORAGE_PREFIX.to_string());
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        Ok(Self {
            port,
            hours: HourRange::new(start, end)?,
            keys: StorageKeys::new(prefix),
        })
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            hours: HourRange::default(),
            keys: StorageKeys::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value,
        }),
        None => Ok(default),
    }
}
