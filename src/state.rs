use crate::clock::TimeOracle;
use crate::config::{SchedulerConfig, StorageKeys};
use crate::models::{KvStore, Theme};
use crate::schedule::Scheduler;
use crate::theme::load_theme;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything one browser session works against.
pub struct Session {
    pub store: KvStore,
    pub scheduler: Scheduler,
    pub theme: Theme,
}

impl Session {
    pub fn new(store: KvStore, keys: &StorageKeys, oracle: &TimeOracle) -> Self {
        let theme = load_theme(&store, keys);
        let scheduler = Scheduler::load(&store, keys, oracle);
        Self {
            store,
            scheduler,
            theme,
        }
    }

    /// A page load: recomputes today's key and re-reads the day from the store.
    pub fn reload(&mut self, keys: &StorageKeys, oracle: &TimeOracle) -> &Scheduler {
        self.scheduler = Scheduler::load(&self.store, keys, oracle);
        &self.scheduler
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub keys: StorageKeys,
    pub oracle: TimeOracle,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, config: &SchedulerConfig, oracle: TimeOracle, store: KvStore) -> Self {
        let session = Session::new(store, &config.keys, &oracle);
        Self {
            data_path,
            keys: config.keys.clone(),
            oracle,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
