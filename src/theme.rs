use crate::config::StorageKeys;
use crate::models::{KvStore, Theme};
use crate::schedule::Notice;

/// Anything other than an explicit `"dark"` reads as light.
pub fn load_theme(store: &KvStore, keys: &StorageKeys) -> Theme {
    match store.get(&keys.theme()) {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn store_theme(store: &mut KvStore, keys: &StorageKeys, theme: Theme) {
    store.set(keys.theme(), theme.as_str());
}

pub fn toggle_theme(store: &mut KvStore, keys: &StorageKeys, current: Theme) -> (Theme, Notice) {
    let next = current.toggled();
    store_theme(store, keys, next);
    (next, Notice::ThemeChanged(next))
}
