use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Per-word miss counters. Entries are always positive; a word with no
/// recorded misses is simply absent.
pub type MistakeStats = BTreeMap<String, u32>;

/// Stable key for a word in the mistake document.
pub fn word_key(hanzi: &str) -> &str {
    hanzi
}

/// File-backed mistake document, the on-device analog of the browser's
/// `literacy.mistakes.v2` local-storage key. All failures degrade to safe
/// defaults: reads fall back to an empty document, writes are best-effort.
pub struct MistakeStore {
    path: PathBuf,
}

impl MistakeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> MistakeStats {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No mistake document");
                return MistakeStats::new();
            }
        };

        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt mistake document, starting fresh");
                return MistakeStats::new();
            }
        };

        let Some(object) = parsed.as_object() else {
            warn!(path = %self.path.display(), "Mistake document is not an object, starting fresh");
            return MistakeStats::new();
        };

        object
            .iter()
            .filter_map(|(key, value)| {
                let count = value.as_u64()?;
                (count > 0).then(|| (key.clone(), count.min(u64::from(u32::MAX)) as u32))
            })
            .collect()
    }

    pub fn save(&self, stats: &MistakeStats) {
        let json = match serde_json::to_string(stats) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize mistake document");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist mistake document");
        }
    }
}

/// Record one miss for `key`. Returns the updated mapping and persists it.
pub fn inc_mistake(store: &MistakeStore, stats: &MistakeStats, key: &str) -> MistakeStats {
    let mut next = stats.clone();
    *next.entry(key.to_string()).or_insert(0) += 1;
    store.save(&next);
    next
}

/// Forgive one miss for `key`. Floors at zero and drops the entry. A key with
/// no recorded misses is returned unchanged and nothing is persisted.
pub fn dec_mistake(store: &MistakeStore, stats: &MistakeStats, key: &str) -> MistakeStats {
    let Some(&current) = stats.get(key) else {
        return stats.clone();
    };
    let mut next = stats.clone();
    if current <= 1 {
        next.remove(key);
    } else {
        next.insert(key.to_string(), current - 1);
    }
    store.save(&next);
    next
}
