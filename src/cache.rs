//! Persistent Cache — §4.H. Two artifacts per `(csv_stem, strictness)` key:
//! a self-contained bincode snapshot of the compiled alias list, and a
//! sidecar holding the MD5 hash of the registry CSV bytes that produced it.

use crate::automaton::AutomatonIndex;
use crate::config::ScreeningConfig;
use crate::error::ScreeningError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Self-contained snapshot of `AutomatonIndex` (no path references, per
/// §4.H) — the alias texts plus their owning entry ids, rebuilt into a fresh
/// `AhoCorasick` on load rather than serializing the automaton's internal
/// tables directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheBundle {
    pub csv_hash: String,
    pub strictness: String,
    pub patterns: Vec<String>,
    pub entry_ids: Vec<String>,
}

pub fn csv_content_hash(csv_path: &Path) -> Result<String, ScreeningError> {
    let bytes = std::fs::read(csv_path)?;
    Ok(format!("{:x}", md5::compute(bytes)))
}

fn automaton_path(config: &ScreeningConfig) -> PathBuf {
    config.cache_dir.join(format!("{}_automaton.bin", config.cache_key_prefix()))
}

fn hash_path(config: &ScreeningConfig) -> PathBuf {
    config.cache_dir.join(format!("{}_hash.txt", config.cache_key_prefix()))
}

/// Try to load a cache bundle whose sidecar hash matches the current CSV
/// content. Any I/O error, parse error, or hash mismatch is treated as a
/// cache miss — the caller rebuilds from the CSV instead (§7 "cache read
/// failure: warn and rebuild").
pub fn try_load(config: &ScreeningConfig, current_csv_hash: &str) -> Option<AutomatonIndex> {
    let bundle_path = automaton_path(config);
    let hash_file = hash_path(config);

    if !bundle_path.exists() || !hash_file.exists() {
        return None;
    }

    let cached_hash = match std::fs::read_to_string(&hash_file) {
        Ok(h) => h.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read cache hash sidecar; rebuilding");
            return None;
        }
    };

    if cached_hash != current_csv_hash {
        tracing::info!("cache stale (csv content changed); rebuilding");
        return None;
    }

    let bytes = match std::fs::read(&bundle_path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read cache bundle; rebuilding");
            return None;
        }
    };

    match bincode::deserialize::<CacheBundle>(&bytes) {
        Ok(bundle) if bundle.csv_hash == current_csv_hash => {
            tracing::info!(path = %bundle_path.display(), "loaded automaton from cache");
            Some(AutomatonIndex::from_parts(bundle.patterns, bundle.entry_ids))
        }
        Ok(_) => {
            tracing::warn!("cache bundle hash mismatch; rebuilding");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "cache bundle is corrupt; rebuilding");
            None
        }
    }
}

/// Persist `index` and the CSV hash sidecar. Write failures are logged and
/// swallowed — a failed save just means the next startup rebuilds.
pub fn save(config: &ScreeningConfig, index: &AutomatonIndex, csv_hash: &str) {
    if let Err(e) = std::fs::create_dir_all(&config.cache_dir) {
        tracing::warn!(error = %e, "failed to create cache directory; cache not saved");
        return;
    }

    let bundle = CacheBundle {
        csv_hash: csv_hash.to_string(),
        strictness: config.strictness.as_str().to_string(),
        patterns: index.patterns().to_vec(),
        entry_ids: index.entry_ids().to_vec(),
    };

    let bytes = match bincode::serialize(&bundle) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize cache bundle; not saved");
            return;
        }
    };

    if let Err(e) = std::fs::write(automaton_path(config), bytes) {
        tracing::warn!(error = %e, "failed to write cache bundle");
        return;
    }
    if let Err(e) = std::fs::write(hash_path(config), csv_hash) {
        tracing::warn!(error = %e, "failed to write cache hash sidecar");
    }
}
