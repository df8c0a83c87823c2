//! ScreeningConfig — the process-lifetime configuration singleton (§6, §9
//! "Global state"). Parsed once from the environment and threaded explicitly
//! through the orchestrator; inner components never read `std::env` again.

use std::path::PathBuf;
use std::str::FromStr;

/// Recall/precision trade-off profile. Part of the cache key (§4.H).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Current documented rules: §4.E/§4.F exactly as specified.
    Strict,
    /// Relaxes the common-word filter for a small allowlist of multi-word
    /// aliases; does not touch the single-word filter in person expansion.
    Balanced,
    /// Skips the dangerous-alias filter entirely except the `len < 3` floor.
    Aggressive,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Strict => "strict",
            Strictness::Balanced => "balanced",
            Strictness::Aggressive => "aggressive",
        }
    }

    /// Per-entry alias cap (§4.E step 8). Looser modes allow more recall.
    pub fn max_aliases(&self) -> usize {
        match self {
            Strictness::Strict => 100,
            Strictness::Balanced => 150,
            Strictness::Aggressive => 250,
        }
    }
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Strictness::Strict),
            "balanced" => Ok(Strictness::Balanced),
            "aggressive" => Ok(Strictness::Aggressive),
            other => Err(format!("unknown ALIAS_STRICTNESS value: {other}")),
        }
    }
}

/// Process-lifetime configuration, read once at startup (§4.K step 1).
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub registry_csv_path: PathBuf,
    pub cache_dir: PathBuf,
    pub log_dir: PathBuf,
    pub strictness: Strictness,
    pub enable_match_logging: bool,
    pub log_retention_days: u32,
}

impl ScreeningConfig {
    /// Read configuration from the process environment, falling back to the
    /// documented defaults (§6) for anything unset.
    pub fn from_env() -> Self {
        let strictness = std::env::var("ALIAS_STRICTNESS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Strictness::Strict);

        let enable_match_logging = std::env::var("ENABLE_MATCH_LOGGING")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let log_retention_days = std::env::var("LOG_RETENTION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let registry_csv_path = std::env::var("REGISTRY_CSV_PATH")
            .unwrap_or_else(|_| "registry.csv".to_string())
            .into();

        let cache_dir = std::env::var("CACHE_DIR").unwrap_or_else(|_| ".cache".to_string()).into();
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| ".logs".to_string()).into();

        Self {
            registry_csv_path,
            cache_dir,
            log_dir,
            strictness,
            enable_match_logging,
            log_retention_days,
        }
    }

    /// Cache key component derived from the strictness mode and the CSV
    /// file's stem (§4.H).
    pub fn cache_key_prefix(&self) -> String {
        let stem = self
            .registry_csv_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("registry");
        format!("{stem}_{}", self.strictness.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictness_parses_all_three_values() {
        assert_eq!("strict".parse::<Strictness>().unwrap(), Strictness::Strict);
        assert_eq!("balanced".parse::<Strictness>().unwrap(), Strictness::Balanced);
        assert_eq!("aggressive".parse::<Strictness>().unwrap(), Strictness::Aggressive);
    }

    #[test]
    fn strictness_rejects_unknown_values() {
        assert!("loose".parse::<Strictness>().is_err());
    }

    #[test]
    fn cache_key_prefix_uses_csv_stem_and_mode() {
        let cfg = ScreeningConfig {
            registry_csv_path: "data/registry_2026.csv".into(),
            cache_dir: ".cache".into(),
            log_dir: ".logs".into(),
            strictness: Strictness::Balanced,
            enable_match_logging: false,
            log_retention_days: 30,
        };
        assert_eq!(cfg.cache_key_prefix(), "registry_2026_balanced");
    }
}
