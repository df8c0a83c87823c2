//! Startup Orchestrator — §4.K. Loads the registry, drives build-or-load of
//! the automaton, wires the scan/health endpoints. Configuration and the
//! built index are process-lifetime singletons threaded explicitly through
//! this struct rather than hidden behind globals (§9 "Global state").

use crate::alias::generate_aliases;
use crate::automaton::AutomatonBuilder;
use crate::cache;
use crate::config::ScreeningConfig;
use crate::error::ScreeningError;
use crate::filter::is_dangerous_alias;
use crate::morphology::HeuristicMorphology;
use crate::registry::Registry;
use crate::scanner::{self, Candidate};
use crate::telemetry::TelemetrySink;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub alias_mode: &'static str,
}

/// Wires the immutable post-build state (§5): registry, compiled index, and
/// the telemetry sink are all `Arc`-shared so any number of scan callers can
/// read them concurrently without locking.
pub struct ScreeningService {
    config: ScreeningConfig,
    registry: Arc<Registry>,
    index: Arc<crate::automaton::AutomatonIndex>,
    telemetry: Arc<TelemetrySink>,
}

impl ScreeningService {
    /// Load the registry, build-or-load the automaton, run telemetry
    /// retention cleanup. A failure here is fatal at startup (§7).
    pub fn bootstrap(config: ScreeningConfig) -> Result<Self, ScreeningError> {
        tracing::info!(
            strictness = config.strictness.as_str(),
            registry = %config.registry_csv_path.display(),
            "starting registry screening bootstrap"
        );

        let registry = Registry::load_csv(&config.registry_csv_path)?;
        let csv_hash = cache::csv_content_hash(&config.registry_csv_path)?;

        let index = match cache::try_load(&config, &csv_hash) {
            Some(index) => index,
            None => {
                let index = build_index(&registry, config.strictness);
                cache::save(&config, &index, &csv_hash);
                index
            }
        };

        let telemetry = TelemetrySink::new(config.log_dir.clone(), config.enable_match_logging);
        telemetry.cleanup_old_logs(config.log_retention_days);

        tracing::info!(
            entries = registry.entries.len(),
            patterns = index.pattern_count(),
            "registry screening service ready"
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
            index: Arc::new(index),
            telemetry: Arc::new(telemetry),
        })
    }

    /// Scan `text` for candidate mentions (§4.I). Never fails.
    pub fn scan(&self, text: &str, request_id: Option<&str>) -> Vec<Candidate> {
        scanner::scan(text, &self.index, &self.registry, Some(&self.telemetry), request_id)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus { status: "ok", alias_mode: self.config.strictness.as_str() }
    }
}

/// Build the automaton from scratch: generate per-entry aliases in parallel
/// (§5 "build phase is single-threaded... before any request is accepted" —
/// single-threaded with respect to serving, not to internal alias generation;
/// §9 notes rayon fan-out per row as the intended concurrency here), apply
/// the dangerous-alias filter uniformly, then insert into the builder.
fn build_index(registry: &Registry, strictness: crate::config::Strictness) -> crate::automaton::AutomatonIndex {
    let morphology = HeuristicMorphology::new();

    let per_entry: Vec<(String, &'static str, bool, Vec<String>)> = registry
        .entries
        .par_iter()
        .map(|entry| {
            let is_person = crate::classify::is_person(&entry.name);
            let raw_aliases = generate_aliases(entry, &morphology, strictness);
            let kept: Vec<String> = raw_aliases
                .into_iter()
                .filter(|a| !is_dangerous_alias(a, strictness))
                .collect();
            (entry.id.clone(), entry.entry_type.as_str(), is_person, kept)
        })
        .collect();

    let mut builder = AutomatonBuilder::new();
    for (entity_id, entity_type, is_person, aliases) in &per_entry {
        builder.insert_entry(entity_id, entity_type, *is_person, aliases);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strictness;
    use std::io::Write;

    fn config_with_csv(dir: &std::path::Path, csv_contents: &str) -> ScreeningConfig {
        let csv_path = dir.join("registry.csv");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        write!(f, "{csv_contents}").unwrap();
        ScreeningConfig {
            registry_csv_path: csv_path,
            cache_dir: dir.join("cache"),
            log_dir: dir.join("logs"),
            strictness: Strictness::Strict,
            enable_match_logging: false,
            log_retention_days: 30,
        }
    }

    #[test]
    fn bootstrap_builds_and_scans() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_csv(
            dir.path(),
            "id,name,type\n1,Алексей Анатольевич Навальный,иностранный агент\n",
        );
        let service = ScreeningService::bootstrap(config).unwrap();
        let hits = service.scan("Алексей Навальный выступил с заявлением", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity_name, "Алексей Анатольевич Навальный");
    }

    #[test]
    fn bootstrap_then_rebootstrap_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_csv(dir.path(), "id,name,type\n1,Тест Тестов,иноагент\n");
        let _ = ScreeningService::bootstrap(config).unwrap();

        let config2 = config_with_csv(dir.path(), "id,name,type\n1,Тест Тестов,иноагент\n");
        let service2 = ScreeningService::bootstrap(config2).unwrap();
        let hits = service2.scan("Тест Тестов написал статью", None);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn missing_registry_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScreeningConfig {
            registry_csv_path: dir.path().join("missing.csv"),
            cache_dir: dir.path().join("cache"),
            log_dir: dir.path().join("logs"),
            strictness: Strictness::Strict,
            enable_match_logging: false,
            log_retention_days: 30,
        };
        assert!(ScreeningService::bootstrap(config).is_err());
    }

    #[test]
    fn health_reports_current_strictness() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_csv(dir.path(), "id,name,type\n1,Тест Тестов,иноагент\n");
        let service = ScreeningService::bootstrap(config).unwrap();
        let health = service.health();
        assert_eq!(health.status, "ok");
        assert_eq!(health.alias_mode, "strict");
    }
}
