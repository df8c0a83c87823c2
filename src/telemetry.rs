//! Telemetry Sink — §4.J. Optional append-only JSONL record of each
//! candidate match, gated by `ENABLE_MATCH_LOGGING`. Write errors are
//! swallowed (warned, never propagated) so a full disk can't break a scan.

use crate::scanner::Candidate;
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const CONTEXT_TRUNCATE_CHARS: usize = 300;

#[derive(Serialize)]
struct TelemetryRecord<'a> {
    timestamp: String,
    alias: &'a str,
    entity_id: &'a str,
    entity_name: &'a str,
    entity_type: &'a str,
    context: String,
    request_id: Option<&'a str>,
}

/// Append-only JSONL sink, one file per UTC day. The write lock serializes
/// concurrent appends from multiple scan workers (§5 shared-resource policy).
/// OS append-atomicity is only guaranteed below `PIPE_BUF`, and telemetry
/// lines can exceed that.
pub struct TelemetrySink {
    log_dir: PathBuf,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl TelemetrySink {
    pub fn new(log_dir: PathBuf, enabled: bool) -> Self {
        Self { log_dir, enabled, write_lock: Mutex::new(()) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn today_log_path(&self) -> PathBuf {
        let today = Utc::now().format("%Y-%m-%d");
        self.log_dir.join(format!("matches-{today}.jsonl"))
    }

    /// Append one record for `candidate`. No-op if telemetry is disabled.
    /// Swallows I/O and serialization failures (§7).
    pub fn record(&self, candidate: &Candidate, request_id: Option<&str>) {
        if !self.enabled {
            return;
        }

        let truncated_context: String = candidate.context.chars().take(CONTEXT_TRUNCATE_CHARS).collect();
        let record = TelemetryRecord {
            timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            alias: &candidate.found_alias,
            entity_id: &candidate.entity_id,
            entity_name: &candidate.entity_name,
            entity_type: &candidate.entity_type,
            context: truncated_context,
            request_id,
        };

        let line = match serde_json::to_string(&record) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize telemetry record");
                return;
            }
        };

        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(e) = std::fs::create_dir_all(&self.log_dir) {
            tracing::warn!(error = %e, "failed to create telemetry log directory");
            return;
        }

        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.today_log_path())
            .and_then(|mut f| writeln!(f, "{line}"));

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write telemetry log");
        }
    }

    /// Delete `matches-YYYY-MM-DD.jsonl` files older than `retention_days`
    /// (§4.J). Run once at startup. Malformed filenames are skipped with a
    /// warning, never treated as fatal.
    pub fn cleanup_old_logs(&self, retention_days: u32) {
        if !self.log_dir.exists() {
            return;
        }

        let cutoff = Utc::now().date_naive() - chrono::Duration::days(retention_days as i64);
        let mut deleted = 0;

        let entries = match std::fs::read_dir(&self.log_dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read telemetry log directory");
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !is_matches_jsonl(&path) {
                continue;
            }
            match log_file_date(&path) {
                Some(date) if date < cutoff => match std::fs::remove_file(&path) {
                    Ok(()) => deleted += 1,
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to delete old telemetry log"),
                },
                Some(_) => {}
                None => tracing::warn!(path = %path.display(), "could not parse telemetry log filename date"),
            }
        }

        if deleted > 0 {
            tracing::info!(deleted, retention_days, "cleaned up old telemetry log files");
        }
    }
}

fn is_matches_jsonl(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("jsonl")
        && path.file_stem().and_then(|s| s.to_str()).is_some_and(|s| s.starts_with("matches-"))
}

fn log_file_date(path: &Path) -> Option<chrono::NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let date_str = stem.strip_prefix("matches-")?;
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_sink_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TelemetrySink::new(dir.path().to_path_buf(), false);
        let candidate = Candidate {
            entity_id: "1".into(),
            entity_name: "Тест".into(),
            entity_type: "foreign_agent".into(),
            found_alias: "тест".into(),
            context: "контекст".into(),
        };
        sink.record(&candidate, None);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn enabled_sink_appends_a_jsonl_line() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TelemetrySink::new(dir.path().to_path_buf(), true);
        let candidate = Candidate {
            entity_id: "1".into(),
            entity_name: "Тест".into(),
            entity_type: "foreign_agent".into(),
            found_alias: "тест".into(),
            context: "контекст".into(),
        };
        sink.record(&candidate, Some("req-1"));

        let path = sink.today_log_path();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"entity_id\":\"1\""));
        assert!(contents.contains("\"request_id\":\"req-1\""));

        let parsed: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        let timestamp = parsed["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'), "timestamp should end in a single Z: {timestamp}");
        assert_eq!(timestamp.matches('Z').count(), 1, "timestamp should have exactly one timezone designator: {timestamp}");
        assert!(!timestamp.contains('+'), "timestamp should not carry a numeric UTC offset alongside Z: {timestamp}");
    }

    #[test]
    fn cleanup_skips_malformed_filenames_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("matches-not-a-date.jsonl"), "").unwrap();
        let sink = TelemetrySink::new(dir.path().to_path_buf(), false);
        sink.cleanup_old_logs(30);
        assert!(dir.path().join("matches-not-a-date.jsonl").exists());
    }

    #[test]
    fn cleanup_removes_files_past_retention() {
        let dir = tempfile::tempdir().unwrap();
        let old_date = (Utc::now().date_naive() - chrono::Duration::days(40)).format("%Y-%m-%d");
        let old_path = dir.path().join(format!("matches-{old_date}.jsonl"));
        std::fs::write(&old_path, "").unwrap();

        let sink = TelemetrySink::new(dir.path().to_path_buf(), false);
        sink.cleanup_old_logs(30);
        assert!(!old_path.exists());
    }
}
