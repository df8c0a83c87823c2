//! Automaton Builder — §4.G. Wraps an `aho-corasick` multi-pattern matcher
//! over the kept aliases, tracking collision and per-entry diagnostics while
//! it accumulates patterns.
//!
//! Insertion-order semantics: a later alias with the same text as an earlier
//! one overwrites the earlier one's payload entirely (§9 open question,
//! resolved in favor of the reference implementation's `pyahocorasick`
//! `add_word` behavior — documented, not changed).

use aho_corasick::AhoCorasick;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Per-entry build diagnostics, emitted as structured log lines (§4.G).
#[derive(Debug, Clone)]
pub struct BuildMetrics {
    pub entity_id: String,
    pub entity_type: &'static str,
    pub alias_count: usize,
    pub single_word_count: usize,
    pub is_person: bool,
}

/// Accumulates aliases for every registry entry, then compiles the
/// multi-pattern matcher. One builder is used per build; consumed by `build`.
#[derive(Default)]
pub struct AutomatonBuilder {
    /// alias text -> owning entry id, last insertion wins.
    payload: HashMap<String, String>,
    /// alias text -> every entry id that ever produced it, for collision
    /// diagnostics even though only the last insertion survives in `payload`.
    collisions: HashMap<String, HashSet<String>>,
    metrics: Vec<BuildMetrics>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the kept aliases for one registry entry (already passed through
    /// the dangerous-alias filter by the caller).
    pub fn insert_entry(&mut self, entity_id: &str, entity_type: &'static str, is_person: bool, aliases: &[String]) {
        let single_word_count = aliases.iter().filter(|a| !a.contains('.') && a.split_whitespace().count() < 2).count();

        for alias in aliases {
            self.payload.insert(alias.clone(), entity_id.to_string());
            self.collisions.entry(alias.clone()).or_default().insert(entity_id.to_string());
        }

        tracing::info!(
            entity_id,
            entity_type,
            alias_count = aliases.len(),
            single_word_count,
            is_person,
            "ALIAS_METRICS"
        );

        self.metrics.push(BuildMetrics {
            entity_id: entity_id.to_string(),
            entity_type,
            alias_count: aliases.len(),
            single_word_count,
            is_person,
        });
    }

    fn log_collisions(&self) {
        for (alias, entity_ids) in &self.collisions {
            if entity_ids.len() > 5 {
                let risk = if entity_ids.len() > 10 { "high" } else { "medium" };
                let sample: Vec<&str> = entity_ids.iter().take(10).map(String::as_str).collect();
                tracing::warn!(alias, entity_count = entity_ids.len(), risk, ?sample, "ALIAS_COLLISION");
            }
        }
    }

    /// Compile the accumulated aliases into an `AutomatonIndex`. Warns past
    /// 90s, and at ~120s this would exceed the documented build-time budget
    /// for ~10^5 patterns (§4.G) — the warning is the only enforcement since
    /// the core never aborts a build that's merely slow.
    pub fn build(self) -> AutomatonIndex {
        self.log_collisions();

        let started = Instant::now();
        let mut patterns: Vec<String> = self.payload.keys().cloned().collect();
        patterns.sort();
        let entry_ids: Vec<String> = patterns.iter().map(|p| self.payload[p].clone()).collect();

        let ac = AhoCorasick::new(&patterns).expect("alias set contains no patterns the automaton can't build");

        let elapsed = started.elapsed();
        if elapsed > Duration::from_secs(90) {
            tracing::warn!(seconds = elapsed.as_secs_f64(), "automaton build time approaching 120s budget");
        }

        AutomatonIndex { ac, patterns, entry_ids, metrics: self.metrics }
    }
}

/// The compiled multi-pattern matcher plus its alias -> entry mapping (§3
/// AutomatonIndex). Immutable once built; safe to share read-only across any
/// number of concurrent scan workers (§5).
pub struct AutomatonIndex {
    ac: AhoCorasick,
    patterns: Vec<String>,
    entry_ids: Vec<String>,
    pub metrics: Vec<BuildMetrics>,
}

/// One raw hit before word-boundary validation (§4.I step 2).
pub struct RawMatch<'a> {
    pub alias_text: &'a str,
    pub entry_id: &'a str,
    pub end: usize,
}

impl AutomatonIndex {
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// All occurrences of the index in `haystack`, including overlapping
    /// matches from different aliases (§4.G/§4.I "all-occurrence reporting",
    /// matching `pyahocorasick.iter()`'s semantics) — `find_iter`'s leftmost
    /// non-overlapping search would silently drop an overlapping alias from a
    /// different entry. Order is the order the underlying matcher yields them
    /// (§5 ordering note: deterministic for a given index and input, no
    /// cross-call guarantee otherwise).
    pub fn find_iter<'a>(&'a self, haystack: &'a str) -> impl Iterator<Item = RawMatch<'a>> + 'a {
        self.ac.find_overlapping_iter(haystack).map(move |m| RawMatch {
            alias_text: &self.patterns[m.pattern().as_usize()],
            entry_id: &self.entry_ids[m.pattern().as_usize()],
            end: m.end(),
        })
    }

    pub(crate) fn from_parts(patterns: Vec<String>, entry_ids: Vec<String>) -> Self {
        let ac = AhoCorasick::new(&patterns).expect("cached alias set contains no patterns the automaton can't build");
        AutomatonIndex { ac, patterns, entry_ids, metrics: Vec::new() }
    }

    pub(crate) fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub(crate) fn entry_ids(&self) -> &[String] {
        &self.entry_ids
    }
}
