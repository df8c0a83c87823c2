//! Scanner — §4.I. Runs the compiled index over a text, enforces word
//! boundaries, dedupes by entry, and extracts context from the original
//! (un-normalized) input.

use crate::automaton::AutomatonIndex;
use crate::normalize::{map_char_to_original_byte, normalize_with_map};
use crate::registry::Registry;
use crate::telemetry::TelemetrySink;
use serde::Serialize;
use std::collections::HashSet;

const CONTEXT_RADIUS_CHARS: usize = 150;

/// One scanner hit, not yet verified by a downstream human/LLM (§3 Candidate).
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub entity_id: String,
    pub entity_name: String,
    pub entity_type: String,
    pub found_alias: String,
    pub context: String,
}

fn is_boundary_char(c: char) -> bool {
    !c.is_alphanumeric()
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Run `index` over `text`, returning candidates in the order the underlying
/// matcher reports first hits per entry (§5 ordering note). Never fails; an
/// empty result is valid (§4.I step, §7 "scanner input of any content").
pub fn scan(text: &str, index: &AutomatonIndex, registry: &Registry, telemetry: Option<&TelemetrySink>, request_id: Option<&str>) -> Vec<Candidate> {
    let (normalized, map) = normalize_with_map(text);
    let total_original_chars = text.chars().count();

    let mut candidates = Vec::new();
    let mut seen_entity_ids: HashSet<String> = HashSet::new();

    for m in index.find_iter(&normalized) {
        if seen_entity_ids.contains(m.entry_id) {
            continue;
        }

        let end_byte = m.end;
        let alias_char_len = m.alias_text.chars().count();
        let end_char = normalized[..end_byte].chars().count();
        let Some(start_char) = end_char.checked_sub(alias_char_len) else {
            continue;
        };

        // Word boundary check (§4.I step 3): the char immediately before the
        // start and immediately after the end must not exist or be non-alphanumeric.
        let before_ok = start_char == 0 || normalized.chars().nth(start_char - 1).map_or(true, is_boundary_char);
        let after_ok = end_char >= normalized.chars().count() || normalized.chars().nth(end_char).map_or(true, is_boundary_char);
        if !(before_ok && after_ok) {
            continue;
        }

        let Some(entry) = registry.get(m.entry_id) else {
            continue;
        };

        seen_entity_ids.insert(m.entry_id.to_string());

        let orig_start_byte = map_char_to_original_byte(&map, start_char, text.len());
        let orig_end_byte = map_char_to_original_byte(&map, end_char, text.len());

        let orig_start_char = text[..orig_start_byte].chars().count();
        let orig_end_char = text[..orig_end_byte].chars().count();
        let context_start_char = orig_start_char.saturating_sub(CONTEXT_RADIUS_CHARS);
        let context_end_char = (orig_end_char + CONTEXT_RADIUS_CHARS).min(total_original_chars);

        let context_start_byte = char_to_byte(text, context_start_char);
        let context_end_byte = char_to_byte(text, context_end_char);
        let context = text[context_start_byte..context_end_byte].to_string();

        let candidate = Candidate {
            entity_id: entry.id.clone(),
            entity_name: entry.name.clone(),
            entity_type: entry.entry_type.as_str().to_string(),
            found_alias: m.alias_text.to_string(),
            context,
        };

        if let Some(sink) = telemetry {
            sink.record(&candidate, request_id);
        }

        candidates.push(candidate);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;
    use crate::registry::EntryType;
    use crate::registry::RegistryEntry;

    fn registry_with(id: &str, name: &str, entry_type: EntryType) -> Registry {
        Registry {
            entries: vec![RegistryEntry {
                id: id.to_string(),
                name: name.to_string(),
                entry_type,
                aliases_precomputed: None,
                markup_phrase: None,
                legal_basis: None,
            }],
        }
    }

    #[test]
    fn bare_surname_does_not_match_person() {
        let registry = registry_with("1", "Алексей Анатольевич Навальный", EntryType::ForeignAgent);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "foreign_agent", true, &["алексей навальный".to_string(), "алексея анатольевича навального".to_string()]);
        let index = builder.build();

        let hits = scan("Дело Навального слушали", &index, &registry, None, None);
        assert!(hits.is_empty());
    }

    #[test]
    fn full_given_and_surname_matches() {
        let registry = registry_with("1", "Алексей Анатольевич Навальный", EntryType::ForeignAgent);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "foreign_agent", true, &["алексей навальный".to_string()]);
        let index = builder.build();

        let hits = scan("Алексей Навальный выступил", &index, &registry, None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity_name, "Алексей Анатольевич Навальный");
        assert!(hits[0].found_alias.contains("навальный"));
    }

    #[test]
    fn word_boundary_rejects_substring_match() {
        let registry = registry_with("1", "Иг Орг", EntryType::Terrorist);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "terrorist", false, &["иг".to_string()]);
        let index = builder.build();

        let hits = scan("молоко игорь пьет", &index, &registry, None, None);
        assert!(hits.is_empty());
    }

    #[test]
    fn dedups_by_entity_id_keeping_first_hit() {
        let registry = registry_with("1", "Правый сектор", EntryType::Extremist);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "extremist", false, &["правый сектор".to_string(), "правого сектора".to_string()]);
        let index = builder.build();

        let hits = scan("правый сектор снова упомянул правого сектора", &index, &registry, None, None);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn context_is_sliced_from_original_not_normalized_text() {
        let registry = registry_with("1", "Навальный", EntryType::ForeignAgent);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "foreign_agent", false, &["а. навальный".to_string()]);
        let index = builder.build();

        let hits = scan("Вчера А. Навальный выступил с речью", &index, &registry, None, None);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].context.contains("А. Навальный"));
    }

    #[test]
    fn overlapping_aliases_from_two_entries_both_surface() {
        let registry = Registry {
            entries: vec![
                RegistryEntry {
                    id: "1".to_string(),
                    name: "Правый сектор".to_string(),
                    entry_type: EntryType::Extremist,
                    aliases_precomputed: None,
                    markup_phrase: None,
                    legal_basis: None,
                },
                RegistryEntry {
                    id: "2".to_string(),
                    name: "Некий Сектор".to_string(),
                    entry_type: EntryType::ForeignAgent,
                    aliases_precomputed: None,
                    markup_phrase: None,
                    legal_basis: None,
                },
            ],
        };
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "extremist", false, &["правого сектора".to_string()]);
        builder.insert_entry("2", "foreign_agent", false, &["сектора".to_string()]);
        let index = builder.build();

        let hits = scan("активисты правого сектора собрались", &index, &registry, None, None);
        let entity_ids: HashSet<&str> = hits.iter().map(|c| c.entity_id.as_str()).collect();
        assert!(entity_ids.contains("1"), "overlapping alias from entry 1 should still be reported");
        assert!(entity_ids.contains("2"), "overlapping alias from entry 2 should not be shadowed by entry 1's match");
    }

    #[test]
    fn empty_text_returns_empty_list() {
        let registry = registry_with("1", "Навальный", EntryType::ForeignAgent);
        let mut builder = AutomatonBuilder::new();
        builder.insert_entry("1", "foreign_agent", false, &["навальный".to_string()]);
        let index = builder.build();

        assert!(scan("", &index, &registry, None, None).is_empty());
    }
}
