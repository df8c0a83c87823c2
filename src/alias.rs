//! Alias Generator — §4.E, the largest component. Dispatches each registry
//! entry to a type-specific expansion strategy and returns the raw (already
//! normalized) alias set that strategy produces. The centralized
//! dangerous-alias filter (§4.F) and insertion-order last-wins rule are
//! applied afterward by the automaton builder, not here — this module's only
//! internal filter is the person strategy's own single-word drop (§4.E step 7),
//! which is part of that strategy's definition, not the general filter.

use crate::classify::is_person;
use crate::config::Strictness;
use crate::diminutives::diminutives_for;
use crate::morphology::MorphologyProvider;
use crate::nameparse::parse;
use crate::normalize::normalize;
use crate::registry::{EntryType, RegistryEntry};
use crate::translit::transliterate;
use std::collections::HashSet;

/// The closed set of per-type expansion strategies (§4.E, §9 "dynamic dispatch
/// over strategies" — a tagged enum rather than a class hierarchy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionStrategy {
    Person,
    Terrorist,
    Extremist,
    Undesirable,
    Organization,
}

/// Decide which strategy governs `entry`. Persons always take the full
/// person expansion regardless of registry type (§4.E: "Person (any type)").
pub fn dispatch(entry: &RegistryEntry) -> ExpansionStrategy {
    if is_person(&entry.name) {
        return ExpansionStrategy::Person;
    }
    match entry.entry_type {
        EntryType::Terrorist | EntryType::TerroristOrExtremist => ExpansionStrategy::Terrorist,
        EntryType::Extremist => ExpansionStrategy::Extremist,
        EntryType::Undesirable => ExpansionStrategy::Undesirable,
        EntryType::ForeignAgent => ExpansionStrategy::Organization,
    }
}

/// Top-level entry point used by the build pipeline (§4.K step: registry →
/// per-row alias generation). Prefers `aliases_precomputed` when present, per
/// §3's RegistryEntry invariant.
pub fn generate_aliases(
    entry: &RegistryEntry,
    morphology: &dyn MorphologyProvider,
    strictness: Strictness,
) -> Vec<String> {
    if let Some(precomputed) = &entry.aliases_precomputed {
        if !precomputed.is_empty() {
            return precomputed.iter().map(|a| normalize(a)).collect();
        }
    }

    match dispatch(entry) {
        ExpansionStrategy::Person => expand_person(&entry.name, morphology, strictness),
        ExpansionStrategy::Terrorist => expand_terrorist(&entry.name, morphology),
        ExpansionStrategy::Extremist => expand_extremist(&entry.name, morphology),
        ExpansionStrategy::Undesirable => expand_undesirable(&entry.name),
        ExpansionStrategy::Organization => expand_organization(&entry.name),
    }
}

fn first_char(s: &str) -> String {
    s.chars().next().map(|c| c.to_string()).unwrap_or_default()
}

fn name_orders(given: &str, patronymic: Option<&str>, surname: &str) -> Vec<String> {
    match patronymic {
        Some(p) => vec![
            format!("{given} {p} {surname}"),
            format!("{given} {surname}"),
            format!("{surname} {given}"),
        ],
        None => vec![format!("{given} {surname}"), format!("{surname} {given}")],
    }
}

fn initials(given: &str, patronymic: Option<&str>, surname: &str) -> Vec<String> {
    let gi = first_char(given);
    let mut out = vec![format!("{gi}. {surname}"), format!("{surname} {gi}.")];
    if let Some(p) = patronymic {
        let pi = first_char(p);
        out.push(format!("{gi}.{pi}. {surname}"));
        out.push(format!("{surname} {gi}.{pi}."));
    }
    out
}

/// Phrase-level declension with adjective-noun agreement (§4.E step 3). The
/// last token is the head noun; every preceding token is inflected to agree
/// with each of the head's case forms. Returns nothing if the head can't be
/// parsed — for persons the morphological branch is simply skipped (§7),
/// there is no suffix fallback here.
fn phrase_morphology_agreed(words: &[&str], morphology: &dyn MorphologyProvider) -> Vec<String> {
    let Some((&head, rest)) = words.split_last() else {
        return Vec::new();
    };
    let head_forms = morphology.lexeme(head);
    if head_forms.is_empty() {
        return Vec::new();
    }

    let mut variants = HashSet::new();
    for head_form in &head_forms {
        let mut agreed_words = Vec::with_capacity(words.len());
        for &word in rest {
            match morphology.agree(word, head_form) {
                Some(agreed) => agreed_words.push(agreed),
                None => agreed_words.push(word.to_lowercase()),
            }
        }
        agreed_words.push(head_form.clone());
        variants.insert(agreed_words.join(" "));
    }
    variants.into_iter().collect()
}

/// Same agreement logic, but falls back to five manual suffix additions on
/// the bare head when morphology can't classify it at all (§7 "declension-
/// heavy strategies"). Used by the organization strategies, never by person
/// expansion.
fn phrase_morphology_with_fallback(words: &[&str], morphology: &dyn MorphologyProvider) -> Vec<String> {
    let Some((&head, rest)) = words.split_last() else {
        return Vec::new();
    };
    let mut head_forms = morphology.lexeme(head);
    if head_forms.is_empty() {
        tracing::warn!(surname = head, "morphological fallback for phrase head");
        let base = head.to_lowercase();
        head_forms = vec![
            base.clone(),
            format!("{base}ого"),
            format!("{base}ому"),
            format!("{base}ым"),
            format!("{base}ом"),
        ];
    }

    let mut variants = HashSet::new();
    for head_form in &head_forms {
        let mut agreed_words = Vec::with_capacity(words.len());
        for &word in rest {
            match morphology.agree(word, head_form) {
                Some(agreed) => agreed_words.push(agreed),
                None => agreed_words.push(word.to_lowercase()),
            }
        }
        agreed_words.push(head_form.clone());
        variants.insert(agreed_words.join(" "));
    }
    variants.into_iter().collect()
}

fn single_word_morphology_with_fallback(word: &str, morphology: &dyn MorphologyProvider) -> Vec<String> {
    let forms = morphology.lexeme(word);
    if !forms.is_empty() {
        return forms;
    }
    tracing::warn!(surname = word, "morphological fallback for single word");
    let base = word.to_lowercase();
    vec![
        base.clone(),
        format!("{base}ого"),
        format!("{base}ому"),
        format!("{base}ым"),
        format!("{base}ом"),
    ]
}

/// The hardest strategy (§4.E "Person expansion"): name orders, initials,
/// phrase morphology of full-name variants, diminutives, transliterations —
/// then normalize, drop every single-word alias, dedupe, and truncate.
fn expand_person(entity_name: &str, morphology: &dyn MorphologyProvider, strictness: Strictness) -> Vec<String> {
    let parsed = parse(entity_name);
    let given = parsed.given.as_str();
    let patronymic = parsed.patronymic.as_deref();
    let surname = parsed.surname.as_str();

    let mut all_variants: Vec<String> = Vec::new();

    let order_variants = name_orders(given, patronymic, surname);
    all_variants.extend(order_variants.iter().cloned());
    all_variants.extend(initials(given, patronymic, surname));

    for variant in &order_variants {
        let words: Vec<&str> = variant.split_whitespace().collect();
        if words.len() >= 2 {
            all_variants.extend(phrase_morphology_agreed(&words, morphology));
        }
    }

    for dim in diminutives_for(given) {
        if let Some(p) = patronymic {
            all_variants.push(format!("{dim} {p} {surname}"));
        }
        all_variants.push(format!("{dim} {surname}"));
    }

    let transliterated: Vec<String> = all_variants.iter().filter_map(|v| transliterate(v)).collect();
    all_variants.extend(transliterated);

    let normalized: Vec<String> = all_variants.iter().map(|v| normalize(v)).collect();

    // §4.E step 7: drop every alias with no space and no dot (bare surnames,
    // bare patronymics, bare diminutives — the dominant false-positive source).
    let filtered: Vec<String> = normalized
        .into_iter()
        .filter(|v| v.contains('.') || v.split_whitespace().count() >= 2)
        .collect();

    let mut unique: Vec<String> = filtered.into_iter().collect::<HashSet<_>>().into_iter().collect();
    unique.sort();
    unique.truncate(strictness.max_aliases());
    unique
}

const ISLAMIC_STATE_ABBREVIATIONS: &[&str] = &["игил", "иг", "isis", "isil", "даиш", "игила", "игилу", "игилом", "игиле"];
const AL_QAEDA_ABBREVIATIONS: &[&str] = &[
    "аль-каида", "аль каида", "al-qaeda", "al qaeda", "аль-каиды", "аль-каиде", "аль-каидой",
];
const TALIBAN_ABBREVIATIONS: &[&str] = &["талибан", "taliban"];

fn expand_terrorist(entity_name: &str, morphology: &dyn MorphologyProvider) -> Vec<String> {
    let normalized_full = normalize(entity_name);
    let mut aliases = vec![normalized_full.clone()];

    let words: Vec<&str> = entity_name.split_whitespace().collect();
    if words.len() >= 2 {
        let key_phrase = &words[words.len() - 2..];
        let prefix = if words.len() > 2 { words[..words.len() - 2].join(" ") } else { String::new() };
        for form in phrase_morphology_with_fallback(key_phrase, morphology) {
            if !prefix.is_empty() {
                aliases.push(normalize(&format!("{prefix} {form}")));
            }
            aliases.push(normalize(&form));
        }
    } else if words.len() == 1 {
        for form in single_word_morphology_with_fallback(words[0], morphology) {
            aliases.push(normalize(&form));
        }
    }

    if normalized_full.contains("исламское государство") || normalized_full.contains("игил") {
        aliases.extend(ISLAMIC_STATE_ABBREVIATIONS.iter().map(|s| s.to_string()));
    }
    if normalized_full.contains("аль-каида") || normalized_full.contains("аль каида") {
        aliases.extend(AL_QAEDA_ABBREVIATIONS.iter().map(|s| s.to_string()));
    }
    if normalized_full.contains("талибан") {
        aliases.extend(TALIBAN_ABBREVIATIONS.iter().map(|s| s.to_string()));
    }

    aliases.into_iter().collect::<HashSet<_>>().into_iter().collect()
}

fn expand_extremist(entity_name: &str, morphology: &dyn MorphologyProvider) -> Vec<String> {
    let normalized_full = normalize(entity_name);
    let mut aliases = vec![normalized_full];

    let words: Vec<&str> = entity_name.split_whitespace().collect();
    if words.len() >= 2 {
        let key_phrase = &words[words.len() - 2..];
        let prefix = if words.len() > 2 { words[..words.len() - 2].join(" ") } else { String::new() };
        for form in phrase_morphology_with_fallback(key_phrase, morphology) {
            if !prefix.is_empty() {
                aliases.push(normalize(&format!("{prefix} {form}")));
            }
            aliases.push(normalize(&form));
        }
    } else if words.len() == 1 {
        for form in single_word_morphology_with_fallback(words[0], morphology) {
            aliases.push(normalize(&form));
        }
    }

    aliases.into_iter().collect::<HashSet<_>>().into_iter().collect()
}

fn expand_undesirable(entity_name: &str) -> Vec<String> {
    let mut aliases = vec![normalize(entity_name)];

    if let (Some(open), Some(close)) = (entity_name.find('('), entity_name.find(')')) {
        if close > open {
            let inner = &entity_name[open + 1..close];
            if !inner.trim().is_empty() {
                aliases.push(normalize(inner));
            }
        }
    }

    aliases.into_iter().collect::<HashSet<_>>().into_iter().collect()
}

fn expand_organization(entity_name: &str) -> Vec<String> {
    vec![normalize(entity_name)]
}
