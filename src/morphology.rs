//! Morphology Provider — §4.B.
//!
//! The reference implementation calls out to `pymorphy3`, a dictionary-backed
//! Russian morphological analyzer. This port has no bundled dictionary crate to
//! stand in for it (see DESIGN.md), so it defines a small capability trait and
//! one bundled implementation that declines by suffix paradigm instead of
//! dictionary lookup. The trait boundary means a dictionary-backed provider
//! could be swapped in later without touching the Alias Generator.

use std::collections::HashMap;

/// Russian word → inflected forms, decoupled from any one analyzer.
pub trait MorphologyProvider: Send + Sync {
    /// All distinct case forms (the lexeme) of `word`, lowercase. Empty if the
    /// provider can't classify the word.
    fn lexeme(&self, word: &str) -> Vec<String>;

    /// Decline `word` (an adjective) to agree with `agreement_form`, a case
    /// form of its head noun. `None` if agreement isn't possible.
    fn agree(&self, word: &str, agreement_form: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    MasculineConsonant,
    MasculineSoftSign,
    FeminineA,
    NeuterO,
    AdjectiveMasculine,
    AdjectiveFeminine,
    AdjectiveNeuter,
}

/// Suffix → case table, longest suffix first so `-ый`/`-ий` don't shadow `-ой`.
fn classify(word: &str) -> Option<WordClass> {
    let w = word.to_lowercase();
    if w.ends_with("ая") || w.ends_with("яя") {
        return Some(WordClass::AdjectiveFeminine);
    }
    if w.ends_with("ое") || w.ends_with("ее") {
        return Some(WordClass::AdjectiveNeuter);
    }
    if w.ends_with("ый") || w.ends_with("ий") || w.ends_with("ой") {
        return Some(WordClass::AdjectiveMasculine);
    }
    if w.ends_with('ь') {
        return Some(WordClass::MasculineSoftSign);
    }
    if w.ends_with('а') || w.ends_with('я') {
        return Some(WordClass::FeminineA);
    }
    if w.ends_with('о') || w.ends_with('е') {
        return Some(WordClass::NeuterO);
    }
    if w.chars().last().is_some_and(|c| ('а'..='я').contains(&c) || c == 'й') {
        return Some(WordClass::MasculineConsonant);
    }
    None
}

/// Six singular-case suffixes keyed by case index: nom, gen, dat, acc, ins, prep.
fn noun_paradigm(class: WordClass, stem_chars: usize) -> Option<[&'static str; 6]> {
    match class {
        WordClass::MasculineConsonant => Some(["", "а", "у", "а", "ом", "е"]),
        WordClass::MasculineSoftSign => {
            if stem_chars == 0 {
                None
            } else {
                Some(["ь", "я", "ю", "ь", "ем", "е"])
            }
        }
        WordClass::FeminineA => Some(["а", "ы", "е", "у", "ой", "е"]),
        WordClass::NeuterO => Some(["о", "а", "у", "о", "ом", "е"]),
        _ => None,
    }
}

/// Adjective suffix table by case index, one row per gender class.
fn adjective_paradigm(class: WordClass) -> Option<[&'static str; 6]> {
    match class {
        WordClass::AdjectiveMasculine => Some(["ый", "ого", "ому", "ого", "ым", "ом"]),
        WordClass::AdjectiveFeminine => Some(["ая", "ой", "ой", "ую", "ой", "ой"]),
        WordClass::AdjectiveNeuter => Some(["ое", "ого", "ому", "ое", "ым", "ом"]),
        _ => None,
    }
}

fn strip_suffix_len(class: WordClass) -> usize {
    match class {
        WordClass::MasculineConsonant => 0,
        WordClass::MasculineSoftSign => 1,
        WordClass::FeminineA | WordClass::NeuterO => 1,
        WordClass::AdjectiveMasculine | WordClass::AdjectiveFeminine | WordClass::AdjectiveNeuter => 2,
    }
}

fn stem(word: &str, class: WordClass) -> String {
    let chars: Vec<char> = word.chars().collect();
    let cut = strip_suffix_len(class).min(chars.len());
    chars[..chars.len() - cut].iter().collect()
}

/// Suffix-paradigm declension engine. Covers regular masculine/feminine/neuter
/// nouns and the three adjective gender paradigms used for phrase-morphology
/// agreement (§4.E step 3). Anything it can't classify returns an empty
/// lexeme, which is the morphology-parse-failure path the Alias Generator
/// handles with its five-suffix fallback (§7).
#[derive(Default)]
pub struct HeuristicMorphology;

impl HeuristicMorphology {
    pub fn new() -> Self {
        Self
    }

    fn case_index_for_form(&self, class: WordClass, form_suffix: &str) -> Option<usize> {
        let table = adjective_paradigm(class).or_else(|| noun_paradigm(class, 1))?;
        table.iter().position(|s| *s == form_suffix)
    }
}

impl MorphologyProvider for HeuristicMorphology {
    fn lexeme(&self, word: &str) -> Vec<String> {
        let Some(class) = classify(word) else {
            return Vec::new();
        };
        let Some(table) = noun_paradigm(class, word.chars().count().saturating_sub(strip_suffix_len(class))) else {
            return Vec::new();
        };
        let base = stem(word, class);
        let mut forms: Vec<String> = table.iter().map(|suffix| format!("{base}{suffix}")).collect();
        forms.sort();
        forms.dedup();
        forms
    }

    fn agree(&self, word: &str, agreement_form: &str) -> Option<String> {
        let adj_class = classify(word)?;
        if adjective_paradigm(adj_class).is_none() {
            return None;
        }

        // Figure out which case `agreement_form` represents by checking every
        // noun gender paradigm for a matching suffix against the longest
        // plausible stem.
        let noun_classes = [
            WordClass::MasculineConsonant,
            WordClass::MasculineSoftSign,
            WordClass::FeminineA,
            WordClass::NeuterO,
        ];

        let mut case_idx: Option<usize> = None;
        for &nc in &noun_classes {
            if let Some(table) = noun_paradigm(nc, 1) {
                for (idx, suffix) in table.iter().enumerate() {
                    if !suffix.is_empty() && agreement_form.ends_with(suffix) {
                        case_idx = Some(idx);
                        break;
                    }
                }
            }
            if case_idx.is_some() {
                break;
            }
        }
        // Nominative (empty suffix) is the fallback when nothing else matches.
        let case_idx = case_idx.unwrap_or(0);

        let adj_table = adjective_paradigm(adj_class)?;
        let adj_suffix = adj_table[case_idx];
        let adj_stem = stem(word, adj_class);
        Some(format!("{adj_stem}{adj_suffix}"))
    }
}

/// Stub provider for unit tests of higher-level components: returns a fixed
/// map of word → forms, with no agreement logic beyond echoing the input.
#[derive(Default)]
pub struct StubMorphology {
    forms: HashMap<String, Vec<String>>,
}

impl StubMorphology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forms(mut self, word: &str, forms: &[&str]) -> Self {
        self.forms
            .insert(word.to_lowercase(), forms.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl MorphologyProvider for StubMorphology {
    fn lexeme(&self, word: &str) -> Vec<String> {
        self.forms.get(&word.to_lowercase()).cloned().unwrap_or_default()
    }

    fn agree(&self, word: &str, _agreement_form: &str) -> Option<String> {
        self.forms.get(&word.to_lowercase()).map(|_| word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declines_masculine_consonant_noun() {
        let m = HeuristicMorphology::new();
        let forms = m.lexeme("сектор");
        assert!(forms.contains(&"сектора".to_string()));
        assert!(forms.contains(&"сектору".to_string()));
        assert!(forms.contains(&"сектором".to_string()));
        assert!(forms.contains(&"секторе".to_string()));
    }

    #[test]
    fn declines_feminine_a_noun() {
        let m = HeuristicMorphology::new();
        let forms = m.lexeme("москва");
        assert!(forms.contains(&"москвы".to_string()));
        assert!(forms.contains(&"москве".to_string()));
        assert!(forms.contains(&"москву".to_string()));
    }

    #[test]
    fn agrees_masculine_adjective_with_genitive_noun_form() {
        let m = HeuristicMorphology::new();
        let agreed = m.agree("правый", "сектора").unwrap();
        assert_eq!(agreed, "правого");
    }

    #[test]
    fn unclassifiable_word_has_empty_lexeme() {
        let m = HeuristicMorphology::new();
        assert!(m.lexeme("xyz").is_empty());
    }

    #[test]
    fn stub_provider_returns_configured_forms() {
        let stub = StubMorphology::new().with_forms("навальный", &["навального", "навальному"]);
        assert_eq!(stub.lexeme("Навальный").len(), 2);
        assert!(stub.lexeme("unknown").is_empty());
    }
}
