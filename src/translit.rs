//! Latin transliteration — §4.E step 5.
//!
//! Heuristic, non-invertible Cyrillic→Latin rendering. Not GOST, ISO 9, or BGN;
//! the substitution table and order below are the ones the reference
//! implementation applies after a baseline `transliterate`-library pass, ported
//! here as a direct character table since this crate has no transliteration
//! dependency of its own (the whole point is the few phonetic touch-ups, not
//! faithful round-tripping).

const CYRILLIC_TO_LATIN: &[(&str, &str)] = &[
    ("щ", "shch"),
    ("ё", "yo"),
    ("ю", "yu"),
    ("я", "ya"),
    ("ж", "zh"),
    ("ч", "ch"),
    ("ш", "sh"),
    ("ц", "ts"),
    ("х", "kh"),
    ("а", "a"),
    ("б", "b"),
    ("в", "v"),
    ("г", "g"),
    ("д", "d"),
    ("е", "e"),
    ("з", "z"),
    ("и", "i"),
    ("й", "y"),
    ("к", "k"),
    ("л", "l"),
    ("м", "m"),
    ("н", "n"),
    ("о", "o"),
    ("п", "p"),
    ("р", "r"),
    ("с", "s"),
    ("т", "t"),
    ("у", "u"),
    ("ф", "f"),
    ("ъ", ""),
    ("ы", "y"),
    ("ь", ""),
    ("э", "e"),
];

fn has_cyrillic(s: &str) -> bool {
    s.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

fn base_transliterate(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    'outer: for ch in s.to_lowercase().chars() {
        for (cy, la) in CYRILLIC_TO_LATIN {
            if cy.chars().next() == Some(ch) {
                out.push_str(la);
                continue 'outer;
            }
        }
        out.push(ch);
    }
    out
}

/// Transliterate `variant` (a normalized Cyrillic alias) to Latin, applying
/// the reference implementation's phonetic substitutions in order. Returns
/// `None` if `variant` contains no Cyrillic at all — mixed/pure-Latin input
/// is left to the caller, which skips the variant silently (§7).
pub fn transliterate(variant: &str) -> Option<String> {
    if !has_cyrillic(variant) {
        return None;
    }

    let mut out = base_transliterate(variant);
    out = out.replace('\'', "");
    out = out.replace("yj", "y");
    out = out.replace("ij", "iy");
    out = out.replace("sej", "sey");
    out = out.replace("ju", "yu");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_pure_latin_input() {
        assert_eq!(transliterate("smith"), None);
    }

    #[test]
    fn transliterates_simple_name() {
        let out = transliterate("навальный").unwrap();
        assert!(out.starts_with("naval"));
    }

    #[test]
    fn applies_phonetic_substitutions() {
        let out = transliterate("юрий").unwrap();
        assert_eq!(out, "yuriy");
    }

    #[test]
    fn folds_ij_to_iy() {
        let out = transliterate("дмитрий").unwrap();
        assert!(out.ends_with("iy"), "got {out}");
    }
}
