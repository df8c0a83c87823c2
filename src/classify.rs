//! Name Classifier — decide person vs. organization from a registry entry's name.

const ORG_KEYWORDS: &[&str] = &[
    "фонд",
    "организация",
    "общество",
    "проект",
    "издание",
    "движение",
    "союз",
    "партнерство",
    "центр",
    "институт",
    "комитет",
    "ано",
    "оао",
    "ооо",
    "нко",
    "автономная",
    "некоммерческая",
    "благотворительный",
    "региональн",
    "межрегиональн",
    "общероссийск",
    "объединение",
    "группа",
    "компания",
    "корпорация",
    "ассоциация",
    "террористическ",
    "экстремистск",
    "сообщество",
];

const TWO_WORD_ORG_WORDS: &[&str] = &["государство", "движение", "сообщество", "коммунистическ"];

const PATRONYMIC_ENDINGS: &[&str] = &["ович", "евич", "овна", "евна", "ичем", "ична"];

/// Determine whether `name` looks like a person's full name rather than an
/// organization's title.
pub fn is_person(name: &str) -> bool {
    let lower = name.to_lowercase();
    let words: Vec<&str> = name.split_whitespace().collect();

    if ORG_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }

    if words.len() == 2 && TWO_WORD_ORG_WORDS.iter().any(|w| lower.contains(w)) {
        return false;
    }

    for word in &words {
        let word_lower = word.to_lowercase();
        if word.chars().count() > 5 && PATRONYMIC_ENDINGS.iter().any(|end| word_lower.ends_with(end)) {
            return true;
        }
    }

    if words.len() == 2 && !name.contains('.') && !name.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }

    if words.len() == 3 {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_troika_name_is_person() {
        assert!(is_person("Алексей Анатольевич Навальный"));
    }

    #[test]
    fn two_word_name_is_person() {
        assert!(is_person("Александр Шелест"));
    }

    #[test]
    fn org_keyword_wins_even_with_two_words() {
        assert!(!is_person("Правозащитный фонд"));
    }

    #[test]
    fn two_word_phrase_without_org_keyword_is_still_person() {
        // "Правый сектор" is registered as an extremist organization, but it
        // contains none of the ORG_KEYWORDS/TWO_WORD_ORG_WORDS substrings, so
        // it falls through to the "2 words, no dot, no digit" person branch —
        // matching the reference classifier's own behavior for this name.
        assert!(is_person("Правый сектор"));
    }

    #[test]
    fn islamic_state_is_organization() {
        assert!(!is_person("Исламское государство"));
    }

    #[test]
    fn patronymic_ending_marks_person_regardless_of_word_count() {
        assert!(is_person("Иванов Петр Сидорович Долгий"));
    }

    #[test]
    fn foreign_two_word_name_is_person() {
        assert!(is_person("John Smith"));
    }

    #[test]
    fn org_full_title_is_organization() {
        assert!(!is_person(
            "Межрегиональное общественное объединение Мемориал"
        ));
    }
}
