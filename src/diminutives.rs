//! Built-in Russian given-name → diminutive table — §4.E step 4.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static DIMINUTIVES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("александр", &["саша", "сашка", "шура", "саня"][..]),
        ("алексей", &["лёша", "леша", "алекс", "лёха", "алёша"][..]),
        ("владимир", &["вова", "вовка", "володя"][..]),
        ("дмитрий", &["дима", "митя", "димка"][..]),
        ("сергей", &["серёжа", "сережа", "серёга"][..]),
        ("андрей", &["андрюша", "дрюша"][..]),
        ("евгений", &["женя", "женька"][..]),
        ("михаил", &["миша", "мишка"][..]),
        ("николай", &["коля", "колька", "николаша"][..]),
        ("иван", &["ваня", "ванька", "ванечка"][..]),
        ("юрий", &["юра", "юрка"][..]),
        ("анна", &["аня", "анька", "нюра"][..]),
        ("мария", &["маша", "машка", "маруся"][..]),
        ("елена", &["лена", "ленка", "алёна"][..]),
        ("ольга", &["оля", "олька"][..]),
        ("татьяна", &["таня", "танька", "танюша"][..]),
        ("наталья", &["наташа", "наташка"][..]),
        ("ирина", &["ира", "ирка"][..]),
        ("екатерина", &["катя", "катюша", "катька"][..]),
    ])
});

/// Diminutive forms for `given_name` (lowercase match), empty if unknown.
pub fn diminutives_for(given_name: &str) -> Vec<&'static str> {
    DIMINUTIVES
        .get(given_name.to_lowercase().as_str())
        .map(|forms| forms.to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_has_diminutives() {
        let forms = diminutives_for("Александр");
        assert!(forms.contains(&"саша"));
        assert!(forms.contains(&"шура"));
    }

    #[test]
    fn unknown_name_has_none() {
        assert!(diminutives_for("Зиновий").is_empty());
    }
}
