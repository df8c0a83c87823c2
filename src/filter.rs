//! Dangerous-Alias Filter — §4.F.
//!
//! Applied after normalization, before a candidate alias is inserted into the
//! index. Rejects aliases that would cause mass false positives: bare common
//! words, digit/punctuation noise, lone patronymics, and absurdly long
//! variants produced by a runaway expansion step.

use crate::config::Strictness;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Common standalone Russian words that must never stand alone as an alias,
/// ported verbatim from the reference implementation's word list.
static COMMON_RUSSIAN_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "и", "в", "не", "на", "я", "с", "что", "а", "как", "это", "по", "но", "из", "у",
        "от", "за", "для", "при", "же", "к", "о", "до", "бы", "то", "так", "его", "её",
        "их", "он", "она", "оно", "они", "мы", "вы", "ты", "себя", "свой", "весь", "этот",
        "тот", "который", "кто", "что-то", "кто-то", "или", "если", "чтобы", "когда",
        "где", "там", "тут", "здесь", "уже", "ещё", "очень", "только", "даже", "просто",
        "один", "два", "три", "первый", "второй", "новый", "старый", "большой", "малый",
        "хороший", "плохой", "человек", "люди", "время", "год", "день", "жизнь", "дело",
        "работа", "рука", "слово", "место", "вопрос", "дом", "сторона", "город", "страна",
        "мир", "война", "вода", "земля", "случай", "часть", "система", "группа", "форма",
        "власть", "право", "закон", "суд", "государство", "народ", "общество", "партия",
        "движение", "организация", "фонд", "центр", "союз", "совет", "комитет", "комиссия",
        "служба", "орган", "фронт", "партнер", "партнёр", "лидер", "глава", "президент",
        "министр", "депутат", "губернатор", "мэр", "директор", "председатель", "начальник",
        "эксперт", "журналист", "адвокат", "юрист", "активист", "блогер", "автор", "редактор",
        "друг", "брат", "сестра", "отец", "мать", "сын", "дочь", "муж", "жена", "семья",
        "район", "область", "край", "республика", "округ", "регион", "территория", "улица",
        "площадь", "проспект", "переулок", "шоссе", "дорога", "мост", "парк", "сквер",
        "россия", "москва", "петербург", "украина", "беларусь", "европа", "америка",
        "правительство", "парламент", "дума", "администрация", "прокуратура", "полиция",
        "армия", "флот", "церковь", "религия", "вера", "бог", "храм", "монастырь",
        "университет", "институт", "школа", "академия", "колледж", "факультет", "кафедра",
        "компания", "корпорация", "банк", "завод", "фабрика", "предприятие", "бизнес",
        "рынок", "магазин", "торговля", "экономика", "финансы", "бюджет", "налог", "доход",
        "проект", "программа", "план", "стратегия", "политика", "реформа", "кризис",
        "конфликт", "протест", "митинг", "выборы", "голосование", "референдум", "кампания",
    ])
});

/// Given names known to be unambiguous only in a 2+-word context, still
/// allowed as standalone aliases under `balanced` strictness (§4.F, §9).
static BALANCED_ALLOWLIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["навальный", "ходорковский", "пивоваров"]));

const PATRONYMIC_SUFFIXES: &[&str] = &["ович", "евич", "ич", "овна", "евна", "ична"];

fn is_patronymic_like(text: &str) -> bool {
    text.split_whitespace().count() == 1
        && text.chars().count() <= 10
        && PATRONYMIC_SUFFIXES.iter().any(|suf| text.ends_with(suf))
}

fn is_digits_dots_spaces_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '.' || c.is_whitespace())
}

/// Returns `true` when `text` (already normalized) must be rejected as an
/// alias candidate under the given strictness mode.
pub fn is_dangerous_alias(text: &str, strictness: Strictness) -> bool {
    if text.chars().count() < 3 {
        return true;
    }

    if strictness == Strictness::Aggressive {
        return false;
    }

    if is_digits_dots_spaces_only(text) {
        return true;
    }

    if is_patronymic_like(text) {
        return true;
    }

    if text.chars().count() > 35 {
        return true;
    }

    if COMMON_RUSSIAN_WORDS.contains(text) {
        if strictness == Strictness::Balanced && BALANCED_ALLOWLIST.contains(text) {
            return false;
        }
        return true;
    }

    false
}
