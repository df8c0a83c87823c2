//! Text normalization shared by alias generation and scanning.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid WHITESPACE_RUN"));

/// Lowercase, fold ё→е, collapse whitespace runs to a single space, trim.
///
/// Dots and hyphens are preserved so initials ("а.п.") and hyphenated surnames
/// survive normalization intact. Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase().replace('ё', "е");
    let collapsed = WHITESPACE_RUN.replace_all(&lowered, " ");
    collapsed.trim().to_string()
}

/// Normalize `s`, returning the result alongside a per-character offset table
/// (§4.A: "byte offsets produced by the scanner are offsets in the normalized
/// text but must be back-translated to the original text"). `map[i]` is the
/// byte offset in `s` where the `i`-th character of the returned string
/// originates; a match ending at normalized char index `map.len()` maps to
/// `s.len()` (end of original text).
pub fn normalize_with_map(s: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(s.len());
    let mut map: Vec<usize> = Vec::with_capacity(s.len());
    let mut in_whitespace_run = false;

    for (byte_idx, ch) in s.char_indices() {
        if ch.is_whitespace() {
            if !in_whitespace_run {
                out.push(' ');
                map.push(byte_idx);
                in_whitespace_run = true;
            }
            continue;
        }
        in_whitespace_run = false;

        let folded = if ch == 'ё' || ch == 'Ё' { 'е' } else { ch };
        for lowered in folded.to_lowercase() {
            out.push(lowered);
            map.push(byte_idx);
        }
    }

    // Trim the single leading/trailing space a whitespace run at either edge
    // would have collapsed to, keeping `out` and `map` in lockstep.
    if out.starts_with(' ') {
        out.remove(0);
        map.remove(0);
    }
    if out.ends_with(' ') {
        out.pop();
        map.pop();
    }

    (out, map)
}

/// Translate a char index into `normalize_with_map`'s output back to a byte
/// offset in the original text that produced it. `original_len` is used when
/// `char_idx` falls at or past the end of the map (e.g. a match ending at the
/// very end of the normalized text).
pub fn map_char_to_original_byte(map: &[usize], char_idx: usize, original_len: usize) -> usize {
    map.get(char_idx).copied().unwrap_or(original_len)
}
