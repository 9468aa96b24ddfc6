//! Whole-word, case-insensitive term substitution
//!
//! Semantics:
//!
//! - A *word character* is any Unicode alphanumeric character, `_`, or a
//!   combining diacritical mark, so a decomposed `cafe\u{301}` is one word.
//!   Text and terms are expected in the same normalization form (NFC in
//!   practice); a precomposed term does not match decomposed text.
//! - A term matches where the text equals it ignoring case, compared
//!   char by char on Unicode lowercase forms.
//! - If the term starts with a word character, the character before the
//!   match must not be one. Likewise for the last character and the
//!   character after the match. Edges made of punctuation are matched
//!   literally, without a boundary requirement.
//! - The term is literal text; nothing in it is treated as a pattern.
//! - Matches are found left to right and never overlap. Text inserted by
//!   a replacement is not scanned again by the same call.
//! - The replacement is inserted verbatim, without case adjustment.
//! - An empty term matches nothing.

use std::ops::Range;

/// True for characters that glue a word together
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

/// Combining diacritical mark blocks. Marks of alphabetic scripts such as
/// Devanagari vowel signs are already alphabetic.
fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Byte ranges of every whole-word occurrence of `term` in `text`
pub fn find_whole_word(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut matches = Vec::new();

    let (first, last) = match (term.chars().next(), term.chars().next_back()) {
        (Some(first), Some(last)) => (first, last),
        _ => return matches,
    };
    let guard_left = is_word_char(first);
    let guard_right = is_word_char(last);

    let mut pos = 0;
    while pos < text.len() {
        if let Some(end) = match_at(text, pos, term) {
            let left_ok = !guard_left
                || text[..pos]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !is_word_char(c));
            let right_ok = !guard_right
                || text[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_word_char(c));

            if left_ok && right_ok {
                matches.push(pos..end);
                pos = end;
                continue;
            }
        }

        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }

    matches
}

/// Replace every whole-word occurrence of `term` with `replacement`
pub fn replace_whole_word(text: &str, term: &str, replacement: &str) -> String {
    let matches = find_whole_word(text, term);
    if matches.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + matches.len() * replacement.len());
    let mut cursor = 0;
    for range in matches {
        out.push_str(&text[cursor..range.start]);
        out.push_str(replacement);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// End offset of `term` if it matches `text` at byte offset `start`
fn match_at(text: &str, start: usize, term: &str) -> Option<usize> {
    let mut haystack = text[start..].char_indices();

    for expected in term.chars() {
        let (_, actual) = haystack.next()?;
        if !eq_ignore_case(actual, expected) {
            return None;
        }
    }

    Some(match haystack.next() {
        Some((offset, _)) => start + offset,
        None => text.len(),
    })
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
