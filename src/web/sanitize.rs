// Text cleanup for scraped snippets.
//
// Results are kept only if they read as English: anything carrying CJK or
// Cyrillic codepoints is filtered, and what survives is reduced to plain
// ASCII before it reaches the user.

use std::ops::RangeInclusive;

const NON_ENGLISH_RANGES: &[RangeInclusive<u32>] = &[
    0x0400..=0x04FF, // Cyrillic
    0x3040..=0x30FF, // Hiragana, Katakana
    0x3400..=0x4DBF, // CJK extension A
    0x4E00..=0x9FFF, // CJK unified ideographs
    0xAC00..=0xD7AF, // Hangul syllables
];

const MIN_SENTENCE_WORDS: usize = 4;

pub fn is_non_english_char(c: char) -> bool {
    let code = c as u32;
    NON_ENGLISH_RANGES.iter().any(|range| range.contains(&code))
}

pub fn contains_non_english(text: &str) -> bool {
    text.chars().any(is_non_english_char)
}

/// Plain ASCII words and punctuation, single-spaced.
pub fn sanitize_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => cleaned.push('\''),
            '\u{201C}' | '\u{201D}' => cleaned.push('"'),
            '\u{2013}' | '\u{2014}' => cleaned.push('-'),
            '\u{2026}' => cleaned.push_str("..."),
            c if c.is_ascii_alphanumeric() => cleaned.push(c),
            c if c.is_whitespace() => cleaned.push(' '),
            c if c.is_ascii_punctuation() => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sentences from `text` that look like English prose.
///
/// Used when every result was filtered as non-English: mixed-language
/// snippets often still carry a usable English sentence or two.
pub fn english_sentences(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !contains_non_english(sentence))
        .filter(|sentence| looks_english(sentence))
        .map(sanitize_text)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

fn looks_english(sentence: &str) -> bool {
    let words = sentence.split_whitespace().count();
    if words < MIN_SENTENCE_WORDS {
        return false;
    }

    let letters = sentence.chars().filter(|c| c.is_alphabetic()).count();
    let ascii_letters = sentence.chars().filter(|c| c.is_ascii_alphabetic()).count();
    letters > 0 && ascii_letters * 10 >= letters * 9
}
