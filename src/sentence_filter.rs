//! Sentence-level boilerplate removal. Whole sentences mentioning a vendor
//! keyword are dropped; everything else is preserved untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static REPEATED_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Vendor fragments stripped out of display names, applied in order.
static NAME_SCRUB_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "X at LiveAquaria" / "X at LiveAquaria®"
        r"(?i)\s+at\s+LiveAquaria®?",
        // "X LiveAquaria Marine Fish" suffix
        r"(?i)\s+LiveAquaria®?\s+Marine\s+Fish",
        // "LiveAquaria® CCGC Aquacultured X" prefix
        r"(?i)^LiveAquaria®?\s+CCGC\s+Aquacultured\s+",
        // any other leading "LiveAquaria® " product prefix
        r"(?i)^LiveAquaria®?\s+",
        // trailing "– LiveAquaria® CCGC"
        r"(?i)\s*[–—-]+\s*LiveAquaria®?\s*CCGC\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static EDGE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s–—-]+|[\s–—-]+$").unwrap());

/// Strips vendor branding out of a display name: known prefix/suffix phrases,
/// trademark glyphs, then leftover edge dashes and doubled spaces.
pub fn clean_vendor_name(name: &str) -> String {
    let mut result = name.to_string();
    for pattern in NAME_SCRUB_PATTERNS.iter() {
        result = pattern.replace_all(&result, "").into_owned();
    }
    result = result.replace(['®', '™'], "");
    result = EDGE_DASHES.replace_all(&result, "").into_owned();
    REPEATED_WHITESPACE.replace_all(&result, " ").trim().to_string()
}

/// Splits text into sentences. A boundary is a `.`, `!` or `?` immediately
/// followed by whitespace. This is a heuristic, not a tokenizer: abbreviations
/// and decimal numbers followed by whitespace mis-split ("3.5 inches." does
/// not, "approx. 3 inches" does). Scraped catalog prose rarely hits either.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            if let Some(&(next_idx, next_ch)) = chars.peek() {
                if next_ch.is_whitespace() {
                    sentences.push(&text[start..idx + ch.len_utf8()]);
                    start = next_idx;
                }
            }
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn contains_banned(sentence: &str, banned_lower: &[String]) -> bool {
    let sentence_lower = sentence.to_lowercase();
    banned_lower.iter().any(|kw| sentence_lower.contains(kw))
}

/// Removes every sentence containing any of `banned_keywords`
/// (case-insensitive substring match), then strips trademark glyphs and
/// collapses whitespace. Output is never longer than the input; if every
/// sentence is dropped the result is empty.
pub fn strip_bad_sentences(text: &str, banned_keywords: &[&str]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let banned_lower: Vec<String> = banned_keywords.iter().map(|kw| kw.to_lowercase()).collect();

    let kept: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| !contains_banned(s, &banned_lower))
        .map(str::trim_start)
        .collect();

    let mut result = kept.join(" ").trim().to_string();

    // Residual trademark glyphs from brands outside the keyword list
    result = result.replace(['®', '™'], "");
    result = REPEATED_WHITESPACE.replace_all(&result, " ").trim().to_string();

    result
}
