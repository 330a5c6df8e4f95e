//! Boundary-aware pattern compilation for dictionary phrases.
//!
//! The standard `\b` assertion is wrong for phrases ending in Turkish-specific
//! letters once suffix morphology is involved: "Tangı" must match in "Tangı."
//! but not inside "Tangında". Rust's `regex` crate has no lookahead, so the
//! Turkish boundary predicate (next character is not a Latin letter in either
//! script, or end of string) is expressed as a captured one-character tail
//! that the replacement puts back.

use regex::{Captures, NoExpand, Regex};

/// Latin letters of both scripts. Anything else terminates a word for the
/// purposes of Turkish suffix matching.
pub const TURKISH_WORD_CHARS: &str = "A-Za-zÇĞİÖŞÜçğıöşü";

/// Character class matching one non-letter character, as a boundary tail.
pub fn boundary_tail() -> String {
    format!("(?P<tail>[^{}]|$)", TURKISH_WORD_CHARS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Standard word-boundary matching for ASCII-alphabetic phrases.
    WholeWord,
    /// Lookahead-style boundary for phrases ending in Turkish letters.
    TurkishTail,
}

/// A compiled phrase pattern that matches its phrase as a whole unit inside
/// larger text.
pub struct Matcher {
    re: Regex,
    mode: BoundaryMode,
}

/// Compiles a literal phrase into a boundary-aware matcher. All regex
/// metacharacters in the phrase are escaped first.
pub fn compile_pattern(phrase: &str, mode: BoundaryMode) -> Matcher {
    compile_raw(&regex::escape(phrase), mode, false)
}

/// Case-insensitive form of [`compile_pattern`].
pub fn compile_pattern_ci(phrase: &str, mode: BoundaryMode) -> Matcher {
    compile_raw(&regex::escape(phrase), mode, true)
}

/// Compiles an already-escaped pattern fragment. The fragment must not contain
/// capturing groups; the boundary tail uses the only named capture.
pub fn compile_fragment(fragment: &str, mode: BoundaryMode) -> Matcher {
    compile_raw(fragment, mode, false)
}

fn compile_raw(fragment: &str, mode: BoundaryMode, case_insensitive: bool) -> Matcher {
    let flags = if case_insensitive { "(?i)" } else { "" };
    let pattern = match mode {
        BoundaryMode::WholeWord => format!(r"{flags}\b{fragment}\b"),
        BoundaryMode::TurkishTail => format!("{flags}{fragment}{}", boundary_tail()),
    };
    Matcher {
        re: Regex::new(&pattern).unwrap(),
        mode,
    }
}

impl Matcher {
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// Replaces every occurrence with the literal `replacement`, preserving the
    /// boundary character for TurkishTail patterns.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        match self.mode {
            BoundaryMode::WholeWord => self.re.replace_all(text, NoExpand(replacement)).into_owned(),
            BoundaryMode::TurkishTail => self
                .re
                .replace_all(text, |caps: &Captures| {
                    format!("{replacement}{}", &caps["tail"])
                })
                .into_owned(),
        }
    }
}
