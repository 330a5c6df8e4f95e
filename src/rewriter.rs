//! The text rewriter: restores canonical species names inside mistranslated
//! prose. Four ordered passes, each feeding the next; the whole function is
//! total (no pass can fail, unmatched phrases are left alone) and idempotent.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::dictionary::{
    PhraseEntry, CONTEXT_SCOPED_SOURCES, DESCRIPTORS_BY_SPECIFICITY, FISH_TYPE_COMPOUNDS,
    FISH_TYPE_WORDS,
};
use crate::matcher::{self, compile_fragment, compile_pattern, BoundaryMode, Matcher};
use crate::variants::VariantMap;

/// Turkish plural/possessive endings that can ride on a fish-type token.
/// Longest alternatives first so the regex engine never settles for a prefix.
const NOUN_SUFFIXES: &str = "ların|lerin|ları|leri|lar|ler|ın|in|ı|i";

struct VariantRule {
    needle: String,
    re: Regex,
    canonical: String,
}

pub struct TextRewriter {
    variant_rules: Vec<VariantRule>,
    compounds: &'static [PhraseEntry],
    descriptor_re: Regex,
    descriptor_targets: HashMap<&'static str, &'static str>,
    tang_rules: Vec<(Matcher, &'static str)>,
    fairy_before_wrasse: Regex,
    fairy_possessive: Regex,
    surgeon_context: Regex,
}

impl TextRewriter {
    pub fn new(variants: &VariantMap) -> Self {
        let variant_rules = variants
            .entries_longest_first()
            .into_iter()
            .map(|(key, canonical)| VariantRule {
                needle: key.to_string(),
                re: Regex::new(&format!("(?i){}", regex::escape(key))).unwrap(),
                canonical: canonical.to_string(),
            })
            .collect();

        let descriptors: Vec<&PhraseEntry> = DESCRIPTORS_BY_SPECIFICITY
            .iter()
            .filter(|e| !CONTEXT_SCOPED_SOURCES.contains(&e.source))
            .collect();
        let descriptor_targets = descriptors.iter().map(|e| (e.source, e.target)).collect();
        let descriptor_alt: Vec<String> = descriptors
            .iter()
            .map(|e| regex::escape(e.source))
            .collect();

        let mut fish_words: Vec<&str> = FISH_TYPE_WORDS.to_vec();
        fish_words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
        let fish_alt = fish_words.join("|");

        // Descriptor directly in front of an English fish-type token, with any
        // Turkish suffix on the token kept for the suffix pass. Case-sensitive:
        // lowercase color words in ordinary prose must not fire.
        let descriptor_re = Regex::new(&format!(
            r"\b({desc})([ -](?:{fish})(?:{suffix})?){tail}",
            desc = descriptor_alt.join("|"),
            fish = fish_alt,
            suffix = NOUN_SUFFIXES,
            tail = matcher::boundary_tail(),
        ))
        .unwrap();

        let tang_rules = vec![
            (
                compile_fragment("Tang(?:ları|ların)", BoundaryMode::TurkishTail),
                "Tangs",
            ),
            (compile_pattern("Tanglar", BoundaryMode::TurkishTail), "Tangs"),
            (compile_pattern("Tangın", BoundaryMode::TurkishTail), "Tang's"),
            (compile_pattern("Tangı", BoundaryMode::TurkishTail), "Tang"),
        ];

        Self {
            variant_rules,
            compounds: FISH_TYPE_COMPOUNDS,
            descriptor_re,
            descriptor_targets,
            tang_rules,
            fairy_before_wrasse: Regex::new(r"\bPerisi( Wrasse)").unwrap(),
            fairy_possessive: Regex::new(r"\bPerisi('s)").unwrap(),
            surgeon_context: Regex::new(
                r"\b((?:[A-ZÇĞİÖŞÜ][a-zçğıöşü]+ ){1,2})Cerrah\b( Balığı)?",
            )
            .unwrap(),
        }
    }

    /// Rewrites one free-text field. Empty input passes through unchanged.
    pub fn rewrite(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut result = text.to_string();
        result = self.apply_variants(result);
        result = self.apply_descriptor_combinations(result);
        result = self.apply_tang_suffixes(result);
        result = self.apply_targeted_fixes(result);
        result
    }

    /// Pass 1: restore canonical names through the precomputed variant map,
    /// longest variant first so no partial rewrite corrupts a compound.
    fn apply_variants(&self, mut result: String) -> String {
        for rule in &self.variant_rules {
            // Cheap substring check before the regex machinery
            if !result.to_lowercase().contains(&rule.needle) {
                continue;
            }
            result = rule
                .re
                .replace_all(&result, regex::NoExpand(&rule.canonical))
                .into_owned();
        }
        result
    }

    /// Pass 2: combinations the variant map did not generate. Compounds go
    /// first; the English fish tokens they introduce must be visible to the
    /// descriptor pattern within the same run.
    fn apply_descriptor_combinations(&self, mut result: String) -> String {
        for entry in self.compounds {
            if result.contains(entry.source) {
                result = result.replace(entry.source, entry.target);
            }
        }

        result = self
            .descriptor_re
            .replace_all(&result, |caps: &Captures| {
                let target = self.descriptor_targets[&caps[1]];
                format!("{target}{}{}", &caps[2], &caps["tail"])
            })
            .into_owned();
        result
    }

    /// Pass 3: Turkish possessive/plural endings on the Tang token.
    fn apply_tang_suffixes(&self, mut result: String) -> String {
        for (matcher, replacement) in &self.tang_rules {
            result = matcher.replace_all(&result, replacement);
        }
        result
    }

    /// Pass 4: narrowly scoped single-token fixes that would over-fire as
    /// general dictionary rules.
    fn apply_targeted_fixes(&self, mut result: String) -> String {
        result = self
            .fairy_before_wrasse
            .replace_all(&result, "Fairy$1")
            .into_owned();
        result = self
            .fairy_possessive
            .replace_all(&result, "Fairy$1")
            .into_owned();
        // "Redtail Cerrah" style leftovers: only after capitalized words, and
        // never when the compound form follows
        result = self
            .surgeon_context
            .replace_all(&result, |caps: &Captures| {
                if caps.get(2).is_some() {
                    caps[0].to_string()
                } else {
                    format!("{}Surgeon", &caps[1])
                }
            })
            .into_owned();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::VariantMap;

    fn rewriter_for(names: &[&str]) -> TextRewriter {
        TextRewriter::new(&VariantMap::build(names.iter().copied()))
    }

    fn empty_rewriter() -> TextRewriter {
        TextRewriter::new(&VariantMap::build(Vec::<String>::new()))
    }

    #[test]
    fn compound_descriptor_composes() {
        let rw = rewriter_for(&["Flame Angelfish"]);
        assert_eq!(rw.rewrite("Alev Melek Balığı"), "Flame Angelfish");
    }

    #[test]
    fn compound_descriptor_composes_without_variant_map() {
        // Compounds then descriptors inside one run: Melek Balığı becomes
        // Angelfish, which enables the Alev substitution immediately
        let rw = empty_rewriter();
        assert_eq!(rw.rewrite("Alev Melek Balığı"), "Flame Angelfish");
    }

    #[test]
    fn longest_variant_wins_over_shorter_rules() {
        let rw = rewriter_for(&["Blue Caribbean Tang"]);
        assert_eq!(
            rw.rewrite("Mavi Karayip Tangı burada"),
            "Blue Caribbean Tang burada"
        );
    }

    #[test]
    fn lowercase_prose_is_untouched() {
        let rw = empty_rewriter();
        let text = "Bu balık sarı renklidir.";
        assert_eq!(rw.rewrite(text), text);
    }

    #[test]
    fn plural_suffix_is_normalized() {
        let rw = empty_rewriter();
        assert_eq!(
            rw.rewrite("Sarı Tanglar sunmaktan gurur"),
            "Yellow Tangs sunmaktan gurur"
        );
    }

    #[test]
    fn possessive_suffixes_are_normalized() {
        let rw = empty_rewriter();
        assert_eq!(rw.rewrite("Aşil Tangı burada"), "Aşil Tang burada");
        assert_eq!(rw.rewrite("Sarı Tangın rengi"), "Yellow Tang's rengi");
        assert_eq!(rw.rewrite("Tangları görmek"), "Tangs görmek");
    }

    #[test]
    fn fairy_only_fires_before_wrasse() {
        let rw = rewriter_for(&["Blue Throat Fairy Wrasse"]);
        assert_eq!(
            rw.rewrite("Mavi Boğaz Perisi Wrasse"),
            "Blue Throat Fairy Wrasse"
        );
        // Ordinary prose use of the word stays
        let prose = "Deniz perisi efsanesi bilinir.";
        assert_eq!(empty_rewriter().rewrite(prose), prose);
    }

    #[test]
    fn surgeon_requires_capitalized_context() {
        // With the species known, the variant map restores the whole name
        let rw = rewriter_for(&["Redtail Surgeon"]);
        assert_eq!(
            rw.rewrite("Kırmızı Kuyruklu Cerrah güzeldir"),
            "Redtail Surgeon güzeldir"
        );
        // Without it, only the capitalized-context token is fixed
        assert_eq!(
            empty_rewriter().rewrite("Kırmızı Kuyruklu Cerrah güzeldir"),
            "Kırmızı Kuyruklu Surgeon güzeldir"
        );
        // The compound form is handled as a whole, never split
        assert_eq!(
            empty_rewriter().rewrite("Bir Cerrah Balığı türüdür"),
            "Bir Surgeonfish türüdür"
        );
    }

    #[test]
    fn pajama_cardinal_composes() {
        let rw = empty_rewriter();
        assert_eq!(
            rw.rewrite("Pijama Kardinal Balığı barışçıldır"),
            "Pajama Cardinalfish barışçıldır"
        );
    }

    #[test]
    fn empty_and_unmatched_inputs_pass_through() {
        let rw = empty_rewriter();
        assert_eq!(rw.rewrite(""), "");
        let text = "Hiçbir kural uygulanmayan normal bir açıklama.";
        assert_eq!(rw.rewrite(text), text);
    }

    #[test]
    fn rewrite_is_idempotent() {
        let rw = rewriter_for(&[
            "Flame Angelfish",
            "Blue Caribbean Tang",
            "Yellow Tang",
            "Blue Throat Fairy Wrasse",
        ]);
        let samples = [
            "Alev Melek Balığı ve Mavi Karayip Tangı birlikte.",
            "Sarı Tanglar sunmaktan gurur duyuyoruz.",
            "Mavi Boğaz Perisi Wrasse sakin bir türdür.",
            "Kırmızı Kuyruklu Cerrah ile Pijama Kardinal Balığı.",
            "Bu balık sarı renklidir.",
            "Aşil Tangı oldukça hassastır.",
        ];
        for text in samples {
            let once = rw.rewrite(text);
            let twice = rw.rewrite(&once);
            assert_eq!(once, twice, "not idempotent for {text:?}");
        }
    }
}
