//! Variant generation: for every canonical species name, precompute the set of
//! translated spellings that can appear in scraped prose so the rewriter can
//! restore them.
//!
//! The reachable spellings form a graph over strings: each descriptor entry
//! whose English side occurs in the current string yields an edge to the
//! string with that occurrence translated. A breadth-first walk with a
//! lowercased seen-set enumerates the whole component; chained translations
//! ("Flame Angelfish" -> "Alev Angelfish" -> "Alev Melek Balığı") fall out of
//! the traversal order for free.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::dictionary::{PhraseEntry, DESCRIPTORS_BY_SPECIFICITY};
use crate::matcher::{compile_pattern, compile_pattern_ci, BoundaryMode, Matcher};

/// Hard ceiling on variants produced per name form. The reachable set grows
/// with dictionary size; a runaway table must not turn a batch pass into an
/// unbounded walk.
pub const MAX_VARIANTS_PER_FORM: usize = 512;

/// Variants shorter than this are noise left by single-letter residues.
pub const MIN_VARIANT_CHARS: usize = 4;

/// Irregular possessive/plural morphology for the Tang token; produced by
/// direct suffix substitution rather than the dictionary.
const TANG_MORPHOLOGY: &[&str] = &["Tangı", "Tangın", "Tanglar", "Tangları", "Tangların"];

/// Derives the standalone name forms of a canonical species name: the full
/// name, the part before a scientific-name parenthesis, and the part before a
/// scientific-name comma. Trimmed, deduplicated, minimum 4 characters.
pub fn name_forms(full_name: &str) -> Vec<String> {
    let trimmed = full_name.trim();
    let mut forms: Vec<String> = vec![trimmed.to_string()];
    if let Some(idx) = trimmed.find('(') {
        if idx > 0 {
            forms.push(trimmed[..idx].trim().to_string());
        }
    }
    if let Some(idx) = trimmed.find(',') {
        if idx > 0 {
            forms.push(trimmed[..idx].trim().to_string());
        }
    }

    let mut seen = HashSet::new();
    forms
        .into_iter()
        .filter(|f| f.chars().count() >= MIN_VARIANT_CHARS)
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

/// Walks canonical name forms to their translated spellings. Compile the
/// dictionary matchers once and reuse across every species.
pub struct VariantGenerator {
    rules: Vec<(Matcher, PhraseEntry)>,
    tang: Matcher,
}

impl Default for VariantGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantGenerator {
    pub fn new() -> Self {
        let rules = DESCRIPTORS_BY_SPECIFICITY
            .iter()
            // A self-mapping entry would walk in place forever; skip outright
            .filter(|e| e.source != e.target)
            .map(|e| (compile_pattern_ci(e.target, BoundaryMode::WholeWord), *e))
            .collect();
        Self {
            rules,
            tang: compile_pattern("Tang", BoundaryMode::WholeWord),
        }
    }

    /// All translated spellings reachable from `canonical_form`, excluding the
    /// form itself, capped at [`MAX_VARIANTS_PER_FORM`].
    pub fn generate(&self, canonical_form: &str) -> Vec<String> {
        self.generate_capped(canonical_form, MAX_VARIANTS_PER_FORM)
    }

    pub fn generate_capped(&self, canonical_form: &str, cap: usize) -> Vec<String> {
        let mut variants: Vec<String> = Vec::new();
        let canonical_lower = canonical_form.to_lowercase();
        let mut seen: HashSet<String> = HashSet::from([canonical_lower.clone()]);
        let mut queue: VecDeque<String> = VecDeque::from([canonical_form.to_string()]);

        'walk: while let Some(current) = queue.pop_front() {
            for (matcher, entry) in &self.rules {
                if !matcher.is_match(&current) {
                    continue;
                }
                let variant = matcher.replace_all(&current, entry.source);
                if variant == current {
                    continue;
                }
                let variant_lower = variant.to_lowercase();
                if seen.insert(variant_lower) {
                    if variants.len() >= cap {
                        debug!(form = canonical_form, cap, "variant cap reached");
                        break 'walk;
                    }
                    if variant.chars().count() >= MIN_VARIANT_CHARS {
                        variants.push(variant.clone());
                    }
                    queue.push_back(variant);
                }
            }

            // Possessive/plural spellings of Tang; recorded but not re-expanded
            if self.tang.is_match(&current) {
                for suffix_form in TANG_MORPHOLOGY {
                    let variant = self.tang.replace_all(&current, suffix_form);
                    let variant_lower = variant.to_lowercase();
                    if seen.insert(variant_lower) {
                        if variants.len() >= cap {
                            debug!(form = canonical_form, cap, "variant cap reached");
                            break 'walk;
                        }
                        if variant.chars().count() >= MIN_VARIANT_CHARS {
                            variants.push(variant);
                        }
                    }
                }
            }
        }

        variants
    }
}

/// Lowercased variant phrase -> originating canonical name form. First-seen
/// mapping for a key wins; later species never overwrite it.
pub struct VariantMap {
    map: HashMap<String, String>,
}

impl VariantMap {
    /// Precomputes the variant map for every canonical species name, including
    /// the short forms derived by [`name_forms`].
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let generator = VariantGenerator::new();
        let mut map: HashMap<String, String> = HashMap::new();

        for name in names {
            for form in name_forms(name.as_ref()) {
                for variant in generator.generate(&form) {
                    let key = variant.to_lowercase();
                    map.entry(key).or_insert_with(|| form.clone());
                }
            }
        }

        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, variant_lower: &str) -> Option<&str> {
        self.map.get(variant_lower).map(String::as_str)
    }

    /// Entries ordered longest key first so a short generic variant can never
    /// corrupt a longer compound that contains it. Ties break lexicographically
    /// to keep rewriting deterministic.
    pub fn entries_longest_first(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .map
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}
