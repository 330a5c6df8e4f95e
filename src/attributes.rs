//! Normalization of the short enumerated fields (care level, temperament,
//! diet, reef compatibility). Much simpler than the prose rewriter: exact
//! dictionary lookups over delimiter-split parts, never an error.

use std::collections::HashSet;

use crate::dictionary::{ATTRIBUTE_OVERRIDES, ATTRIBUTE_VALUES};

fn translate_part(part: &str) -> &str {
    let trimmed = part.trim();
    ATTRIBUTE_VALUES
        .iter()
        .find(|e| e.source == trimmed)
        .map(|e| e.target)
        .unwrap_or(trimmed)
}

fn is_target_value(raw: &str) -> bool {
    ATTRIBUTE_VALUES.iter().any(|e| e.target == raw)
}

/// Translates a stored attribute value. Full-string overrides take precedence;
/// values already in the target language pass through; comma and " - "
/// compounds are translated part-wise (comma lists deduplicated).
/// Untranslatable input is returned unchanged.
pub fn normalize_value(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Some(special) = ATTRIBUTE_OVERRIDES.iter().find(|e| e.source == raw) {
        return special.target.to_string();
    }

    if let Some(exact) = ATTRIBUTE_VALUES.iter().find(|e| e.source == raw) {
        return exact.target.to_string();
    }

    if is_target_value(raw) {
        return raw.to_string();
    }

    // "Easy, Easy" or "Carnivore, Filter Feeder"
    if raw.contains(',') {
        let mut seen = HashSet::new();
        let parts: Vec<&str> = raw
            .split(',')
            .map(translate_part)
            .filter(|p| seen.insert(*p))
            .collect();
        return parts.join(", ");
    }

    // "Easy - Moderate"
    if raw.contains(" - ") {
        let parts: Vec<&str> = raw.split(" - ").map(translate_part).collect();
        return parts.join(" - ");
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_translates() {
        assert_eq!(normalize_value("Easy"), "Kolay");
        assert_eq!(normalize_value("Semi-aggressive"), "Yarı Saldırgan");
        assert_eq!(normalize_value("With Caution"), "Dikkatli Olunmalı");
    }

    #[test]
    fn already_target_passes_through() {
        assert_eq!(normalize_value("Kolay"), "Kolay");
        assert_eq!(normalize_value("Barışçıl"), "Barışçıl");
    }

    #[test]
    fn dash_compound_translates_partwise() {
        assert_eq!(normalize_value("Easy - Moderate"), "Kolay - Orta");
        assert_eq!(normalize_value("Moderate - Difficult"), "Orta - Zor");
    }

    #[test]
    fn comma_compound_deduplicates() {
        assert_eq!(normalize_value("Easy, Easy"), "Kolay");
        assert_eq!(
            normalize_value("Carnivore, Filter Feeder"),
            "Etçil, Filtre Besleyici"
        );
    }

    #[test]
    fn override_beats_everything() {
        assert_eq!(
            normalize_value("Juvenile: Yes; Adult: No"),
            "Genç: Evet; Yetişkin: Hayır"
        );
        assert_eq!(normalize_value("Easy - Semi Aggressive"), "Yarı Saldırgan");
    }

    #[test]
    fn untranslatable_is_unchanged() {
        assert_eq!(normalize_value("Mysterious"), "Mysterious");
        assert_eq!(normalize_value(""), "");
    }
}
