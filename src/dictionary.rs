//! Static bilingual phrase tables used by the rewriting passes.
//!
//! Three independent concerns live here: the species-descriptor dictionary
//! (colors, sizes, qualifiers) used for name restoration, the attribute-value
//! dictionary for the short enumerated fields, and the vendor keyword list for
//! sentence suppression. The tables are literal and immutable; a run never
//! mutates them.

use once_cell::sync::Lazy;

/// One bilingual mapping, Turkish source to English target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseEntry {
    pub source: &'static str,
    pub target: &'static str,
}

const fn entry(source: &'static str, target: &'static str) -> PhraseEntry {
    PhraseEntry { source, target }
}

/// Turkish -> English descriptor dictionary. Compound phrases are declared
/// before their single-word constituents; [`DESCRIPTORS_BY_SPECIFICITY`] makes
/// that ordering explicit regardless of declaration order.
pub const SPECIES_DESCRIPTORS: &[PhraseEntry] = &[
    // Compound fish-type words
    entry("Cerrah Balığı", "Surgeonfish"),
    entry("Melek Balığı", "Angelfish"),
    entry("Kelebek Balığı", "Butterflyfish"),
    entry("Aslan Balığı", "Lionfish"),
    entry("Akrep Balığı", "Scorpionfish"),
    entry("Kardinal Balığı", "Cardinalfish"),
    entry("Çene Balığı", "Jawfish"),
    entry("Keçi Balığı", "Goatfish"),
    entry("Tetikçi Balığı", "Triggerfish"),
    entry("Papağan Balığı", "Parrotfish"),
    entry("Şeytan Balığı", "Devilfish"),
    entry("Boru Balığı", "Pipefish"),
    // Multi-word qualifiers
    entry("Sarı Kuyruklu", "Yellowtail"),
    entry("Kırmızı Kuyruklu", "Redtail"),
    entry("Uzun Burunlu", "Longnose"),
    entry("Uzun Yüzgeçli", "Longfin"),
    entry("Kısa Yüzgeçli", "Shortfin"),
    entry("İki Renkli", "Bicolor"),
    entry("Çift Renkli", "Bicolor"),
    entry("İnce Çizgili", "Finelined"),
    entry("Limon Kabuğu", "Lemonpeel"),
    entry("Kara Nokta", "Black Spot"),
    entry("Mavi Boğaz", "Blue Throat"),
    entry("Mavi Benekli", "Blue Dot"),
    entry("Mavi Nokta", "Blue Dot"),
    entry("Kızıl Kafa", "Red Head"),
    // Single colors
    entry("Sarı", "Yellow"),
    entry("Mavi", "Blue"),
    entry("Kırmızı", "Red"),
    entry("Yeşil", "Green"),
    entry("Turuncu", "Orange"),
    entry("Mor", "Purple"),
    entry("Pembe", "Pink"),
    entry("Siyah", "Black"),
    entry("Beyaz", "White"),
    entry("Altın", "Gold"),
    entry("Gümüş", "Silver"),
    entry("Kahverengi", "Brown"),
    entry("Gri", "Gray"),
    entry("Krem", "Cream"),
    entry("Turkuaz", "Turquoise"),
    entry("Kraliyet", "Royal"),
    entry("Ateş", "Fire"),
    entry("Kraliçe", "Queen"),
    entry("İmparator", "Emperor"),
    entry("Kral", "King"),
    entry("Prenses", "Princess"),
    entry("Limonlu", "Lemon"),
    entry("Karayip", "Caribbean"),
    // Other qualifiers
    entry("Çevik", "Agile"),
    entry("Alev", "Flame"),
    entry("Yarı", "Half"),
    entry("Pijama", "Pajama"),
    entry("Yelken", "Sailfin"),
    entry("Benekli", "Spotted"),
    entry("Yanaklı", "Cheeked"),
    entry("Burunlu", "Nosed"),
    entry("Çizgili", "Striped"),
    entry("Alacalı", "Mottled"),
    entry("Dev", "Giant"),
    entry("Cüce", "Dwarf"),
    entry("Ortak", "Common"),
    entry("Uzun", "Long"),
    entry("Küçük", "Small"),
    entry("Büyük", "Large"),
    entry("Yıldız", "Star"),
    entry("Kaplan", "Tiger"),
    entry("Melek", "Angel"),
    // Standalone fish-type words that appear outside the compound forms
    entry("Cerrah", "Surgeon"),
    entry("Perisi", "Fairy"),
];

/// Descriptor sources that only translate correctly in specific syntactic
/// contexts. Excluded from the generic descriptor+fish-type pass; handled by
/// the targeted rules in the rewriter instead.
pub const CONTEXT_SCOPED_SOURCES: &[&str] = &["Cerrah", "Melek", "Perisi"];

/// English fish-type tokens. A Turkish descriptor directly in front of one of
/// these is treated as part of a species name, not ordinary prose.
pub const FISH_TYPE_WORDS: &[&str] = &[
    "Tang",
    "Wrasse",
    "Goby",
    "Blenny",
    "Clownfish",
    "Clown",
    "Damselfish",
    "Damsel",
    "Angelfish",
    "Triggerfish",
    "Trigger",
    "Dottyback",
    "Anthias",
    "Basslet",
    "Hawkfish",
    "Hawk",
    "Grouper",
    "Chromis",
    "Pseudochromis",
    "Surgeonfish",
    "Butterflyfish",
    "Butterfly",
    "Jawfish",
    "Lionfish",
    "Cardinalfish",
    "Cardinal",
    "Goatfish",
    "Pufferfish",
    "Puffer",
    "Boxfish",
    "Cowfish",
    "Trunkfish",
    "Foxface",
    "Rabbitfish",
    "Firefish",
    "Dartfish",
    "Seahorse",
    "Pipefish",
    "Mandarin",
    "Dragonet",
    "Filefish",
    "Moray",
    "Eel",
    "Parrotfish",
    "Gramma",
    "Assessor",
];

/// Turkish compound fish-type names replaced unconditionally. In species
/// descriptions these are effectively always part of a name.
pub const FISH_TYPE_COMPOUNDS: &[PhraseEntry] = &[
    entry("Cerrah Balığı", "Surgeonfish"),
    entry("Melek Balığı", "Angelfish"),
    entry("Kelebek Balığı", "Butterflyfish"),
    entry("Aslan Balığı", "Lionfish"),
    entry("Akrep Balığı", "Scorpionfish"),
    entry("Kardinal Balığı", "Cardinalfish"),
    entry("Çene Balığı", "Jawfish"),
    entry("Keçi Balığı", "Goatfish"),
    entry("Tetikçi Balığı", "Triggerfish"),
    entry("Papağan Balığı", "Parrotfish"),
];

/// English -> Turkish attribute values for the short enumerated fields
/// (care level, temperament, reef compatibility, diet).
pub const ATTRIBUTE_VALUES: &[PhraseEntry] = &[
    // Care levels
    entry("Easy", "Kolay"),
    entry("Moderate", "Orta"),
    entry("Difficult", "Zor"),
    entry("Expert Only", "Sadece Uzman"),
    entry("Expert", "Uzman"),
    // Temperament
    entry("Peaceful", "Barışçıl"),
    entry("Semi-aggressive", "Yarı Saldırgan"),
    entry("Semi-Aggressive", "Yarı Saldırgan"),
    entry("Aggressive", "Saldırgan"),
    entry("Community Safe", "Topluluk Güvenli"),
    // Reef compatibility
    entry("Yes", "Evet"),
    entry("No", "Hayır"),
    entry("With Caution", "Dikkatli Olunmalı"),
    entry("Monitor", "İzlenmeli"),
    // Diet
    entry("Omnivore", "Hepçil"),
    entry("Herbivore", "Otçul"),
    entry("Carnivore", "Etçil"),
    entry("Planktivore", "Planktoncu"),
    entry("Filter Feeder", "Filtre Besleyici"),
    entry("Photosynthetic", "Fotosentetik"),
    entry("Plankton Eater", "Planktoncu"),
    entry("Obligate Corallivore", "Zorunlu Mercan Yiyici"),
    entry("Detritus", "Detritüs"),
];

/// Full-string overrides for known malformed or compound attribute values.
/// Take precedence over every other attribute rule.
pub const ATTRIBUTE_OVERRIDES: &[PhraseEntry] = &[
    entry("Juvenile: Yes; Adult: No", "Genç: Evet; Yetişkin: Hayır"),
    // Scraper artifact: care level and temperament glued together
    entry("Easy - Semi Aggressive", "Yarı Saldırgan"),
];

/// A sentence containing any of these is vendor boilerplate and gets dropped.
pub const VENDOR_KEYWORDS: &[&str] = &[
    "LiveAquaria",
    "Diver's Den",
    "liveaquaria.com",
    "WYSIWYG",
    "Wisconsin Tesisi",
];

/// Descriptor entries ordered by decreasing source specificity (char count,
/// declaration order breaking ties). Multi-word compounds always come before
/// their single-word constituents, independent of how the literal table above
/// happens to be arranged.
pub static DESCRIPTORS_BY_SPECIFICITY: Lazy<Vec<PhraseEntry>> = Lazy::new(|| {
    let mut entries: Vec<PhraseEntry> = SPECIES_DESCRIPTORS.to_vec();
    entries.sort_by_key(|e| std::cmp::Reverse(e.source.chars().count()));
    entries
});
