//! Standalone residual scan: looks for Turkish color + English fish-type
//! combinations still sitting in descriptions, with a short context window
//! around each hit.
//!
//! Usage:
//!   cargo run --bin check-remaining

use species_cleaner::config::Config;
use species_cleaner::db::SpeciesStore;

const TURKISH_COLORS: &[&str] = &[
    "Sarı", "Mavi", "Kırmızı", "Yeşil", "Turuncu", "Mor", "Pembe", "Siyah", "Beyaz", "Altın",
    "Gümüş",
];

const FISH_WORDS: &[&str] = &[
    "Tang", "Fish", "Wrasse", "Goby", "Blenny", "Clown", "Angel", "Damsel", "Trigger", "Parrot",
    "Lion", "Coral", "Hawk", "Bass", "Grouper", "Dottyback", "Anthias", "Basslet",
];

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load()?;
    let store = SpeciesStore::open(&config.database.path)?;

    println!("🔍 Kalan sorunlu kalıplar taranıyor...");
    let rows = store.fetch_fields(&["description_tr"])?;

    let mut found = 0;
    for color in TURKISH_COLORS {
        for fish in FISH_WORDS {
            let pattern = format!("{color} {fish}");
            for row in &rows {
                let Some(text) = row.values[0].as_deref() else {
                    continue;
                };
                if let Some(idx) = text.find(&pattern) {
                    found += 1;
                    let start = text[..idx]
                        .char_indices()
                        .rev()
                        .nth(14)
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    let end = text[idx + pattern.len()..]
                        .char_indices()
                        .nth(20)
                        .map(|(i, _)| idx + pattern.len() + i)
                        .unwrap_or(text.len());
                    println!(
                        "  [{}] \"{pattern}\": ...{}...",
                        row.name.as_deref().unwrap_or(&row.id),
                        &text[start..end]
                    );
                }
            }
        }
    }

    if found == 0 {
        println!("✓ Sorun yok! Tüm tür isim çevirileri düzelmiş görünüyor.");
    } else {
        println!("\n⚠ {found} eşleşme bulundu.");
    }
    Ok(())
}
