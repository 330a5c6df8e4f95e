//! Prints the Turkish variants generated for a canonical name, for dictionary
//! debugging.
//!
//! Usage:
//!   cargo run --bin debug-variants -- "Flame Angelfish"

use std::env;

use species_cleaner::variants::{name_forms, VariantGenerator};

fn main() {
    let args: Vec<String> = env::args().collect();
    let name = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("Yellow Tang");

    let generator = VariantGenerator::new();
    println!("🔍 \"{name}\"");
    for form in name_forms(name) {
        let variants = generator.generate(&form);
        println!("\n  form: \"{form}\" ({} varyant)", variants.len());
        for variant in variants {
            println!("    {variant}");
        }
    }
}
