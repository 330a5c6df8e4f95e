//! Import of fresh scraper JSON exports into the species table. New ids are
//! inserted whole; existing rows are merged field by field, skipping anything
//! the admin panel marked as manually edited.

use std::path::Path;

use tracing::{info, warn};

use crate::constants::UPDATABLE_FIELDS;
use crate::db::{FieldUpdate, SpeciesStore};
use crate::error::Result;
use crate::types::SpeciesRecord;

/// Export files and the category assigned to records missing one.
pub const IMPORT_FILES: &[(&str, &str)] = &[
    ("marine-fish.json", "marine-fish"),
    ("corals.json", "corals"),
    ("marine-invertebrates.json", "marine-invertebrates"),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub protected: usize,
}

impl MergeStats {
    pub fn print_summary(&self) {
        println!("\n✓ Merge tamamlandı:");
        println!("  Yeni eklenen: {}", self.inserted);
        println!("  Güncellenen:  {}", self.updated);
        println!("  Değişmeyen:   {}", self.unchanged);
        println!("  Korunan alan: {}", self.protected);
    }
}

/// Merges every export file found under `data_dir`. Missing files are logged
/// and skipped, not fatal; a scraper run does not always produce all three.
pub fn run(store: &mut SpeciesStore, data_dir: &Path) -> Result<MergeStats> {
    let mut stats = MergeStats::default();
    for (file, category) in IMPORT_FILES {
        let path = data_dir.join(file);
        if !path.exists() {
            warn!(path = %path.display(), "export file not found, skipping");
            continue;
        }
        let raw = std::fs::read_to_string(&path)?;
        let records: Vec<SpeciesRecord> = serde_json::from_str(&raw)?;
        info!(file, count = records.len(), "merging export file");
        println!("\n{file}: {} tür işleniyor...", records.len());

        for record in &records {
            merge_record(store, record, category, &mut stats)?;
        }
    }
    Ok(stats)
}

/// Merges one scraped record. Stats are counted the way the import has always
/// reported them: one `protected` per skipped field, one `updated`/`unchanged`
/// per existing row.
pub fn merge_record(
    store: &mut SpeciesStore,
    record: &SpeciesRecord,
    fallback_category: &str,
    stats: &mut MergeStats,
) -> Result<()> {
    let Some(existing) = store.get_row(&record.id)? else {
        store.insert_record(record, fallback_category)?;
        stats.inserted += 1;
        return Ok(());
    };

    let mut updates = Vec::new();
    for &field in UPDATABLE_FIELDS {
        if existing.manual_fields.contains(field) {
            stats.protected += 1;
            continue;
        }

        let new_value = match field {
            "water_params" => record
                .water_params
                .as_ref()
                .map(|_| record.water_params_json()),
            "category" => Some(
                record
                    .field(field)
                    .unwrap_or(fallback_category)
                    .to_string(),
            ),
            _ => record.field(field).map(str::to_string),
        };
        let old_value = existing.values.get(field).cloned().flatten();

        if new_value != old_value {
            // Scraped absence never erases stored data
            if let Some(value) = new_value {
                updates.push(FieldUpdate {
                    id: record.id.clone(),
                    field,
                    value,
                });
            }
        }
    }

    if updates.is_empty() {
        stats.unchanged += 1;
    } else {
        store.apply_updates(&updates)?;
        stats.updated += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, description_tr: &str) -> SpeciesRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "description_tr": description_tr,
        }))
        .unwrap()
    }

    #[test]
    fn new_record_is_inserted() {
        let mut store = SpeciesStore::open_in_memory().unwrap();
        let mut stats = MergeStats::default();
        merge_record(&mut store, &record("s-1", "Yellow Tang", "Açıklama."), "marine-fish", &mut stats)
            .unwrap();
        assert_eq!(stats.inserted, 1);
        assert_eq!(store.field_value("s-1", "category").unwrap().as_deref(), Some("marine-fish"));
    }

    #[test]
    fn manual_fields_are_protected() {
        let mut store = SpeciesStore::open_in_memory().unwrap();
        let mut stats = MergeStats::default();
        merge_record(&mut store, &record("s-1", "Yellow Tang", "Elle düzeltilmiş."), "marine-fish", &mut stats)
            .unwrap();
        store.set_manual_fields("s-1", &["description_tr"]).unwrap();

        merge_record(&mut store, &record("s-1", "Yellow Tang", "Scraper metni."), "marine-fish", &mut stats)
            .unwrap();
        assert_eq!(
            store.field_value("s-1", "description_tr").unwrap().as_deref(),
            Some("Elle düzeltilmiş.")
        );
        assert!(stats.protected > 0);
        assert_eq!(stats.unchanged, 1);
    }

    #[test]
    fn changed_field_updates_and_identical_row_does_not() {
        let mut store = SpeciesStore::open_in_memory().unwrap();
        let mut stats = MergeStats::default();
        let first = record("s-1", "Yellow Tang", "Eski metin.");
        merge_record(&mut store, &first, "marine-fish", &mut stats).unwrap();

        merge_record(&mut store, &first, "marine-fish", &mut stats).unwrap();
        assert_eq!(stats.unchanged, 1);

        merge_record(&mut store, &record("s-1", "Yellow Tang", "Yeni metin."), "marine-fish", &mut stats)
            .unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(
            store.field_value("s-1", "description_tr").unwrap().as_deref(),
            Some("Yeni metin.")
        );
    }
}
