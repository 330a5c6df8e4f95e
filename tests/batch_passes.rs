//! End-to-end pass runs against real SQLite files.

use species_cleaner::db::{FieldUpdate, SpeciesStore};
use species_cleaner::runner::{BatchRunner, CleanVendorPass, FixNamesPass, NormalizeFieldsPass};
use species_cleaner::types::SpeciesRecord;
use species_cleaner::{TextRewriter, VariantMap};

const SENTINEL_STAMP: &str = "2000-01-01 00:00:00";

fn insert(store: &SpeciesStore, id: &str, name: &str, fields: serde_json::Value) {
    let mut value = serde_json::json!({ "id": id, "category": "marine-fish", "name": name });
    for (k, v) in fields.as_object().unwrap() {
        value[k.as_str()] = v.clone();
    }
    let record: SpeciesRecord = serde_json::from_value(value).unwrap();
    assert!(store.insert_record(&record, "marine-fish").unwrap());
    store.set_updated_at(id, SENTINEL_STAMP).unwrap();
}

fn fix_names_pass(store: &SpeciesStore) -> FixNamesPass {
    let names = store.species_names().unwrap();
    FixNamesPass::new(TextRewriter::new(&VariantMap::build(names)))
}

#[test]
fn dry_run_reports_but_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SpeciesStore::open(dir.path().join("species.db")).unwrap();
    insert(
        &store,
        "f-1",
        "Yellow Tang",
        serde_json::json!({ "description_tr": "Sarı Tanglar sunmaktan gurur duyuyoruz." }),
    );

    let pass = fix_names_pass(&store);
    let mut runner = BatchRunner::new(store, true);
    let outcome = runner.run(&pass).unwrap();

    assert_eq!(outcome.scanned, 1);
    assert_eq!(outcome.changed_rows, 1);
    assert_eq!(outcome.writes, 0);
    assert_eq!(
        runner.store().field_value("f-1", "description_tr").unwrap().as_deref(),
        Some("Sarı Tanglar sunmaktan gurur duyuyoruz.")
    );
    assert_eq!(
        runner.store().updated_at("f-1").unwrap().as_deref(),
        Some(SENTINEL_STAMP)
    );
}

#[test]
fn failed_update_rolls_back_the_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("species.db");
    let mut store = SpeciesStore::open(&path).unwrap();
    insert(
        &store,
        "r-1",
        "Yellow Tang",
        serde_json::json!({ "description_tr": "Eski bir." }),
    );
    insert(
        &store,
        "r-2",
        "Flame Angelfish",
        serde_json::json!({ "description_tr": "Eski iki." }),
    );

    // Second connection to the same file rejects any update to r-2, so the
    // batch fails halfway through
    let admin = rusqlite::Connection::open(&path).unwrap();
    admin
        .execute_batch(
            "CREATE TRIGGER reject_second BEFORE UPDATE ON species \
             WHEN NEW.id = 'r-2' \
             BEGIN SELECT RAISE(ABORT, 'update rejected'); END;",
        )
        .unwrap();

    let updates = vec![
        FieldUpdate {
            id: "r-1".to_string(),
            field: "description_tr",
            value: "Yeni bir.".to_string(),
        },
        FieldUpdate {
            id: "r-2".to_string(),
            field: "description_tr",
            value: "Yeni iki.".to_string(),
        },
    ];
    assert!(store.apply_updates(&updates).is_err());

    // The first update succeeded inside the transaction but must not persist
    assert_eq!(
        store.field_value("r-1", "description_tr").unwrap().as_deref(),
        Some("Eski bir.")
    );
    assert_eq!(
        store.field_value("r-2", "description_tr").unwrap().as_deref(),
        Some("Eski iki.")
    );
    assert_eq!(
        store.updated_at("r-1").unwrap().as_deref(),
        Some(SENTINEL_STAMP)
    );
}

#[test]
fn unchanged_rows_keep_their_update_stamp() {
    let store = SpeciesStore::open_in_memory().unwrap();
    insert(
        &store,
        "clean",
        "Ocellaris Clownfish",
        serde_json::json!({ "description_tr": "Bu balık barışçıldır." }),
    );
    insert(
        &store,
        "dirty",
        "Yellow Tang",
        serde_json::json!({ "description_tr": "Sarı Tangı harika bir türdür." }),
    );

    let pass = fix_names_pass(&store);
    let mut runner = BatchRunner::new(store, false);
    let outcome = runner.run(&pass).unwrap();

    assert_eq!(outcome.changed_rows, 1);
    assert_eq!(
        runner.store().updated_at("clean").unwrap().as_deref(),
        Some(SENTINEL_STAMP)
    );
    let stamp = runner.store().updated_at("dirty").unwrap().unwrap();
    assert_ne!(stamp, SENTINEL_STAMP);
    let parsed = chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S").unwrap();
    assert!(parsed.and_utc().timestamp() > 0);
    assert_eq!(
        runner.store().field_value("dirty", "description_tr").unwrap().as_deref(),
        Some("Yellow Tang harika bir türdür.")
    );
}

#[test]
fn vendor_pass_clears_residual_patterns() {
    let store = SpeciesStore::open_in_memory().unwrap();
    insert(
        &store,
        "v-1",
        "Torch Coral",
        serde_json::json!({
            "description_tr": "Güzel bir mercandır. LiveAquaria® tesisinde yetiştirilmiştir.",
            "feeding_tr": "Planktonla beslenir."
        }),
    );

    let mut runner = BatchRunner::new(store, false);
    let outcome = runner.run(&CleanVendorPass).unwrap();

    assert_eq!(outcome.changed_rows, 1);
    assert!(outcome.residuals.is_empty(), "residuals: {:?}", outcome.residuals);
    assert_eq!(
        runner.store().field_value("v-1", "description_tr").unwrap().as_deref(),
        Some("Güzel bir mercandır.")
    );
    assert_eq!(
        runner.store().field_value("v-1", "feeding_tr").unwrap().as_deref(),
        Some("Planktonla beslenir.")
    );
}

#[test]
fn attribute_pass_translates_enumerated_columns() {
    let store = SpeciesStore::open_in_memory().unwrap();
    insert(
        &store,
        "a-1",
        "Flame Angelfish",
        serde_json::json!({
            "care_level_tr": "Easy - Moderate",
            "temperament_tr": "Semi-aggressive",
            "diet_tr": "Hepçil",
            "reef_compatible_tr": "With Caution"
        }),
    );

    let mut runner = BatchRunner::new(store, false);
    let outcome = runner.run(&NormalizeFieldsPass).unwrap();

    assert_eq!(outcome.changed_rows, 1);
    let store = runner.store();
    assert_eq!(store.field_value("a-1", "care_level_tr").unwrap().as_deref(), Some("Kolay - Orta"));
    assert_eq!(
        store.field_value("a-1", "temperament_tr").unwrap().as_deref(),
        Some("Yarı Saldırgan")
    );
    assert_eq!(store.field_value("a-1", "diet_tr").unwrap().as_deref(), Some("Hepçil"));
    assert_eq!(
        store.field_value("a-1", "reef_compatible_tr").unwrap().as_deref(),
        Some("Dikkatli Olunmalı")
    );
    // Already-translated value produced no write
    assert!(outcome
        .field_changes
        .iter()
        .any(|(f, c)| *f == "diet_tr" && *c == 0));
}

#[test]
fn fix_names_pass_is_idempotent_against_the_table() {
    let store = SpeciesStore::open_in_memory().unwrap();
    insert(
        &store,
        "f-1",
        "Blue Caribbean Tang",
        serde_json::json!({ "description_tr": "Mavi Karayip Tangı resif için uygundur." }),
    );

    let pass = fix_names_pass(&store);
    let mut runner = BatchRunner::new(store, false);
    let first = runner.run(&pass).unwrap();
    assert_eq!(first.changed_rows, 1);
    assert_eq!(
        runner.store().field_value("f-1", "description_tr").unwrap().as_deref(),
        Some("Blue Caribbean Tang resif için uygundur.")
    );

    runner.store().set_updated_at("f-1", SENTINEL_STAMP).unwrap();
    let second = runner.run(&pass).unwrap();
    assert_eq!(second.changed_rows, 0);
    assert_eq!(
        runner.store().updated_at("f-1").unwrap().as_deref(),
        Some(SENTINEL_STAMP)
    );
}
