//! Batch execution of cleanup passes over the species table. A pass is a pure
//! per-field rewrite; the runner owns the scan, the change accounting, the
//! single write transaction, and the residual post-check.

use tracing::{info, warn};

use crate::attributes;
use crate::constants::{ATTRIBUTE_FIELDS, FREE_TEXT_FIELDS, NAME_FIELDS};
use crate::db::{FieldUpdate, SpeciesStore};
use crate::dictionary::VENDOR_KEYWORDS;
use crate::error::Result;
use crate::rewriter::TextRewriter;
use crate::sentence_filter;

const SAMPLE_LIMIT: usize = 5;
const SNIPPET_CHARS: usize = 90;

/// Residual Turkish fragments checked after the name-fixing pass. GLOB keeps
/// the comparison case-sensitive, so capitalized leftovers are what counts.
/// "Tangı" and "Tangın" are substring matches and also hit inflected words
/// the rewriter correctly leaves alone ("Tangında"), so a warning from these
/// two can be a false positive; the listed sample names tell them apart.
const NAME_CHECK_PATTERNS: &[&str] = &[
    "Cerrah Balığı",
    "Melek Balığı",
    "Kelebek Balığı",
    "Aslan Balığı",
    "Akrep Balığı",
    "Kardinal Balığı",
    "Çene Balığı",
    "Keçi Balığı",
    "Tangı",
    "Tangın",
    "Perisi Wrasse",
    "Çevik",
];

const VENDOR_CHECK_PATTERNS: &[&str] = &["LiveAquaria", "WYSIWYG", "Diver's Den"];

/// One table-wide normalization job: which columns it touches, how a single
/// value is rewritten, and which leftover fragments indicate an incomplete run.
pub trait CleanupPass {
    fn name(&self) -> &'static str;
    fn fields(&self) -> &'static [&'static str];
    fn apply(&self, field: &'static str, value: &str) -> String;
    fn residual_patterns(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Dictionary-driven restoration of species names in Turkish free text.
pub struct FixNamesPass {
    rewriter: TextRewriter,
}

impl FixNamesPass {
    pub fn new(rewriter: TextRewriter) -> Self {
        Self { rewriter }
    }
}

impl CleanupPass for FixNamesPass {
    fn name(&self) -> &'static str {
        "fix-names"
    }
    fn fields(&self) -> &'static [&'static str] {
        FREE_TEXT_FIELDS
    }
    fn apply(&self, _field: &'static str, value: &str) -> String {
        self.rewriter.rewrite(value)
    }
    fn residual_patterns(&self) -> &'static [&'static str] {
        NAME_CHECK_PATTERNS
    }
}

/// Sentence-level vendor boilerplate removal from Turkish free text.
pub struct CleanVendorPass;

impl CleanupPass for CleanVendorPass {
    fn name(&self) -> &'static str {
        "clean-vendor"
    }
    fn fields(&self) -> &'static [&'static str] {
        FREE_TEXT_FIELDS
    }
    fn apply(&self, _field: &'static str, value: &str) -> String {
        sentence_filter::strip_bad_sentences(value, VENDOR_KEYWORDS)
    }
    fn residual_patterns(&self) -> &'static [&'static str] {
        VENDOR_CHECK_PATTERNS
    }
}

/// Vendor branding removal from display names.
pub struct CleanNamesPass;

impl CleanupPass for CleanNamesPass {
    fn name(&self) -> &'static str {
        "clean-names"
    }
    fn fields(&self) -> &'static [&'static str] {
        NAME_FIELDS
    }
    fn apply(&self, _field: &'static str, value: &str) -> String {
        sentence_filter::clean_vendor_name(value)
    }
    fn residual_patterns(&self) -> &'static [&'static str] {
        &["LiveAquaria"]
    }
}

/// Attribute value translation over the short enumerated columns.
pub struct NormalizeFieldsPass;

impl CleanupPass for NormalizeFieldsPass {
    fn name(&self) -> &'static str {
        "normalize-fields"
    }
    fn fields(&self) -> &'static [&'static str] {
        ATTRIBUTE_FIELDS
    }
    fn apply(&self, _field: &'static str, value: &str) -> String {
        attributes::normalize_value(value)
    }
}

#[derive(Debug, Clone)]
pub struct SampleChange {
    pub species: String,
    pub field: &'static str,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Default)]
pub struct PassOutcome {
    pub pass: &'static str,
    pub scanned: usize,
    pub changed_rows: usize,
    pub field_changes: Vec<(&'static str, usize)>,
    pub samples: Vec<SampleChange>,
    pub writes: usize,
    pub residuals: Vec<(String, i64, Vec<String>)>,
    pub dry_run: bool,
}

impl PassOutcome {
    /// Operator-facing stdout summary; structured detail goes to tracing.
    pub fn print_summary(&self) {
        println!("\n=== {} ===", self.pass);
        println!("Taranan kayıt: {}", self.scanned);
        println!("Değişen kayıt: {}", self.changed_rows);
        for (field, count) in &self.field_changes {
            if *count > 0 {
                println!("  {field}: {count}");
            }
        }
        if !self.samples.is_empty() {
            println!("\n=== Örnekler ===");
            for sample in &self.samples {
                println!("  [{}] {}", sample.species, sample.field);
                println!("    önce: {}", snippet(&sample.before));
                println!("    sonra: {}", snippet(&sample.after));
            }
        }
        if self.dry_run {
            println!("\nDry-run tamamlandı, yazma yapılmadı.");
        } else {
            println!("\n✓ {} alan güncellendi.", self.writes);
            if self.residuals.is_empty() {
                println!("✓ Kalan sorunlu kalıp yok.");
            } else {
                for (pattern, count, names) in &self.residuals {
                    println!("  ⚠ \"{pattern}\": {count} kayıt ({})", names.join(", "));
                }
            }
        }
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{cut}…")
}

pub struct BatchRunner {
    store: SpeciesStore,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(store: SpeciesStore, dry_run: bool) -> Self {
        Self { store, dry_run }
    }

    pub fn store(&self) -> &SpeciesStore {
        &self.store
    }

    /// Runs one pass over the whole table. Unchanged values never produce a
    /// write, so a re-run leaves updated_at stamps alone.
    pub fn run(&mut self, pass: &dyn CleanupPass) -> Result<PassOutcome> {
        let fields = pass.fields();
        info!(pass = pass.name(), ?fields, dry_run = self.dry_run, "starting pass");

        let rows = self.store.fetch_fields(fields)?;
        let mut outcome = PassOutcome {
            pass: pass.name(),
            scanned: rows.len(),
            dry_run: self.dry_run,
            field_changes: fields.iter().map(|f| (*f, 0usize)).collect(),
            ..Default::default()
        };

        let mut updates = Vec::new();
        for row in &rows {
            let mut row_changed = false;
            for (i, &field) in fields.iter().enumerate() {
                let old = row.values[i].as_deref().unwrap_or("");
                let new = pass.apply(field, old);
                if new == old {
                    continue;
                }
                row_changed = true;
                outcome.field_changes[i].1 += 1;
                if outcome.samples.len() < SAMPLE_LIMIT {
                    outcome.samples.push(SampleChange {
                        species: row.name.clone().unwrap_or_else(|| row.id.clone()),
                        field,
                        before: old.to_string(),
                        after: new.clone(),
                    });
                }
                updates.push(FieldUpdate {
                    id: row.id.clone(),
                    field,
                    value: new,
                });
            }
            if row_changed {
                outcome.changed_rows += 1;
            }
        }

        if !self.dry_run {
            outcome.writes = self.store.apply_updates(&updates)?;
            outcome.residuals = self.residual_scan(pass)?;
        }

        info!(
            pass = pass.name(),
            scanned = outcome.scanned,
            changed = outcome.changed_rows,
            writes = outcome.writes,
            "pass finished"
        );
        Ok(outcome)
    }

    /// Post-write scan for fragments the pass should have eliminated.
    pub fn residual_scan(&self, pass: &dyn CleanupPass) -> Result<Vec<(String, i64, Vec<String>)>> {
        let mut residuals = Vec::new();
        for pattern in pass.residual_patterns() {
            let mut total = 0;
            for &field in pass.fields() {
                total += self.store.count_glob(field, pattern)?;
            }
            if total > 0 {
                let names = self.store.names_matching(pass.fields(), pattern, 3)?;
                warn!(pass = pass.name(), pattern, count = total, "residual pattern remains");
                residuals.push((pattern.to_string(), total, names));
            }
        }
        Ok(residuals)
    }
}
