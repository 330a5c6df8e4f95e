//! SQLite-backed species record store. The store is consumed as a plain row
//! store: the normalization passes read designated columns, compute new
//! values, and write changed rows back inside one transaction.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::{params, Connection};

use crate::constants::{is_updatable_field, UPDATABLE_FIELDS};
use crate::error::{CleanerError, Result};
use crate::types::{parse_manual_fields, SpeciesRecord};

pub struct SpeciesStore {
    conn: Connection,
}

/// One row of a field-targeted scan.
#[derive(Debug, Clone)]
pub struct FieldRow {
    pub id: String,
    pub name: Option<String>,
    /// Values in the same order as the requested field list.
    pub values: Vec<Option<String>>,
}

/// One pending field write.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    pub id: String,
    pub field: &'static str,
    pub value: String,
}

/// A stored row with its manual-edit protection set, for the merge job.
#[derive(Debug)]
pub struct StoredRow {
    pub id: String,
    pub manual_fields: HashSet<String>,
    pub values: HashMap<String, Option<String>>,
}

impl SpeciesStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS species (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL,
                subcategory TEXT,
                name TEXT,
                name_tr TEXT,
                scientific_name TEXT,
                family TEXT,
                care_level TEXT,
                care_level_tr TEXT,
                temperament TEXT,
                temperament_tr TEXT,
                diet TEXT,
                diet_tr TEXT,
                max_size TEXT,
                min_tank_size TEXT,
                reef_compatible TEXT,
                reef_compatible_tr TEXT,
                color_form TEXT,
                water_params TEXT,
                description TEXT,
                description_tr TEXT,
                feeding TEXT,
                feeding_tr TEXT,
                image_url TEXT,
                manually_edited_fields TEXT DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(())
    }

    fn ensure_fields(fields: &[&str]) -> Result<()> {
        for field in fields {
            if !is_updatable_field(field) {
                return Err(CleanerError::UnknownField(field.to_string()));
            }
        }
        Ok(())
    }

    /// All non-null canonical species names, for variant-map construction.
    pub fn species_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM species WHERE name IS NOT NULL")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Full-table scan of the requested columns. Field names are checked
    /// against the whitelist before any SQL is assembled.
    pub fn fetch_fields(&self, fields: &[&str]) -> Result<Vec<FieldRow>> {
        Self::ensure_fields(fields)?;
        let sql = format!("SELECT id, name, {} FROM species", fields.join(", "));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(fields.len());
                for i in 0..fields.len() {
                    values.push(row.get::<_, Option<String>>(i + 2)?);
                }
                Ok(FieldRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    values,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Applies every update inside one transaction; a mid-run failure rolls the
    /// whole pass back. Returns the number of field writes issued.
    pub fn apply_updates(&mut self, updates: &[FieldUpdate]) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }
        Self::ensure_fields(&updates.iter().map(|u| u.field).collect::<Vec<_>>())?;

        let tx = self.conn.transaction()?;
        for update in updates {
            tx.execute(
                &format!(
                    "UPDATE species SET {} = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
                    update.field
                ),
                params![update.value, update.id],
            )?;
        }
        tx.commit()?;
        Ok(updates.len())
    }

    /// Case-sensitive residual-pattern count over one column (GLOB, so real
    /// capitalization matters, unlike LIKE).
    pub fn count_glob(&self, field: &str, pattern: &str) -> Result<i64> {
        Self::ensure_fields(&[field])?;
        let sql = format!("SELECT COUNT(*) FROM species WHERE {field} GLOB ?1");
        let count = self
            .conn
            .query_row(&sql, params![format!("*{pattern}*")], |row| row.get(0))?;
        Ok(count)
    }

    /// Names of rows still containing `pattern` in any of the given columns.
    pub fn names_matching(&self, fields: &[&str], pattern: &str, limit: usize) -> Result<Vec<String>> {
        Self::ensure_fields(fields)?;
        let clauses: Vec<String> = fields.iter().map(|f| format!("{f} GLOB ?1")).collect();
        let sql = format!(
            "SELECT COALESCE(name, id) FROM species WHERE {} LIMIT {limit}",
            clauses.join(" OR ")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let names = stmt
            .query_map(params![format!("*{pattern}*")], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM species", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Fetches a row with its protection set, or None if the id is unknown.
    pub fn get_row(&self, id: &str) -> Result<Option<StoredRow>> {
        let sql = format!(
            "SELECT manually_edited_fields, {} FROM species WHERE id = ?1",
            UPDATABLE_FIELDS.join(", ")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let manual_raw: Option<String> = row.get(0)?;
        let mut values = HashMap::new();
        for (i, field) in UPDATABLE_FIELDS.iter().enumerate() {
            values.insert(field.to_string(), row.get::<_, Option<String>>(i + 1)?);
        }
        Ok(Some(StoredRow {
            id: id.to_string(),
            manual_fields: parse_manual_fields(id, manual_raw.as_deref()),
            values,
        }))
    }

    /// Inserts a new species row. Returns false when the id already exists
    /// (duplicate keys are "already there", not an error).
    pub fn insert_record(&self, record: &SpeciesRecord, fallback_category: &str) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO species (
                id, category, subcategory, name, name_tr, scientific_name, family,
                care_level, care_level_tr, temperament, temperament_tr,
                diet, diet_tr, max_size, min_tank_size,
                reef_compatible, reef_compatible_tr, color_form,
                water_params, description, description_tr, feeding, feeding_tr,
                image_url, manually_edited_fields
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                      ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, '[]')
            "#,
            params![
                record.id,
                record.category.as_deref().unwrap_or(fallback_category),
                record.subcategory,
                record.name,
                record.name_tr,
                record.scientific_name,
                record.family,
                record.care_level,
                record.care_level_tr,
                record.temperament,
                record.temperament_tr,
                record.diet,
                record.diet_tr,
                record.max_size,
                record.min_tank_size,
                record.reef_compatible,
                record.reef_compatible_tr,
                record.color_form,
                record.water_params_json(),
                record.description,
                record.description_tr,
                record.feeding,
                record.feeding_tr,
                record.image_url,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Test/fixture access to a row's updated_at stamp.
    pub fn updated_at(&self, id: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT updated_at FROM species WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Fixture helper: overwrite a row's updated_at with a sentinel value.
    pub fn set_updated_at(&self, id: &str, stamp: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE species SET updated_at = ?1 WHERE id = ?2",
            params![stamp, id],
        )?;
        Ok(())
    }

    /// Fixture helper: mark fields as manually edited.
    pub fn set_manual_fields(&self, id: &str, fields: &[&str]) -> Result<()> {
        let json = serde_json::to_string(fields)?;
        self.conn.execute(
            "UPDATE species SET manually_edited_fields = ?1 WHERE id = ?2",
            params![json, id],
        )?;
        Ok(())
    }

    /// Raw single-field read, for merge comparisons and tests.
    pub fn field_value(&self, id: &str, field: &str) -> Result<Option<String>> {
        Self::ensure_fields(&[field])?;
        let sql = format!("SELECT {field} FROM species WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(row.get(0)?)
        } else {
            Ok(None)
        }
    }
}
