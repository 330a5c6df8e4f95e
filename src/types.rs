use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Nested water parameters stored as a JSON column on the species row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterParams {
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub sg: Option<String>,
    #[serde(default)]
    pub ph: Option<String>,
    #[serde(default)]
    pub dkh: Option<String>,
}

/// One species entry as produced by the scraper JSON exports and stored in the
/// record store. English and Turkish free-text fields sit side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_tr: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub care_level: Option<String>,
    #[serde(default)]
    pub care_level_tr: Option<String>,
    #[serde(default)]
    pub temperament: Option<String>,
    #[serde(default)]
    pub temperament_tr: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub diet_tr: Option<String>,
    #[serde(default)]
    pub max_size: Option<String>,
    #[serde(default)]
    pub min_tank_size: Option<String>,
    #[serde(default)]
    pub reef_compatible: Option<String>,
    #[serde(default)]
    pub reef_compatible_tr: Option<String>,
    #[serde(default)]
    pub color_form: Option<String>,
    /// Either a JSON object or a pre-serialized string, depending on the
    /// scraper version that produced the export.
    #[serde(default)]
    pub water_params: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_tr: Option<String>,
    #[serde(default)]
    pub feeding: Option<String>,
    #[serde(default)]
    pub feeding_tr: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SpeciesRecord {
    /// The water_params column value: always a JSON string in the store.
    pub fn water_params_json(&self) -> String {
        match &self.water_params {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => "{}".to_string(),
        }
    }

    /// Field value by column name, for the merge job's per-field comparison.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "category" => &self.category,
            "subcategory" => &self.subcategory,
            "name" => &self.name,
            "name_tr" => &self.name_tr,
            "scientific_name" => &self.scientific_name,
            "family" => &self.family,
            "care_level" => &self.care_level,
            "care_level_tr" => &self.care_level_tr,
            "temperament" => &self.temperament,
            "temperament_tr" => &self.temperament_tr,
            "diet" => &self.diet,
            "diet_tr" => &self.diet_tr,
            "max_size" => &self.max_size,
            "min_tank_size" => &self.min_tank_size,
            "reef_compatible" => &self.reef_compatible,
            "reef_compatible_tr" => &self.reef_compatible_tr,
            "color_form" => &self.color_form,
            "description" => &self.description,
            "description_tr" => &self.description_tr,
            "feeding" => &self.feeding,
            "feeding_tr" => &self.feeding_tr,
            "image_url" => &self.image_url,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Parses the manually_edited_fields JSON column. Malformed JSON is non-fatal:
/// logged and treated as an empty set, so the row still participates in merges
/// with no protection rather than aborting the run.
pub fn parse_manual_fields(id: &str, raw: Option<&str>) -> HashSet<String> {
    let Some(raw) = raw else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(fields) => fields.into_iter().collect(),
        Err(e) => {
            warn!(species = id, error = %e, "malformed manually_edited_fields, treating as empty");
            HashSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_fields_parse_and_fall_back() {
        let fields = parse_manual_fields("x-1", Some(r#"["description_tr","name"]"#));
        assert!(fields.contains("description_tr"));
        assert!(fields.contains("name"));

        assert!(parse_manual_fields("x-2", Some("not json")).is_empty());
        assert!(parse_manual_fields("x-3", None).is_empty());
        assert!(parse_manual_fields("x-4", Some("[]")).is_empty());
    }

    #[test]
    fn water_params_serialize_both_shapes() {
        let record: SpeciesRecord = serde_json::from_str(
            r#"{"id":"a","water_params":{"temperature":"72-78","sg":"1.020-1.025"}}"#,
        )
        .unwrap();
        let json = record.water_params_json();
        assert!(json.contains("72-78"));

        let record: SpeciesRecord =
            serde_json::from_str(r#"{"id":"b","water_params":"{\"ph\":\"8.1\"}"}"#).unwrap();
        assert_eq!(record.water_params_json(), "{\"ph\":\"8.1\"}");

        let record: SpeciesRecord = serde_json::from_str(r#"{"id":"c"}"#).unwrap();
        assert_eq!(record.water_params_json(), "{}");
    }
}
