/// Species table field name constants to ensure consistency across the codebase.
/// Every batch pass names its target columns through these rather than ad hoc
/// string literals.

// Free-text fields targeted by the rewriting passes
pub const DESCRIPTION_TR: &str = "description_tr";
pub const FEEDING_TR: &str = "feeding_tr";

// Display-name fields targeted by vendor cleanup
pub const NAME: &str = "name";
pub const NAME_TR: &str = "name_tr";

/// Free-text Turkish fields rewritten by the name-fixing and vendor-scrub passes.
pub const FREE_TEXT_FIELDS: &[&str] = &[DESCRIPTION_TR, FEEDING_TR];

/// Display-name fields cleaned by the vendor name pass.
pub const NAME_FIELDS: &[&str] = &[NAME, NAME_TR];

/// Short enumerated fields normalized by the attribute-value pass.
pub const ATTRIBUTE_FIELDS: &[&str] = &[
    "care_level",
    "care_level_tr",
    "temperament",
    "temperament_tr",
    "reef_compatible",
    "reef_compatible_tr",
    "diet",
    "diet_tr",
];

/// All columns a batch pass is allowed to read or write. Requests outside this
/// list are rejected before any SQL is built.
pub const UPDATABLE_FIELDS: &[&str] = &[
    "category",
    "subcategory",
    "name",
    "name_tr",
    "scientific_name",
    "family",
    "care_level",
    "care_level_tr",
    "temperament",
    "temperament_tr",
    "diet",
    "diet_tr",
    "max_size",
    "min_tank_size",
    "reef_compatible",
    "reef_compatible_tr",
    "color_form",
    "water_params",
    "description",
    "description_tr",
    "feeding",
    "feeding_tr",
    "image_url",
];

/// Whether a column may be targeted by a batch update.
pub fn is_updatable_field(field: &str) -> bool {
    UPDATABLE_FIELDS.contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_targets_are_updatable() {
        for field in FREE_TEXT_FIELDS
            .iter()
            .chain(NAME_FIELDS.iter())
            .chain(ATTRIBUTE_FIELDS.iter())
        {
            assert!(is_updatable_field(field), "{field} missing from whitelist");
        }
    }

    #[test]
    fn metadata_columns_are_not_updatable() {
        assert!(!is_updatable_field("id"));
        assert!(!is_updatable_field("manually_edited_fields"));
        assert!(!is_updatable_field("updated_at"));
    }
}
