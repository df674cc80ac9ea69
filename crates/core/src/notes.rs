//! Field limits and validation functions for categories, subcategories,
//! and notes.
//!
//! Lengths are counted in characters, not bytes, so multi-byte titles get
//! the same budget as ASCII ones.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Maximum length of a subcategory name.
pub const MAX_SUBCATEGORY_NAME_LENGTH: usize = 100;

/// Maximum length of a note title.
pub const MAX_NOTE_TITLE_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a category name: non-blank and within the length limit.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    validate_bounded_text("Category name", name, MAX_CATEGORY_NAME_LENGTH)
}

/// Validate a subcategory name: non-blank and within the length limit.
pub fn validate_subcategory_name(name: &str) -> Result<(), String> {
    validate_bounded_text("Subcategory name", name, MAX_SUBCATEGORY_NAME_LENGTH)
}

/// Validate a note title: non-blank and within the length limit.
pub fn validate_note_title(title: &str) -> Result<(), String> {
    validate_bounded_text("Note title", title, MAX_NOTE_TITLE_LENGTH)
}

fn validate_bounded_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if value.chars().count() > max {
        return Err(format!("{field} exceeds maximum length of {max} characters"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
