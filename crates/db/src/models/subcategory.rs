//! Subcategory model and DTOs.

use notty_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subcategories` table.
///
/// `parent_category_id` is fixed at creation; there is no way to move a
/// subcategory to another category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subcategory {
    pub id: DbId,
    pub name: String,
    pub owner_id: DbId,
    pub parent_category_id: DbId,
}

/// DTO for creating a subcategory under an existing category.
#[derive(Debug, Deserialize)]
pub struct CreateSubcategory {
    pub name: String,
    pub parent_category_id: DbId,
}

/// DTO for renaming a subcategory.
#[derive(Debug, Deserialize)]
pub struct UpdateSubcategory {
    pub name: String,
}

/// What deleting a subcategory touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubcategoryDeletion {
    /// Notes whose `subcategory_id` was reset to NULL.
    pub notes_detached: u64,
}
