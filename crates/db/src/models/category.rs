//! Category model and DTOs.

use notty_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub owner_id: DbId,
}

/// DTO for creating a category. Names need not be unique.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
}

/// What deleting a category touched, all within one transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// Subcategories removed because their parent was this category.
    pub subcategories_deleted: u64,
    /// Notes whose `category_id` was reset to NULL.
    pub notes_detached_from_category: u64,
    /// Notes whose `subcategory_id` was reset to NULL because the
    /// subcategory they pointed at was cascade-deleted.
    pub notes_detached_from_subcategory: u64,
}
