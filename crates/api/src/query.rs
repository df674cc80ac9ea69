//! Query parameter types for list endpoints.

use notty_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use notty_core::types::DbId;
use notty_db::models::note::NoteFilter;
use serde::Deserialize;

/// Query parameters for `GET /notes/` (`?category=&subcategory=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub category: Option<DbId>,
    pub subcategory: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl NoteListParams {
    pub fn filter(&self) -> NoteFilter {
        NoteFilter {
            category_id: self.category,
            subcategory_id: self.subcategory,
        }
    }

    /// `(limit, offset)` clamped to the allowed page window.
    pub fn page(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            clamp_offset(self.offset),
        )
    }
}

/// Query parameters for `GET /subcategories/` (`?category=`).
#[derive(Debug, Deserialize)]
pub struct SubcategoryListParams {
    pub category: Option<DbId>,
}
