//! Note model and DTOs.

use notty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
///
/// `category_id` and `subcategory_id` are independent: nothing requires the
/// subcategory to sit under the note's category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub owner_id: DbId,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
}

/// Body of a note create (`POST`) or full replacement (`PUT`).
///
/// Omitted links are stored as NULL.
#[derive(Debug, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub subcategory_id: Option<DbId>,
}

/// Body of a partial note update (`PATCH`).
///
/// For the links, an absent key keeps the current value, `null` clears it,
/// and a number points it at another row.
#[derive(Debug, Default, Deserialize)]
pub struct PatchNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub subcategory_id: Option<Option<DbId>>,
}

/// Optional filters for listing notes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoteFilter {
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
}

/// Distinguish a present-but-null field from a missing one.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
