//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` input DTOs for inserts and edits
//! - Where deletes cascade, a summary of what the delete touched

pub mod category;
pub mod note;
pub mod session;
pub mod subcategory;
pub mod user;
