//! Domain types, errors, and validation rules shared by the Notty crates.
//!
//! Nothing in here performs I/O: the database crate and the API server both
//! depend on it for the common vocabulary.

pub mod error;
pub mod notes;
pub mod pagination;
pub mod types;
pub mod users;
