//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the corresponding repository in
//! `notty_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod account;
pub mod auth;
pub mod categories;
pub mod notes;
pub mod subcategories;
