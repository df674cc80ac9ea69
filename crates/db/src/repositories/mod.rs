//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Category, subcategory, and
//! note methods also take the owning user's id and never see rows that
//! belong to anyone else.

pub mod category_repo;
pub mod note_repo;
pub mod session_repo;
pub mod subcategory_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use note_repo::NoteRepo;
pub use session_repo::SessionRepo;
pub use subcategory_repo::SubcategoryRepo;
pub use user_repo::UserRepo;
