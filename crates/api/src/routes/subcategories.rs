use axum::routing::get;
use axum::Router;

use crate::handlers::subcategories;
use crate::state::AppState;

/// ```text
/// GET    /subcategories/        -> list_subcategories
/// POST   /subcategories/        -> create_subcategory
/// GET    /subcategories/{id}/   -> get_subcategory
/// PUT    /subcategories/{id}/   -> update_subcategory
/// DELETE /subcategories/{id}/   -> delete_subcategory
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/subcategories/",
            get(subcategories::list_subcategories).post(subcategories::create_subcategory),
        )
        .route(
            "/subcategories/{id}/",
            get(subcategories::get_subcategory)
                .put(subcategories::update_subcategory)
                .delete(subcategories::delete_subcategory),
        )
}
