use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// GET    /categories/        -> list_categories
/// POST   /categories/        -> create_category
/// GET    /categories/{id}/   -> get_category
/// PUT    /categories/{id}/   -> update_category
/// DELETE /categories/{id}/   -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}/",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}
