pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

pub use health::ready_router;

/// All API routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}
