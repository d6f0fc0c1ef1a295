//! Route table.
//!
//! | Method | Path            | Operation |
//! |--------|-----------------|-----------|
//! | GET    | `/problems`     | list      |
//! | GET    | `/problem/{id}` | get-one   |
//! | POST   | `/problem`      | create    |
//! | PUT    | `/problem/{id}` | update    |
//! | DELETE | `/problem/{id}` | delete    |

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;
use crate::problems::handlers::{
    create_problem, delete_problem, get_problem, list_problems, update_problem,
};

/// Prefix the table is mounted under.
pub const API_PREFIX: &str = "/api";

/// The problem routes, relative to [`API_PREFIX`].
pub fn problem_routes() -> Router<AppState> {
    Router::new()
        .route("/problems", get(list_problems))
        .route("/problem", post(create_problem))
        .route(
            "/problem/{id}",
            get(get_problem).put(update_problem).delete(delete_problem),
        )
}
