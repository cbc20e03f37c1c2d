//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three routes: liveness at `/`, presign minting at `/presigned`, and the
//! public-URL lookup at `/{user_id}/{group_id}`. The lookup pattern is broad
//! on purpose; nothing else lives at the top level, so it cannot shadow.

pub mod presign;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the service router. `cors_origin` restricts CORS to one exact
/// origin; `None` is permissive (local dev).
pub fn app(state: AppState, cors_origin: Option<&str>) -> Router {
    let cors = match cors_origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/", get(presign::liveness))
        .route("/presigned", post(presign::create_presigned))
        .route("/{user_id}/{group_id}", get(presign::lookup))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
