use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod auth;
pub mod contacts;
pub mod crm;
pub mod error;
pub mod middleware;
pub mod portal;
pub mod state;
pub mod wizard;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let session = portal::session_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_session,
    ));
    let admin = portal::admin_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_admin,
    ));

    Router::new()
        .merge(auth::routes())
        .merge(contacts::routes())
        .merge(airports::routes())
        .merge(wizard::routes())
        .merge(portal::public_routes())
        .merge(session)
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
