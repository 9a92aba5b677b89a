use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use charter_core::View;
use charter_shared::{
    Aircraft, ConciergeRequest, Flight, FlightStatus, MembershipTier, Role, User,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, middleware::auth::SessionClaims, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    pub upcoming: Vec<Flight>,
    pub past: Vec<Flight>,
}

#[derive(Debug, Deserialize)]
pub struct BookFlightRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub aircraft: String,
    pub passengers: u32,
}

#[derive(Debug, Deserialize)]
pub struct ConciergeSubmission {
    pub flight_id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: FlightStatus,
}

// ============================================================================
// Routers
// ============================================================================

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/v1/fleet", get(list_fleet))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/me", get(me))
        .route("/v1/views", get(list_views))
        .route("/v1/flights", get(list_flights).post(book_flight))
        .route("/v1/concierge", get(list_requests).post(submit_request))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/stats", get(admin_stats))
        .route("/v1/admin/users", get(admin_list_users))
        .route("/v1/admin/flights", get(admin_list_flights))
        .route("/v1/admin/flights/{id}/status", put(admin_set_status))
        .route("/v1/admin/flights/{id}", delete(admin_delete_flight))
        .route("/v1/admin/concierge", get(admin_list_requests))
        .route("/v1/admin/concierge/{id}/fulfill", post(admin_fulfill))
}

fn claims_role(claims: &SessionClaims) -> Role {
    if claims.is_admin() {
        Role::Admin
    } else {
        Role::User
    }
}

// ============================================================================
// Public + Session Handlers
// ============================================================================

/// GET /v1/fleet
async fn list_fleet() -> Json<Vec<Aircraft>> {
    Json(charter_catalog::fleet())
}

/// GET /v1/me
async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Json<User> {
    // Signup sessions are not in the seed collection; rebuild from claims.
    let user = state.store.user_by_id(&claims.sub).unwrap_or_else(|| User {
        id: claims.sub.clone(),
        name: String::new(),
        email: claims.email.clone(),
        role: claims_role(&claims),
        tier: MembershipTier::Member,
        balance: 0,
        joined_date: Utc::now(),
    });
    Json(user)
}

/// GET /v1/views — the navigation set for this session's role.
async fn list_views(Extension(claims): Extension<SessionClaims>) -> Json<Vec<View>> {
    Json(View::allowed_for(claims_role(&claims)).to_vec())
}

/// GET /v1/flights
async fn list_flights(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Json<FlightsResponse> {
    let now = Utc::now();
    Json(FlightsResponse {
        upcoming: state.store.upcoming_flights(&claims.sub, now),
        past: state.store.past_flights(&claims.sub, now),
    })
}

/// POST /v1/flights
async fn book_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<BookFlightRequest>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    if req.origin.trim().is_empty() || req.destination.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Origin and destination are required".to_string(),
        ));
    }
    if req.passengers == 0 {
        return Err(AppError::ValidationError(
            "At least one passenger is required".to_string(),
        ));
    }

    let date = Utc.from_utc_datetime(&req.date.and_time(req.time));
    let flight = state.store.book_flight(
        &claims.sub,
        req.origin.trim(),
        req.destination.trim(),
        date,
        &req.aircraft,
        req.passengers,
    );
    Ok((StatusCode::CREATED, Json(flight)))
}

/// GET /v1/concierge
async fn list_requests(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Json<Vec<ConciergeRequest>> {
    Json(state.store.requests_for(&claims.sub))
}

/// POST /v1/concierge
async fn submit_request(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<ConciergeSubmission>,
) -> Result<(StatusCode, Json<ConciergeRequest>), AppError> {
    if req.service_type.trim().is_empty() || req.details.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Service type and details are required".to_string(),
        ));
    }
    let request =
        state
            .store
            .submit_request(&req.flight_id, &claims.sub, &req.service_type, &req.details);
    Ok((StatusCode::CREATED, Json(request)))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// GET /v1/admin/stats
async fn admin_stats(State(state): State<AppState>) -> Json<charter_store::PortalStats> {
    Json(state.store.stats())
}

/// GET /v1/admin/users
async fn admin_list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.users())
}

/// GET /v1/admin/flights
async fn admin_list_flights(State(state): State<AppState>) -> Json<Vec<Flight>> {
    Json(state.store.flights())
}

/// PUT /v1/admin/flights/{id}/status — any status may be set to any other.
async fn admin_set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Flight>, AppError> {
    if !state.store.set_flight_status(&id, req.status) {
        return Err(AppError::NotFoundError(format!("Unknown flight: {id}")));
    }
    let flight = state
        .store
        .flight_by_id(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("Unknown flight: {id}")))?;
    tracing::info!(flight_id = %id, status = flight.status.as_str(), "flight status updated");
    Ok(Json(flight))
}

/// DELETE /v1/admin/flights/{id} — hard delete, irreversible. The client is
/// expected to have confirmed interactively; this is the confirmed path.
async fn admin_delete_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_flight(&id) {
        return Err(AppError::NotFoundError(format!("Unknown flight: {id}")));
    }
    tracing::info!(flight_id = %id, "flight deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/admin/concierge
async fn admin_list_requests(State(state): State<AppState>) -> Json<Vec<ConciergeRequest>> {
    Json(state.store.requests())
}

/// POST /v1/admin/concierge/{id}/fulfill — Open -> Fulfilled, idempotent.
async fn admin_fulfill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.fulfill_request(&id) {
        return Err(AppError::NotFoundError(format!("Unknown request: {id}")));
    }
    Ok(StatusCode::OK)
}
