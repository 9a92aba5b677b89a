use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use charter_core::{BookingWizard, Screen};
use charter_shared::{Contact, TripType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub trip_type: Option<TripType>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub aircraft_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailsRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct WizardCreated {
    pub wizard_id: Uuid,
    pub wizard: BookingWizard,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/wizard", post(create_wizard))
        .route("/v1/wizard/{id}", get(get_wizard).delete(delete_wizard))
        .route("/v1/wizard/{id}/search", post(search))
        .route("/v1/wizard/{id}/select", post(select_aircraft))
        .route("/v1/wizard/{id}/back", post(back))
        .route("/v1/wizard/{id}/details", post(submit_details))
        .route("/v1/wizard/{id}/reset", post(reset))
}

/// Runs a closure against one wizard under the table lock. The lock is only
/// ever held for the synchronous state-machine call.
fn with_wizard<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingWizard) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut wizards = state.wizards.write().unwrap();
    let wizard = wizards
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("Unknown wizard: {id}")))?;
    f(wizard)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/wizard — a fresh draft on the Home screen.
async fn create_wizard(State(state): State<AppState>) -> Json<WizardCreated> {
    let wizard = BookingWizard::new();
    let wizard_id = Uuid::new_v4();
    state
        .wizards
        .write()
        .unwrap()
        .insert(wizard_id, wizard.clone());
    Json(WizardCreated { wizard_id, wizard })
}

/// DELETE /v1/wizard/{id} — drops the wizard from the table when the client
/// leaves the funnel. Without this the table would grow by one entry per
/// visitor for the life of the process.
async fn delete_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.wizards.write().unwrap().remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFoundError(format!("Unknown wizard: {id}"))),
    }
}

/// GET /v1/wizard/{id}
async fn get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWizard>, AppError> {
    with_wizard(&state, id, |wizard| Ok(Json(wizard.clone())))
}

/// POST /v1/wizard/{id}/search — apply the search-widget fields, then the
/// guarded Home -> Results transition.
async fn search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Value>, AppError> {
    with_wizard(&state, id, |wizard| {
        if let Some(trip_type) = req.trip_type {
            wizard.set_trip_type(trip_type);
        }
        if let Some(origin) = req.origin {
            wizard.set_origin(origin);
        }
        if let Some(destination) = req.destination {
            wizard.set_destination(destination);
        }
        if req.depart_date.is_some() || req.return_date.is_some() {
            wizard.set_dates(
                req.depart_date.or(wizard.draft().depart_date),
                req.return_date.or(wizard.draft().return_date),
            );
        }
        if let Some(passengers) = req.passengers {
            wizard.set_passengers(passengers);
        }

        wizard.search()?;
        Ok(Json(json!({
            "wizard": wizard,
            "results": charter_catalog::fleet(),
        })))
    })
}

/// POST /v1/wizard/{id}/select
async fn select_aircraft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<BookingWizard>, AppError> {
    let aircraft = charter_catalog::fleet::find(&req.aircraft_id)
        .ok_or_else(|| AppError::NotFoundError(format!("Unknown aircraft: {}", req.aircraft_id)))?;
    with_wizard(&state, id, |wizard| {
        wizard.select_aircraft(aircraft)?;
        Ok(Json(wizard.clone()))
    })
}

/// POST /v1/wizard/{id}/back
async fn back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWizard>, AppError> {
    with_wizard(&state, id, |wizard| {
        wizard.back()?;
        Ok(Json(wizard.clone()))
    })
}

/// POST /v1/wizard/{id}/details
///
/// Two-phase: validate and raise the submitting flag under the lock, make
/// the CRM call with the lock released, then settle the outcome. A failed
/// relay keeps the wizard on Details with the message recorded inline, so
/// the response is the wizard state either way.
async fn submit_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DetailsRequest>,
) -> Result<Json<BookingWizard>, AppError> {
    let contact = with_wizard(&state, id, |wizard| {
        wizard.set_contact(Contact {
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
        });
        Ok(wizard.begin_submission()?.clone())
    })?;

    let outcome = state
        .crm
        .create_contact(&contact.name, &contact.email, &contact.phone, &[])
        .await
        .map(|_| ())
        .map_err(|err| err.to_string());

    with_wizard(&state, id, |wizard| {
        wizard.finish_submission(outcome)?;
        if wizard.screen() == Screen::Confirmation {
            tracing::info!(wizard_id = %id, "booking request submitted");
        }
        Ok(Json(wizard.clone()))
    })
}

/// POST /v1/wizard/{id}/reset
async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWizard>, AppError> {
    with_wizard(&state, id, |wizard| {
        wizard.reset()?;
        Ok(Json(wizard.clone()))
    })
}
