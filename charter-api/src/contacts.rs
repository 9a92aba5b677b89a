use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{crm::CrmError, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contacts", post(create_contact))
        .route("/api/env-check", get(env_check))
}

impl From<CrmError> for AppError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::MissingCredentials => AppError::ConfigurationError,
            CrmError::Upstream { status, message } => AppError::UpstreamError(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            CrmError::Transport(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

/// POST /api/contacts
///
/// Relays the captured contact to the CRM with the server-held credential.
/// Validation failures and missing configuration never reach the upstream.
async fn create_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<Value>, AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Name and email are required".to_string(),
        ));
    }

    let contact = state
        .crm
        .create_contact(&req.name, &req.email, &req.phone, &[])
        .await?;

    Ok(Json(json!({
        "success": true,
        "contact": contact,
    })))
}

/// GET /api/env-check
///
/// Diagnostic only: reports presence (never values) of the three credential
/// settings.
async fn env_check(State(state): State<AppState>) -> Json<Value> {
    let variables = json!({
        "CRM_TOKEN": state.crm.has_token(),
        "CRM_LOCATION_ID": state.crm.has_location_id(),
        "AIRPORTDB_API_TOKEN": state.airports.has_remote(),
    });

    let all_set = variables
        .as_object()
        .map(|vars| vars.values().all(|v| v == &Value::Bool(true)))
        .unwrap_or(false);

    Json(json!({
        "status": if all_set { "OK" } else { "MISSING_VARS" },
        "variables": variables,
        "message": if all_set {
            "All configuration variables are set correctly!"
        } else {
            "Some configuration variables are missing. Check the variables object above."
        },
    }))
}
