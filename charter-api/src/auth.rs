use axum::{extract::State, routing::post, Json, Router};
use charter_shared::{MembershipTier, Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, middleware::auth::SessionClaims, state::AppState};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignupRequest {
    name: String,
    email: String,
    #[allow(dead_code)]
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: User,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/signup", post(signup))
}

fn mint_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: match user.role {
            Role::Admin => "ADMIN".to_string(),
            Role::User => "USER".to_string(),
        },
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

/// POST /v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.store.login(&req.email, &req.password)?;
    let token = mint_token(&state, &user)?;
    tracing::info!(user_id = %user.id, role = ?user.role, "login");
    Ok(Json(AuthResponse { token, user }))
}

/// POST /v1/auth/signup
///
/// Registers the lead in the CRM (tagged "app") and grants a Member-tier
/// session. The session is granted even when the CRM call fails; the lead
/// capture is best-effort here, unlike the booking details submit.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Name and email are required".to_string(),
        ));
    }

    if let Err(err) = state
        .crm
        .create_contact(&req.name, &req.email, "", &["app"])
        .await
    {
        tracing::warn!("Signup contact capture failed: {err}");
    }

    let user = User {
        id: "newuser".to_string(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        role: Role::User,
        tier: MembershipTier::Member,
        balance: 0,
        joined_date: Utc::now(),
    };
    let token = mint_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}
