use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use charter_api::{app, AppState};
use charter_store::app_config::{AirportDbConfig, AuthConfig, Config, CrmConfig, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server: ServerConfig { port: 0 },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            jwt_expiration_seconds: 3600,
            admin_email: "mauricio@stokeleads.com".to_string(),
            admin_password: "StokeLeadsD2".to_string(),
        },
        crm: CrmConfig {
            base_url: "https://services.leadconnectorhq.com".to_string(),
            api_version: "2021-07-28".to_string(),
            // Deliberately unconfigured: the proxy must fail closed without
            // calling out
            token: None,
            location_id: None,
        },
        airportdb: AirportDbConfig {
            base_url: "https://airportdb.io".to_string(),
            api_token: None,
        },
    }
}

fn test_app() -> Router {
    app(AppState::new(&test_config()))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_env_check_reports_missing_vars() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/env-check", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "MISSING_VARS");
    assert_eq!(body["variables"]["CRM_TOKEN"], false);
    assert_eq!(body["variables"]["CRM_LOCATION_ID"], false);
    assert_eq!(body["variables"]["AIRPORTDB_API_TOKEN"], false);
}

#[tokio::test]
async fn test_contacts_validation_and_fail_closed() {
    let app = test_app();

    // Missing email never reaches the upstream
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        None,
        Some(json!({ "name": "Alex Croft" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and email are required");

    // Valid payload but no server credential: configuration error
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        None,
        Some(json!({ "name": "Alex Croft", "email": "alex@example.com", "phone": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server configuration error");
}

#[tokio::test]
async fn test_airport_search_route() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/airports/search?q=seattle", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|a| a["city"] == "Seattle"));

    // One character means "not yet searching"
    let (status, body) = send(&app, Method::GET, "/api/airports/search?q=b", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_branches() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        Some(json!({ "email": "mauricio@stokeleads.com", "password": "StokeLeadsD2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        Some(json!({ "email": "sarah@example.com", "password": "anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["id"], "user2");

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        Some(json!({ "email": "sarah@example.com", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_routes_are_role_gated() {
    let app = test_app();

    // No token
    let (status, _) = send(&app, Method::GET, "/v1/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // User-role token
    let user_token = login(&app, "alex.croft@example.com", "pw").await;
    let (status, _) = send(&app, Method::GET, "/v1/admin/users", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin token
    let admin_token = login(&app, "mauricio@stokeleads.com", "StokeLeadsD2").await;
    let (status, body) = send(&app, Method::GET, "/v1/admin/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_admin_flight_lifecycle() {
    let app = test_app();
    let admin_token = login(&app, "mauricio@stokeleads.com", "StokeLeadsD2").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/v1/admin/flights/FL-1099/status",
        Some(&admin_token),
        Some(json!({ "status": "Confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Confirmed");
    assert_eq!(body["origin"], "SEA");

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/v1/admin/flights/FL-1042",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone means a second delete is 404
    let (status, _) = send(
        &app,
        Method::DELETE,
        "/v1/admin/flights/FL-1042",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, flights) = send(&app, Method::GET, "/v1/admin/flights", Some(&admin_token), None).await;
    assert_eq!(flights.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_concierge_flow() {
    let app = test_app();
    let user_token = login(&app, "alex.croft@example.com", "pw").await;
    let admin_token = login(&app, "mauricio@stokeleads.com", "StokeLeadsD2").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/concierge",
        Some(&user_token),
        Some(json!({
            "flight_id": "FL-1042",
            "type": "Ground Transport",
            "details": "SUV at the FBO, two car seats."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Open");
    let request_id = body["id"].as_str().unwrap().to_string();
    assert!(request_id.starts_with("CR-"));

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/v1/admin/concierge/{request_id}/fulfill"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = send(&app, Method::GET, "/v1/admin/concierge", Some(&admin_token), None).await;
    let fulfilled = all
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == request_id.as_str())
        .unwrap();
    assert_eq!(fulfilled["status"], "Fulfilled");
}

#[tokio::test]
async fn test_wizard_funnel_over_http() {
    let app = test_app();

    let (status, created) = send(&app, Method::POST, "/v1/wizard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["wizard_id"].as_str().unwrap().to_string();
    assert_eq!(created["wizard"]["screen"], "HOME");

    // Guard: no destination
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/wizard/{id}/search"),
        None,
        Some(json!({ "depart_date": "2026-09-12" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in destination and departure date.");

    // Complete search moves to RESULTS and returns the fleet
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/wizard/{id}/search"),
        None,
        Some(json!({ "destination": "KSFO", "depart_date": "2026-09-12" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wizard"]["screen"], "RESULTS");
    assert_eq!(body["results"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/wizard/{id}/select"),
        None,
        Some(json!({ "aircraft_id": "cirrus-vision" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["screen"], "DETAILS");

    // The CRM is unconfigured, so the relay fails: the wizard stays on
    // DETAILS with the error recorded inline, and the flag clears.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/wizard/{id}/details"),
        None,
        Some(json!({ "name": "Alex Croft", "email": "alex@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["screen"], "DETAILS");
    assert_eq!(body["error"], "Server configuration error");
    assert_eq!(body["submitting"], false);

    // Missing contact details are rejected before any relay attempt
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/wizard/{id}/details"),
        None,
        Some(json!({ "name": "", "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in required contact details.");
}

#[tokio::test]
async fn test_wizard_delete_releases_the_entry() {
    let app = test_app();

    let (_, created) = send(&app, Method::POST, "/v1/wizard", None, None).await;
    let id = created["wizard_id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::DELETE, &format!("/v1/wizard/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The entry is gone, not just reset
    let (status, _) = send(&app, Method::GET, &format!("/v1/wizard/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/v1/wizard/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_views_follow_role() {
    let app = test_app();
    let user_token = login(&app, "alex.croft@example.com", "pw").await;
    let admin_token = login(&app, "mauricio@stokeleads.com", "StokeLeadsD2").await;

    let (_, views) = send(&app, Method::GET, "/v1/views", Some(&user_token), None).await;
    let views = views.as_array().unwrap();
    assert!(views.contains(&json!("dashboard")));
    assert!(!views.contains(&json!("admin-dashboard")));

    let (_, views) = send(&app, Method::GET, "/v1/views", Some(&admin_token), None).await;
    assert!(views.as_array().unwrap().contains(&json!("admin-concierge")));
}

#[tokio::test]
async fn test_book_flight_appears_in_upcoming() {
    let app = test_app();
    let user_token = login(&app, "sarah@example.com", "pw").await;
    let date = (chrono::Utc::now() + chrono::Duration::days(21))
        .format("%Y-%m-%d")
        .to_string();

    let (status, booked) = send(
        &app,
        Method::POST,
        "/v1/flights",
        Some(&user_token),
        Some(json!({
            "origin": "RDM",
            "destination": "KSUN",
            "date": date,
            "time": "09:30",
            "aircraft": "Diamond DA62 (Orange)",
            "passengers": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booked["status"], "Pending");

    let (_, flights) = send(&app, Method::GET, "/v1/flights", Some(&user_token), None).await;
    let upcoming = flights["upcoming"].as_array().unwrap();
    assert!(upcoming.iter().any(|f| f["id"] == booked["id"]));
}
