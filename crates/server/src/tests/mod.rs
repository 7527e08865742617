// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end tests through the router.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use plazas_api::{MIN_HASH_COST, UTF8_BOM};
use plazas_catalog::{CatalogError, StaticCatalog};
use plazas_domain::{Specialty, Zone};
use plazas_persistence::{InMemoryStore, JsonFileStore};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

const TEST_PASSWORD: &str = "plazas-admin";

fn create_test_catalog() -> Vec<PositionRecord> {
    vec![
        PositionRecord::new(
            Zone::new("Norte").unwrap(),
            Specialty::new("Cardiología").unwrap(),
            3,
            2,
        ),
        PositionRecord::new(
            Zone::new("Norte").unwrap(),
            Specialty::new("Pediatría").unwrap(),
            1,
            0,
        ),
        PositionRecord::new(
            Zone::new("Sur").unwrap(),
            Specialty::new("Anestesiología").unwrap(),
            2,
            1,
        ),
    ]
}

fn create_app_state_with(
    source: Box<dyn CatalogSource>,
    store: Box<dyn ClaimsStore>,
) -> AppState {
    let hash: String = AdminGate::hash_password(TEST_PASSWORD, MIN_HASH_COST).unwrap();
    AppState {
        catalog: Arc::new(Mutex::new(CatalogCache::new(
            source,
            Duration::from_secs(60),
        ))),
        store: Arc::new(Mutex::new(store)),
        sessions: Arc::new(Mutex::new(SessionRegistry::new())),
        gate: Arc::new(AdminGate::from_hash(&hash).unwrap()),
        settings: LedgerSettings::default(),
    }
}

/// Helper to create test app state with an in-memory store.
fn create_test_app_state() -> AppState {
    create_app_state_with(
        Box::new(StaticCatalog::new(create_test_catalog())),
        Box::new(InMemoryStore::new()),
    )
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

async fn login_token(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/login",
            None,
            &serde_json::json!({ "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    let login: LoginResponse = read_json(response).await;
    login.session_token
}

struct BrokenSource;

impl CatalogSource for BrokenSource {
    fn describe(&self) -> String {
        String::from("missing.xlsx")
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        Err(CatalogError::Unavailable {
            source_name: self.describe(),
            reason: String::from("No such file or directory"),
        })
    }
}

#[tokio::test]
async fn test_health() {
    let app: Router = build_router(create_test_app_state());

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_dashboard_on_fresh_store() {
    let app: Router = build_router(create_test_app_state());

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    let dashboard: DashboardResponse = read_json(response).await;
    assert_eq!(dashboard.event_day, 1);
    assert_eq!(dashboard.max_event_day, 10);
    assert_eq!(dashboard.last_updated, None);
    assert_eq!(dashboard.summary.totals.total_available, 9);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let response = app
        .oneshot(post_request(
            "/admin/login",
            None,
            &serde_json::json!({ "password": "guess" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    assert!(body.error);
    assert!(body.message.contains("Incorrect password"));
}

#[tokio::test]
async fn test_record_claim_requires_session() {
    let app: Router = build_router(create_test_app_state());

    let response = app
        .oneshot(post_request(
            "/admin/claims",
            None,
            &serde_json::json!({
                "zone": "Norte",
                "specialty": "Cardiología",
                "permanent_claimed": 1,
                "interim_claimed": 0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_record_claim_then_dashboard() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/claims",
            Some(&token),
            &serde_json::json!({
                "zone": "Norte",
                "specialty": "Cardiología",
                "permanent_claimed": 2,
                "interim_claimed": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    let recorded: RecordClaimResponse = read_json(response).await;
    assert_eq!(recorded.position.total_available, 1);
    assert!(recorded.last_updated.is_some());

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();
    let dashboard: DashboardResponse = read_json(response).await;
    assert_eq!(dashboard.summary.totals.total_claimed, 4);
    assert_eq!(dashboard.summary.totals.total_available, 5);
    assert_eq!(dashboard.last_updated, recorded.last_updated);
}

#[tokio::test]
async fn test_over_claim_is_unprocessable_and_not_saved() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/claims",
            Some(&token),
            &serde_json::json!({
                "zone": "Norte",
                "specialty": "Cardiología",
                "permanent_claimed": 4,
                "interim_claimed": 0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = read_json(response).await;
    assert!(body.message.contains("permanent_claimed"));

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();
    let dashboard: DashboardResponse = read_json(response).await;
    assert_eq!(dashboard.summary.totals.total_claimed, 0);
    assert_eq!(dashboard.last_updated, None);
}

#[tokio::test]
async fn test_preview_claim_leaves_store_untouched() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/claims/preview",
            Some(&token),
            &serde_json::json!({
                "zone": "Sur",
                "specialty": "Anestesiología",
                "permanent_claimed": 2,
                "interim_claimed": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    let preview: PreviewClaimResponse = read_json(response).await;
    assert_eq!(preview.position.total_available, 0);

    let response = app.oneshot(get_request("/zones")).await.unwrap();
    let zones: ZonesResponse = read_json(response).await;
    assert_eq!(zones.summary.totals.total_claimed, 0);
}

#[tokio::test]
async fn test_set_event_day() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/event_day",
            Some(&token),
            &serde_json::json!({ "day": 11 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/event_day",
            Some(&token),
            &serde_json::json!({ "day": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    let changed: SetEventDayResponse = read_json(response).await;
    assert_eq!(changed.previous_day, 1);
    assert_eq!(changed.event_day, 5);

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();
    let dashboard: DashboardResponse = read_json(response).await;
    assert_eq!(dashboard.event_day, 5);
}

#[tokio::test]
async fn test_positions_query_filters() {
    let app: Router = build_router(create_test_app_state());

    let response = app
        .oneshot(get_request("/positions?zones=Sur&kind=interim&sorted=true"))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    let positions: PositionsResponse = read_json(response).await;
    assert_eq!(positions.count, 1);
    assert_eq!(positions.positions[0].specialty.name(), "Anestesiología");
}

#[tokio::test]
async fn test_export_is_a_csv_attachment() {
    let app: Router = build_router(create_test_app_state());

    let response = app.oneshot(get_request("/export.csv")).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        CSV_CONTENT_TYPE
    );
    let disposition: String = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"plazas_day1_"));
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body_bytes.starts_with(UTF8_BOM));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(post_request(
            "/admin/logout",
            Some(&token),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);

    let response = app
        .oneshot(post_request(
            "/admin/catalog/refresh",
            Some(&token),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_catalog_is_service_unavailable() {
    let app: Router = build_router(create_app_state_with(
        Box::new(BrokenSource),
        Box::new(InMemoryStore::new()),
    ));

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = read_json(response).await;
    assert!(body.message.contains("missing.xlsx"));
}

#[tokio::test]
async fn test_missing_claims_file_is_service_unavailable() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "plazas_server_missing_{}.json",
        std::process::id()
    ));
    let app: Router = build_router(create_app_state_with(
        Box::new(StaticCatalog::new(create_test_catalog())),
        Box::new(JsonFileStore::new(path)),
    ));

    let response = app.oneshot(get_request("/zones")).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_max_event_day_must_be_positive() {
    let rejected = Args::try_parse_from(["plazas-server", "--max-event-day", "0"]);
    assert!(rejected.is_err());

    let accepted: Args = Args::try_parse_from(["plazas-server", "--max-event-day", "1"]).unwrap();
    assert_eq!(accepted.max_event_day, 1);

    let defaults: Args = Args::try_parse_from(["plazas-server"]).unwrap();
    assert_eq!(defaults.max_event_day, 10);
}
