// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono_tz::Tz;
use clap::Parser;
use plazas_api::{
    AdminGate, ApiError, CSV_CONTENT_TYPE, CsvExport, DashboardResponse, LedgerSettings,
    LoginRequest, LoginResponse, LogoutResponse, PositionsQuery, PositionsResponse,
    PreviewClaimResponse, RecordClaimRequest, RecordClaimResponse, RefreshCatalogResponse,
    SessionRegistry, SetEventDayRequest, SetEventDayResponse, ZonesResponse, export_positions,
    get_dashboard, list_positions, list_zones, load_catalog, login, logout, preview_claim_request,
    record_claim, refresh_catalog, set_event_day,
};
use plazas_catalog::{
    CatalogCache, CatalogLayout, CatalogSource, CsvCatalog, DEFAULT_SHEET, XlsxCatalog,
};
use plazas_domain::{EventDayBounds, PositionRecord};
use plazas_persistence::{ClaimsStore, JsonFileStore, SqliteStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::AdminSession;

/// Bcrypt cost used by `--hash-password`.
const HASH_COST: u32 = 12;

/// Plazas Monitor Server - HTTP server for the staffing availability ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the catalog workbook (`.xlsx`) or CSV export.
    #[arg(short, long, env = "PLAZAS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Catalog layout: `tabular` (header row) or `grouped` (zone sections).
    #[arg(long, default_value = "tabular")]
    catalog_layout: CatalogLayout,

    /// Worksheet holding the catalog in a workbook.
    #[arg(long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Keep claims in a JSON document at this path.
    #[arg(long, conflicts_with = "database")]
    store_json: Option<PathBuf>,

    /// Keep claims in a `SQLite` database file. If neither store is given, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Create an empty JSON claims document if none exists.
    #[arg(long, requires = "store_json")]
    init_store: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Highest event day that can be selected.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    max_event_day: u32,

    /// Seconds a loaded catalog stays cached.
    #[arg(long, default_value_t = 60)]
    catalog_ttl_secs: u64,

    /// IANA timezone for `last_updated` and export names.
    #[arg(long, default_value = "America/Tijuana")]
    timezone: String,

    /// Bcrypt hash of the shared admin password.
    #[arg(long, env = "PLAZAS_ADMIN_PASSWORD_HASH", hide_env_values = true)]
    admin_password_hash: Option<String>,

    /// Print the bcrypt hash of this password and exit.
    #[arg(long, value_name = "PASSWORD")]
    hash_password: Option<String>,
}

/// Application state shared across handlers.
///
/// Each resource sits behind its own Mutex; the claims store lock is held for
/// the whole of a write so that load, validate and save run to completion.
#[derive(Clone)]
struct AppState {
    /// The position catalog, cached between requests.
    catalog: Arc<Mutex<CatalogCache>>,
    /// The claims store.
    store: Arc<Mutex<Box<dyn ClaimsStore>>>,
    /// Live admin sessions.
    sessions: Arc<Mutex<SessionRegistry>>,
    /// The admin password check.
    gate: Arc<AdminGate>,
    /// Event-day bounds and timezone.
    settings: LedgerSettings,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Response for the health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` while the process is serving.
    status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::CatalogUnavailable { .. }
            | ApiError::CatalogFormat { .. }
            | ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(status = %status, error = %err, "Request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Reads the catalog through the shared cache.
async fn current_catalog(app_state: &AppState) -> Result<Arc<Vec<PositionRecord>>, HttpError> {
    let mut cache = app_state.catalog.lock().await;
    let catalog: Arc<Vec<PositionRecord>> = load_catalog(&mut cache)?;
    drop(cache);
    Ok(catalog)
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/dashboard` endpoint.
///
/// Returns the event header and the global KPIs.
async fn handle_get_dashboard(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DashboardResponse>, HttpError> {
    info!("Handling get_dashboard request");

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let response: DashboardResponse =
        get_dashboard(&catalog, store.as_mut(), &app_state.settings)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/positions` endpoint.
///
/// Returns availability rows matching the zone, availability and kind filters.
async fn handle_list_positions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Result<Json<PositionsResponse>, HttpError> {
    info!(
        zones = ?query.zones,
        only_available = ?query.only_available,
        kind = ?query.kind,
        "Handling list_positions request"
    );

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let response: PositionsResponse = list_positions(&catalog, store.as_mut(), &query)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/zones` endpoint.
async fn handle_list_zones(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ZonesResponse>, HttpError> {
    info!("Handling list_zones request");

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let response: ZonesResponse = list_zones(&catalog, store.as_mut())?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/export.csv` endpoint.
///
/// Returns the filtered rows as a CSV attachment.
async fn handle_export(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Result<Response, HttpError> {
    info!(zones = ?query.zones, "Handling export request");

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let export: CsvExport = export_positions(
        &catalog,
        store.as_mut(),
        &query,
        &app_state.settings.now(),
    )?;
    drop(store);

    let headers: [(header::HeaderName, String); 2] = [
        (header::CONTENT_TYPE, String::from(CSV_CONTENT_TYPE)),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.body).into_response())
}

/// Handler for POST `/admin/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut sessions = app_state.sessions.lock().await;
    let response: LoginResponse = login(&app_state.gate, &mut sessions, &req)?;
    drop(sessions);

    Ok(Json(response))
}

/// Handler for POST `/admin/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(token): AdminSession,
) -> Result<Json<LogoutResponse>, HttpError> {
    info!("Handling logout request");

    let mut sessions = app_state.sessions.lock().await;
    let response: LogoutResponse = logout(&mut sessions, &token)?;
    drop(sessions);

    Ok(Json(response))
}

/// Handler for POST `/admin/claims` endpoint.
///
/// Records the claimed counts of one position.
async fn handle_record_claim(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Json(req): Json<RecordClaimRequest>,
) -> Result<Json<RecordClaimResponse>, HttpError> {
    info!(
        zone = %req.zone,
        specialty = %req.specialty,
        permanent_claimed = req.permanent_claimed,
        interim_claimed = req.interim_claimed,
        "Handling record_claim request"
    );

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let response: RecordClaimResponse = record_claim(
        &catalog,
        store.as_mut(),
        &req,
        &app_state.settings,
        &app_state.settings.now(),
    )?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/admin/claims/preview` endpoint.
///
/// Validates a claim and returns what it would leave, without saving.
async fn handle_preview_claim(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Json(req): Json<RecordClaimRequest>,
) -> Result<Json<PreviewClaimResponse>, HttpError> {
    info!(
        zone = %req.zone,
        specialty = %req.specialty,
        "Handling preview_claim request"
    );

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let response: PreviewClaimResponse = preview_claim_request(&catalog, &req)?;

    Ok(Json(response))
}

/// Handler for POST `/admin/event_day` endpoint.
async fn handle_set_event_day(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Json(req): Json<SetEventDayRequest>,
) -> Result<Json<SetEventDayResponse>, HttpError> {
    info!(day = req.day, "Handling set_event_day request");

    let catalog: Arc<Vec<PositionRecord>> = current_catalog(&app_state).await?;
    let mut store = app_state.store.lock().await;
    let response: SetEventDayResponse = set_event_day(
        &catalog,
        store.as_mut(),
        req,
        &app_state.settings,
        &app_state.settings.now(),
    )?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/admin/catalog/refresh` endpoint.
///
/// Drops the cached catalog and reloads it from its source.
async fn handle_refresh_catalog(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
) -> Result<Json<RefreshCatalogResponse>, HttpError> {
    info!("Handling refresh_catalog request");

    let mut cache = app_state.catalog.lock().await;
    let response: RefreshCatalogResponse = refresh_catalog(&mut cache)?;
    drop(cache);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/dashboard", get(handle_get_dashboard))
        .route("/positions", get(handle_list_positions))
        .route("/zones", get(handle_list_zones))
        .route("/export.csv", get(handle_export))
        .route("/admin/login", post(handle_login))
        .route("/admin/logout", post(handle_logout))
        .route("/admin/claims", post(handle_record_claim))
        .route("/admin/claims/preview", post(handle_preview_claim))
        .route("/admin/event_day", post(handle_set_event_day))
        .route("/admin/catalog/refresh", post(handle_refresh_catalog))
        .with_state(app_state)
}

/// Picks the catalog reader from the file extension.
fn build_catalog_source(
    path: PathBuf,
    layout: CatalogLayout,
    sheet: &str,
) -> Box<dyn CatalogSource> {
    let is_csv: bool = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Box::new(CsvCatalog::new(path, layout))
    } else {
        Box::new(XlsxCatalog::new(path, sheet, layout))
    }
}

/// Opens the configured claims store.
fn build_store(args: &Args) -> Result<Box<dyn ClaimsStore>, Box<dyn std::error::Error>> {
    if let Some(json_path) = &args.store_json {
        let store: JsonFileStore = JsonFileStore::new(json_path);
        if args.init_store && store.initialize()? {
            info!(path = %json_path.display(), "Created empty claims document");
        }
        info!(path = %json_path.display(), "Using JSON claims store");
        return Ok(Box::new(store));
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Ok(Box::new(SqliteStore::new_with_file(db_path)?))
    } else {
        info!("Using in-memory database");
        Ok(Box::new(SqliteStore::new_in_memory()?))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    if let Some(password) = &args.hash_password {
        println!("{}", AdminGate::hash_password(password, HASH_COST)?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Plazas Monitor Server");

    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|_| format!("Unknown timezone '{}'", args.timezone))?;
    let settings: LedgerSettings = LedgerSettings {
        bounds: EventDayBounds::new(args.max_event_day),
        timezone,
    };

    let catalog_path: PathBuf = args
        .catalog
        .clone()
        .ok_or("No catalog given; pass --catalog or set PLAZAS_CATALOG")?;
    let password_hash: String = args
        .admin_password_hash
        .clone()
        .ok_or("No admin password hash given; set PLAZAS_ADMIN_PASSWORD_HASH")?;
    let gate: AdminGate = AdminGate::from_hash(&password_hash)?;

    let source: Box<dyn CatalogSource> =
        build_catalog_source(catalog_path, args.catalog_layout, &args.sheet);
    info!(
        source = %source.describe(),
        layout = %args.catalog_layout,
        ttl_secs = args.catalog_ttl_secs,
        "Using catalog"
    );
    let cache: CatalogCache =
        CatalogCache::new(source, Duration::from_secs(args.catalog_ttl_secs));
    info!(ttl_secs = cache.ttl().as_secs(), "Catalog cache ready");

    let store: Box<dyn ClaimsStore> = build_store(&args)?;

    let app_state: AppState = AppState {
        catalog: Arc::new(Mutex::new(cache)),
        store: Arc::new(Mutex::new(store)),
        sessions: Arc::new(Mutex::new(SessionRegistry::new())),
        gate: Arc::new(gate),
        settings,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
