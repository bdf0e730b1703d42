// TechMania 2025 Registration System - Web Server
// REST API over the registration core with Axum

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use techmania_registration::{
    load_or_empty, price, suggested_filename, EventStats, EventType, HardcodedAuth, NoDelay,
    RawRegistration, Registration, Session, SqliteKeyValue, SubmitError, EVENT_TYPES, TEAM_SIZES,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    inner: Arc<Mutex<ServerCtx>>,
}

struct ServerCtx {
    session: Session,
    kv: SqliteKeyValue,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

/// One pricing table entry
#[derive(Serialize)]
struct PriceEntry {
    event_type: EventType,
    team_size: u8,
    fee: u32,
}

/// Registration submission payload
#[derive(Deserialize)]
struct SubmitRequest {
    event_type: EventType,
    team_size: u8,
    team_name: String,
    members: Vec<String>,
    mobile: String,
    transaction_id: String,
}

/// Admin login payload
#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Optional event-type filter on the table endpoint
#[derive(Deserialize)]
struct FilterParams {
    event: Option<EventType>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/pricing - Full pricing table
async fn get_pricing() -> impl IntoResponse {
    let mut entries = Vec::new();
    for event_type in EVENT_TYPES {
        for team_size in TEAM_SIZES {
            // The table is total over the supported domain
            if let Ok(fee) = price(event_type, team_size) {
                entries.push(PriceEntry {
                    event_type,
                    team_size,
                    fee,
                });
            }
        }
    }

    Json(ApiResponse::ok(entries))
}

/// GET /api/pricing/:event/:size - Single price lookup
async fn get_price(Path((event, size)): Path<(EventType, u8)>) -> impl IntoResponse {
    match price(event, size) {
        Ok(fee) => (StatusCode::OK, Json(ApiResponse::ok(fee))).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(err.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/registrations - Submit a registration
async fn submit_registration(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> impl IntoResponse {
    let mut ctx = state.inner.lock().unwrap();

    ctx.session.select_event_type(payload.event_type);
    if let Err(err) = ctx.session.select_team_size(payload.team_size) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(err.to_string())),
        )
            .into_response();
    }

    let raw = RawRegistration {
        team_name: payload.team_name,
        members: payload.members,
        mobile: payload.mobile,
        transaction_id: payload.transaction_id,
    };

    let ServerCtx { session, kv } = &mut *ctx;
    match session.submit_registration(&raw, kv) {
        Ok(registration) => {
            (StatusCode::CREATED, Json(ApiResponse::ok(registration))).into_response()
        }
        Err(SubmitError::Validation(err)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(err.to_string())),
        )
            .into_response(),
        Err(SubmitError::Store(err)) => {
            eprintln!("Error storing registration: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(err.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /api/registrations?event=hackathon - Filtered, most recent first
async fn get_registrations(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    let ctx = state.inner.lock().unwrap();
    let view: Vec<Registration> = ctx.session.filtered_registrations(params.event);
    Json(ApiResponse::ok(view))
}

/// GET /api/stats - Registration counters
async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.inner.lock().unwrap();
    let stats: EventStats = ctx.session.stats();
    Json(ApiResponse::ok(stats))
}

/// POST /api/admin/login - Admin authentication
async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut ctx = state.inner.lock().unwrap();

    match ctx.session.login(&payload.username, &payload.password) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok("Welcome"))).into_response(),
        // Same message for unknown user and wrong password
        Err(err) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::err(err.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/admin/logout - End the admin session
async fn admin_logout(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = state.inner.lock().unwrap();
    ctx.session.logout();
    Json(ApiResponse::ok("Logged out"))
}

/// GET /api/export - CSV download of all registrations
async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.inner.lock().unwrap();

    match ctx.session.export_csv() {
        Ok(csv) => {
            let filename = suggested_filename(chrono::Local::now().date_naive());
            let disposition = format!("attachment; filename=\"{}\"", filename);

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(err.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🌐 TechMania 2025 Registration System - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path =
        std::env::var("TECHMANIA_DB").unwrap_or_else(|_| "techmania2025.db".to_string());

    let kv = SqliteKeyValue::open(&db_path).expect("Failed to open registration store");
    println!("✓ Registration store opened: {}", db_path);

    let store = load_or_empty(&kv);
    println!("✓ Loaded {} registrations", store.len());

    // Real network latency replaces the simulated kind
    let session = Session::with_parts(store, Box::new(HardcodedAuth), Box::new(NoDelay));

    let state = AppState {
        inner: Arc::new(Mutex::new(ServerCtx { session, kv })),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/pricing", get(get_pricing))
        .route("/pricing/:event/:size", get(get_price))
        .route(
            "/registrations",
            get(get_registrations).post(submit_registration),
        )
        .route("/stats", get(get_stats))
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .route("/export", get(export_csv))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   Pricing:       http://localhost:3000/api/pricing");
    println!("   Registrations: http://localhost:3000/api/registrations");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
