// Brand Deck - Web Server
// REST API over the presentation store: CRUD, demo seeds, and server-side
// scenario recomputation for the rendering layer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use brand_deck::{
    apply_scenario, generate_brand_palette, generate_mock_financial_data, resolve_theme,
    BrandConfig, FinancialData, Presentation, PresentationSummary, PresentationUpdate,
    ResolvedTheme, ScenarioLever, ThemeMode, DEFAULT_PRIMARY_COLOR,
};
use brand_deck::store::{self, NewPresentation};
use brand_deck::theme::CHART_SERIES_COUNT;

/// Shared application state
#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Connection>>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePresentationRequest {
    company_name: Option<String>,
    logo_url: Option<String>,
    primary_color: Option<String>,
    theme_mode: Option<ThemeMode>,
    customer_company_name: Option<String>,
    customer_logo_url: Option<String>,
    presentation_title: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UpdatePresentationRequest {
    company_name: Option<String>,
    logo_url: Option<String>,
    primary_color: Option<String>,
    theme_mode: Option<ThemeMode>,
    customer_company_name: Option<String>,
    customer_logo_url: Option<String>,
    presentation_title: Option<String>,
}

impl From<UpdatePresentationRequest> for PresentationUpdate {
    fn from(req: UpdatePresentationRequest) -> Self {
        PresentationUpdate {
            company_name: req.company_name,
            logo_url: req.logo_url,
            primary_color: req.primary_color,
            theme_mode: req.theme_mode,
            customer_company_name: req.customer_company_name,
            customer_logo_url: req.customer_logo_url,
            presentation_title: req.presentation_title,
        }
    }
}

/// Full presentation payload, with the dataset inline and the theme resolved
/// server-side so the rendering layer consumes plain parameters.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresentationResponse {
    id: String,
    company_name: String,
    logo_url: Option<String>,
    primary_color: String,
    theme_mode: ThemeMode,
    customer_company_name: Option<String>,
    customer_logo_url: Option<String>,
    presentation_title: Option<String>,
    financial_data: FinancialData,
    theme: ResolvedTheme,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<Presentation> for PresentationResponse {
    fn from(p: Presentation) -> Self {
        let theme = resolve_theme(&BrandConfig {
            company_name: p.company_name.clone(),
            logo_url: p.logo_url.clone(),
            primary_color: p.primary_color.clone(),
            theme_mode: p.theme_mode,
        });

        Self {
            id: p.id,
            company_name: p.company_name,
            logo_url: p.logo_url,
            primary_color: p.primary_color,
            theme_mode: p.theme_mode,
            customer_company_name: p.customer_company_name,
            customer_logo_url: p.customer_logo_url,
            presentation_title: p.presentation_title,
            financial_data: p.financial_data,
            theme,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/presentations - List presentations (newest first, no snapshots)
async fn get_presentations(State(state): State<AppState>) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::list_presentations(&conn) {
        Ok(summaries) => (StatusCode::OK, Json(ApiResponse::ok(summaries))).into_response(),
        Err(e) => {
            tracing::error!("listing presentations failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<PresentationSummary>>::err(
                    "Failed to fetch presentations",
                )),
            )
                .into_response()
        }
    }
}

/// POST /api/presentations - Create a presentation
/// Generates the brand palette and freezes a fresh mock dataset.
async fn create_presentation(
    State(state): State<AppState>,
    Json(req): Json<CreatePresentationRequest>,
) -> impl IntoResponse {
    let Some(company_name) = req.company_name.filter(|n| !n.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<PresentationResponse>::err(
                "Company name is required",
            )),
        )
            .into_response();
    };

    let primary_color = req
        .primary_color
        .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string());

    let chart_colors = generate_brand_palette(&primary_color, CHART_SERIES_COUNT);
    let financial_data = generate_mock_financial_data(&chart_colors);

    let new = NewPresentation {
        company_name,
        logo_url: req.logo_url,
        primary_color,
        theme_mode: req.theme_mode.unwrap_or_default(),
        customer_company_name: req.customer_company_name,
        customer_logo_url: req.customer_logo_url,
        presentation_title: req.presentation_title,
    };

    let conn = state.db.lock().unwrap();
    match store::create_presentation(&conn, &new, &financial_data) {
        Ok(presentation) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(PresentationResponse::from(presentation))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("creating presentation failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PresentationResponse>::err(
                    "Failed to create presentation",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/presentations/:id - Fetch one presentation with resolved theme
async fn get_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::get_presentation(&conn, &id) {
        Ok(Some(presentation)) => (
            StatusCode::OK,
            Json(ApiResponse::ok(PresentationResponse::from(presentation))),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<PresentationResponse>::err(
                "Presentation not found",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("fetching presentation {id} failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PresentationResponse>::err(
                    "Failed to fetch presentation",
                )),
            )
                .into_response()
        }
    }
}

/// PATCH /api/presentations/:id - Branding-only update
async fn update_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePresentationRequest>,
) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::update_presentation(&conn, &id, &req.into()) {
        Ok(Some(presentation)) => (
            StatusCode::OK,
            Json(ApiResponse::ok(PresentationResponse::from(presentation))),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<PresentationResponse>::err(
                "Presentation not found",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("updating presentation {id} failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PresentationResponse>::err(
                    "Failed to update presentation",
                )),
            )
                .into_response()
        }
    }
}

/// DELETE /api/presentations/:id - Delete a presentation
async fn delete_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::delete_presentation(&conn, &id) {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::ok(DeleteResponse { success: true })))
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<DeleteResponse>::err("Presentation not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("deleting presentation {id} failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DeleteResponse>::err(
                    "Failed to delete presentation",
                )),
            )
                .into_response()
        }
    }
}

/// POST /api/presentations/init - Seed the dark-mode demo (idempotent)
async fn init_demo(State(state): State<AppState>) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::seed_dark_demo(&conn) {
        Ok(outcome) => (StatusCode::OK, Json(ApiResponse::ok(outcome))).into_response(),
        Err(e) => {
            tracing::error!("seeding dark demo failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<brand_deck::SeedOutcome>::err(
                    "Failed to initialize demo presentation",
                )),
            )
                .into_response()
        }
    }
}

/// POST /api/presentations/demo-light - Seed/refresh the light-mode demo
async fn init_demo_light(State(state): State<AppState>) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::seed_light_demo(&conn) {
        Ok(outcome) => (StatusCode::OK, Json(ApiResponse::ok(outcome))).into_response(),
        Err(e) => {
            tracing::error!("seeding light demo failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<brand_deck::SeedOutcome>::err(
                    "Failed to create light mode demo presentation",
                )),
            )
                .into_response()
        }
    }
}

/// POST /api/presentations/:id/simulate - Recompute one sub-record from a
/// lever against the stored snapshot. Nothing is persisted: the stored
/// dataset stays frozen, the caller renders the returned copy.
async fn simulate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(lever): Json<ScenarioLever>,
) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match store::get_presentation(&conn, &id) {
        Ok(Some(presentation)) => {
            let simulated = apply_scenario(&presentation.financial_data, &lever);
            (StatusCode::OK, Json(ApiResponse::ok(simulated))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<FinancialData>::err("Presentation not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("simulating on presentation {id} failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<FinancialData>::err("Failed to run simulation")),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path =
        std::env::var("BRAND_DECK_DB").unwrap_or_else(|_| "presentations.db".to_string());

    let conn = Connection::open(&db_path).expect("Failed to open database");
    brand_deck::setup_database(&conn).expect("Failed to set up database schema");
    tracing::info!(path = %db_path, "database ready");

    // Create shared state
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/presentations", get(get_presentations).post(create_presentation))
        .route(
            "/presentations/:id",
            get(get_presentation)
                .patch(update_presentation)
                .delete(delete_presentation),
        )
        .route("/presentations/init", post(init_demo))
        .route("/presentations/demo-light", post(init_demo_light))
        .route("/presentations/:id/simulate", post(simulate))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("deck-server listening on http://localhost:3000/api");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
