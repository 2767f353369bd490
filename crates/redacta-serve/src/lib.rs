use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use redacta_core::Mode;
use redacta_ledger::{AccessLedger, LedgerError, TelemetryEntry, TelemetryLog};
use redacta_relay::{CompletionProvider, Relay, RelayError};

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
}

// ── App State ──

struct AppState {
    ledger: Arc<AccessLedger>,
    relay: Relay,
    telemetry: TelemetryLog,
}

// ── Error Handling ──

/// An error mapped to an HTTP status and a static client-facing message.
/// Whatever detail exists is logged where the error arose, never sent out.
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let (status, message) = match err {
            RelayError::EmptyText => (StatusCode::BAD_REQUEST, "text must not be empty"),
            RelayError::Unauthorized => (StatusCode::UNAUTHORIZED, "unknown or revoked user"),
            RelayError::QuotaExceeded => (StatusCode::FORBIDDEN, "quota exceeded"),
            RelayError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "translation failed"),
        };
        Self { status, message }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidActivationCode => Self {
                status: StatusCode::FORBIDDEN,
                message: "invalid activation code",
            },
        }
    }
}

// ── Entrypoint ──

pub async fn serve(
    config: ServeConfig,
    ledger: Arc<AccessLedger>,
    provider: Arc<dyn CompletionProvider>,
) -> anyhow::Result<()> {
    let app = router(ledger, provider);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("redacta HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(ledger: Arc<AccessLedger>, provider: Arc<dyn CompletionProvider>) -> Router {
    let relay = Relay::new(Arc::clone(&ledger), provider);
    let state = Arc::new(AppState {
        ledger,
        relay,
        telemetry: TelemetryLog::new(),
    });
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/beta/activate", post(post_activate))
        .route("/api/check-beta", post(post_check_beta))
        .route("/api/beta/revoke", post(post_revoke))
        .route("/api/translate", post(post_translate))
        .route("/api/log", post(post_log))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "Backend Bitàcola funcionant OK" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// ── POST /api/beta/activate ──

#[derive(Deserialize)]
struct ActivateBody {
    #[serde(default)]
    code: String,
}

#[derive(Serialize)]
struct ActivateResponse {
    user_id: String,
}

async fn post_activate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ActivateBody>,
) -> Result<Json<ActivateResponse>, ApiError> {
    let user_id = state.ledger.activate(&body.code)?;
    Ok(Json(ActivateResponse { user_id }))
}

// ── POST /api/check-beta ──

#[derive(Deserialize)]
struct UserBody {
    #[serde(default)]
    user_id: String,
}

#[derive(Serialize)]
struct CheckBetaResponse {
    has_access: bool,
}

async fn post_check_beta(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UserBody>,
) -> Json<CheckBetaResponse> {
    Json(CheckBetaResponse {
        has_access: state.ledger.check_access(&body.user_id),
    })
}

// ── POST /api/beta/revoke ──

async fn post_revoke(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UserBody>,
) -> Json<serde_json::Value> {
    state.ledger.revoke(&body.user_id);
    Json(serde_json::json!({ "ok": true }))
}

// ── POST /api/translate ──

#[derive(Deserialize)]
struct TranslateBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    user_id: String,
}

#[derive(Serialize)]
struct TranslateResponse {
    translation: String,
}

async fn post_translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let mode = Mode::parse(body.mode.as_deref());
    let translation = state.relay.translate(&body.text, mode, &body.user_id).await?;
    Ok(Json(TranslateResponse { translation }))
}

// ── POST /api/log ──

/// Fire-and-forget telemetry. The body is parsed leniently from raw bytes so
/// a malformed payload still gets `{ ok: true }`; failures are traced only.
async fn post_log(State(state): State<Arc<AppState>>, body: Bytes) -> Json<serde_json::Value> {
    match serde_json::from_slice::<TelemetryEntry>(&body) {
        Ok(entry) => state.telemetry.record(entry),
        Err(err) => tracing::warn!(error = %err, "unparseable telemetry payload dropped"),
    }
    Json(serde_json::json!({ "ok": true }))
}

// ── Tests ──
