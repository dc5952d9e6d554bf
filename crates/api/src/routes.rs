use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use charts::{render_all, RenderedChart};
use extract::{Company, CompanyDirectory, CompanyId, ExtractionError, Extractor, FinancialSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};
use crate::request_id::request_id_middleware;
use crate::session::{ChartSession, CurrentCharts, Ticket};

pub struct AppState {
    pub extractor: Extractor,
    pub directory: Arc<dyn CompanyDirectory>,
    pub session: Mutex<ChartSession>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(extractor: Extractor, directory: Arc<dyn CompanyDirectory>) -> Self {
        Self {
            extractor,
            directory,
            session: Mutex::new(ChartSession::new()),
            metrics: Metrics::new(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
struct ChartsRequest {
    company_id: CompanyId,
}

#[derive(Serialize)]
struct ChartsResponse {
    ticket: Ticket,
    company_id: CompanyId,
    /// False when a newer generation started while this one was in flight.
    current: bool,
    snapshot: FinancialSnapshot,
    charts: Vec<RenderedChart>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// Extraction failures mapped onto HTTP responses.
pub struct ApiError(ExtractionError);

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ExtractionError::Transport(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.user_message(),
            field: self.0.field().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // the chart page is served from a different origin than the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/companies", get(list_companies))
        .route("/charts", post(generate_charts))
        .route("/charts/current", get(current_charts))
        .route("/metrics", get(get_metrics))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.directory.list_companies().await?;
    Ok(Json(companies))
}

async fn generate_charts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChartsRequest>,
) -> Result<Json<ChartsResponse>, ApiError> {
    let ticket = state.session.lock().await.begin();
    tracing::info!(company_id = %req.company_id, ticket = ticket.0, "generating charts");

    let timer = TimedOperation::start();
    let result = state.extractor.extract_snapshot(&req.company_id).await;
    state
        .metrics
        .record_extraction(timer.elapsed(), result.as_ref().err());

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            if !state.session.lock().await.fail(ticket) {
                state.metrics.record_stale();
            }
            return Err(e.into());
        }
    };

    let charts = render_all(&snapshot);
    tracing::info!(
        company_id = %req.company_id,
        ticket = ticket.0,
        charts = charts.len(),
        "charts generated"
    );

    let current = state.session.lock().await.complete(CurrentCharts {
        ticket,
        company_id: req.company_id.clone(),
        snapshot: snapshot.clone(),
        charts: charts.clone(),
    });
    if !current {
        state.metrics.record_stale();
    }

    Ok(Json(ChartsResponse {
        ticket,
        company_id: req.company_id,
        current,
        snapshot,
        charts,
    }))
}

async fn current_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentCharts>, StatusCode> {
    let session = state.session.lock().await;
    session.current().cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
