pub mod config;
pub mod fund_routes;
pub mod portfolio_routes;
pub mod request_id;


use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use fund_analytics::{MockFundService, StaticReferenceData};
use fund_core::FundError;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MockFundService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(service: MockFundService, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}

/// Envelope every JSON endpoint responds with
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<FundError> for AppError {
    fn from(err: FundError) -> Self {
        let status = match &err {
            FundError::NotFound(_) => StatusCode::NOT_FOUND,
            _ if err.is_request_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "FundScope API", description = "Mutual fund search, analysis, comparison and portfolio analytics"),
    paths(
        health,
        fund_routes::list_funds,
        fund_routes::search_funds,
        fund_routes::get_fund,
        fund_routes::get_fund_analysis,
        fund_routes::compare_funds,
        portfolio_routes::analyze_portfolio,
        portfolio_routes::demo_portfolio,
    ),
    components(schemas(
        fund_core::FundRecord,
        fund_core::FundReturns,
        fund_core::FormattedReturns,
        fund_core::RiskLevel,
        fund_core::FundType,
        fund_core::RiskFilter,
        fund_core::FundAnalysis,
        fund_core::AnalysisRecord,
        fund_core::AnalysisInsights,
        fund_core::ComparisonResult,
        fund_core::PortfolioPosition,
        fund_core::PortfolioAnalysis,
        fund_core::DemoPortfolio,
        fund_routes::CompareRequest,
        portfolio_routes::PortfolioRequest,
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Funds", description = "Catalog search and single-fund analysis"),
        (name = "Portfolio", description = "Weighted portfolio analytics"),
    )
)]
pub struct ApiDoc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub funds: usize,
    pub simulated_latency: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        funds: state.service.catalog().len(),
        simulated_latency: state.config.simulated_latency,
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config)?;

    let router = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(fund_routes::fund_routes())
        .merge(portfolio_routes::portfolio_routes())
        .with_state(state)
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors)
        .layer(middleware::from_fn(security_headers_middleware));

    Ok(router)
}

/// Hardening headers for a JSON-only API. Comparison responses carry random
/// placeholder figures, so nothing may be cached.
async fn security_headers_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

fn cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let Some(origin) = &config.cors_allow_origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("CORS_ALLOW_ORIGIN is not a valid origin: {origin:?}"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Install the global tracing subscriber. `RUST_LOG_FORMAT=json` switches to
/// JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        eprintln!("tracing already initialised: {err}");
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let catalog = config.load_catalog()?;
    tracing::info!(
        funds = catalog.len(),
        source = %config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_string()),
        "fund catalog loaded"
    );

    let service = MockFundService::new(
        Arc::new(catalog),
        Arc::new(StaticReferenceData::new()),
        config.latency_profile(),
    );
    let addr = config.bind_address();
    let app = build_router(AppState::new(service, config))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("FundScope API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
