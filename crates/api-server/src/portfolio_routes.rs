use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fund_core::{DemoPortfolio, FundService, PortfolioAnalysis, PortfolioPosition};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PortfolioRequest {
    pub positions: Vec<PortfolioPosition>,
}

pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio/analyze", post(analyze_portfolio))
        .route("/api/portfolio/demo", get(demo_portfolio))
}

#[utoipa::path(
    post,
    path = "/api/portfolio/analyze",
    request_body = PortfolioRequest,
    responses(
        (status = 200, description = "Weighted returns and composite risk", body = PortfolioAnalysis),
        (status = 422, description = "No position resolved to a known fund"),
    ),
    tag = "Portfolio"
)]
pub async fn analyze_portfolio(
    State(state): State<AppState>,
    Json(request): Json<PortfolioRequest>,
) -> Result<Json<ApiResponse<PortfolioAnalysis>>, AppError> {
    let analysis = state.service.analyze_portfolio(&request.positions).await?;

    tracing::info!(
        requested = request.positions.len(),
        resolved = analysis.composition.len(),
        risk = %analysis.risk,
        "portfolio analysed"
    );

    Ok(Json(ApiResponse::success(analysis)))
}

#[utoipa::path(
    get,
    path = "/api/portfolio/demo",
    responses((status = 200, description = "Sample portfolio with its monthly performance series", body = DemoPortfolio)),
    tag = "Portfolio"
)]
pub async fn demo_portfolio(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DemoPortfolio>>, AppError> {
    Ok(Json(ApiResponse::success(state.service.demo_portfolio().await?)))
}
