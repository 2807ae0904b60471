//! Fund API Routes
//!
//! Catalog listing, filtered search, single-fund analysis and comparison.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use fund_core::{
    ComparisonResult, FundAnalysis, FundError, FundRecord, FundService, FundType, RiskFilter,
    SearchFilters,
};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

/// Query string for `/api/funds/search`. Every field is optional and parsed
/// leniently: unknown filter values mean no constraint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SearchParams {
    /// Free-text query matched against name, ticker, fund house and category
    #[serde(default)]
    pub q: Option<String>,
    /// equity, debt, hybrid, index, etf or all
    #[serde(default)]
    pub fund_type: Option<String>,
    /// low, moderate, high, very-high or all
    #[serde(default)]
    pub risk_level: Option<String>,
    /// Minimum one-year return in percent
    #[serde(default)]
    pub min_return: Option<String>,
}

impl SearchParams {
    pub fn filters(&self) -> SearchFilters {
        let min_return = self
            .min_return
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        SearchFilters::new(
            self.fund_type
                .as_deref()
                .map(FundType::parse_lenient)
                .unwrap_or_default(),
            self.risk_level
                .as_deref()
                .map(RiskFilter::parse_lenient)
                .unwrap_or_default(),
            min_return,
        )
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub fund_ids: Vec<String>,
}

pub fn fund_routes() -> Router<AppState> {
    Router::new()
        .route("/api/funds", get(list_funds))
        .route("/api/funds/search", get(search_funds))
        .route("/api/funds/compare", post(compare_funds))
        .route("/api/funds/:id", get(get_fund))
        .route("/api/funds/:id/analysis", get(get_fund_analysis))
}

#[utoipa::path(
    get,
    path = "/api/funds",
    responses((status = 200, description = "Every fund in the catalog", body = [FundRecord])),
    tag = "Funds"
)]
pub async fn list_funds(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<FundRecord>>> {
    Json(ApiResponse::success(state.service.catalog().funds().to_vec()))
}

#[utoipa::path(
    get,
    path = "/api/funds/search",
    params(SearchParams),
    responses((status = 200, description = "Funds matching the query and filters", body = [FundRecord])),
    tag = "Funds"
)]
pub async fn search_funds(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<Vec<FundRecord>>> {
    let query = params.q.as_deref().unwrap_or_default();
    let filters = params.filters();
    let funds = state.service.search(query, &filters).await;

    tracing::info!(
        query,
        fund_type = ?filters.fund_type,
        risk_level = ?filters.risk_level,
        min_return = filters.min_return,
        results = funds.len(),
        "fund search"
    );

    Json(ApiResponse::success(funds))
}

#[utoipa::path(
    get,
    path = "/api/funds/{id}",
    params(("id" = String, Path, description = "Fund identifier")),
    responses(
        (status = 200, description = "Fund record", body = FundRecord),
        (status = 404, description = "No fund with this id"),
    ),
    tag = "Funds"
)]
pub async fn get_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FundRecord>>, AppError> {
    let fund = state
        .service
        .catalog()
        .get(&id)
        .cloned()
        .ok_or(FundError::NotFound(id))?;

    Ok(Json(ApiResponse::success(fund)))
}

#[utoipa::path(
    get,
    path = "/api/funds/{id}/analysis",
    params(("id" = String, Path, description = "Fund identifier")),
    responses(
        (status = 200, description = "Fund record with its analysis", body = FundAnalysis),
        (status = 404, description = "No fund with this id"),
    ),
    tag = "Funds"
)]
pub async fn get_fund_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FundAnalysis>>, AppError> {
    let analysis = state.service.analyze(&id).await?;
    Ok(Json(ApiResponse::success(analysis)))
}

#[utoipa::path(
    post,
    path = "/api/funds/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Side-by-side comparison", body = ComparisonResult),
        (status = 422, description = "Fewer than two requested funds exist"),
    ),
    tag = "Funds"
)]
pub async fn compare_funds(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ApiResponse<ComparisonResult>>, AppError> {
    let comparison = state.service.compare(&request.fund_ids).await?;

    tracing::info!(
        requested = request.fund_ids.len(),
        compared = comparison.funds.len(),
        top_performer = %comparison.top_performer_id,
        "funds compared"
    );

    Ok(Json(ApiResponse::success(comparison)))
}
