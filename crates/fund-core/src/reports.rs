//! Derived records produced by the analytics engines.
//!
//! Every record here is computed fresh per request and owned by the caller.

use serde::{Deserialize, Serialize};

use crate::{FormattedReturns, FundRecord, FundReturns, RiskLevel};

/// A single equity position inside a fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Holding {
    pub name: String,
    /// Percent of fund assets
    pub allocation: f64,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectorWeight {
    pub sector: String,
    pub allocation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub sharpe_ratio: f64,
    pub standard_deviation: f64,
    pub beta: f64,
    pub alpha: f64,
}

/// Fund vs benchmark return for one horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HorizonComparison {
    pub fund: f64,
    pub benchmark: f64,
}

impl HorizonComparison {
    pub fn excess(&self) -> f64 {
        self.fund - self.benchmark
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub one_year: HorizonComparison,
    pub three_year: HorizonComparison,
    pub five_year: HorizonComparison,
}

/// Narrative read-outs derived from the analysis numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInsights {
    pub performance: String,
    pub risk_assessment: String,
    pub strategy: String,
    /// Investor profiles the fund's risk level fits
    pub suitable_for: Vec<String>,
    pub not_suitable_for: Vec<String>,
}

/// AI-styled analysis of a single fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub holdings: Vec<Holding>,
    pub sector_allocation: Vec<SectorWeight>,
    pub benchmark_comparison: BenchmarkComparison,
    pub risk_metrics: RiskMetrics,
    pub recommendation: String,
    pub insights: AnalysisInsights,
}

/// The analysed fund together with its analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FundAnalysis {
    pub fund: FundRecord,
    pub analysis: AnalysisRecord,
}

/// Requested holding in a portfolio. `weight` is a percentage; when absent the
/// fund falls back to an equal share of the resolved funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub fund_id: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PortfolioPosition {
    pub fn weighted(fund_id: impl Into<String>, weight: f64) -> Self {
        Self {
            fund_id: fund_id.into(),
            weight: Some(weight),
        }
    }

    pub fn unweighted(fund_id: impl Into<String>) -> Self {
        Self {
            fund_id: fund_id.into(),
            weight: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompositionEntry {
    pub fund_id: String,
    pub fund: String,
    pub category: String,
    pub risk: RiskLevel,
    /// Effective weight in percent
    pub weight: f64,
    /// True when the caller supplied no usable weight for this fund
    pub weight_defaulted: bool,
}

impl CompositionEntry {
    /// Effective weight as a fraction
    pub fn fraction(&self) -> f64 {
        self.weight / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub composition: Vec<CompositionEntry>,
    /// Weighted returns at full precision
    pub returns: FundReturns,
    /// Weighted returns rounded to two decimals for display
    pub display_returns: FormattedReturns,
    pub risk: RiskLevel,
    /// Weighted risk ordinal the classification was derived from
    pub risk_score: f64,
    pub sector_exposure: Vec<SectorWeight>,
    pub risk_metrics: RiskMetrics,
    pub diversification_score: u8,
    pub recommendation: String,
}

/// Reference volatility and drawdown for a risk level, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RiskBand {
    pub volatility: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PerformanceDataset {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PerformanceComparison {
    pub labels: Vec<String>,
    pub datasets: Vec<PerformanceDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RiskProfileRow {
    pub name: String,
    pub risk: RiskLevel,
    pub volatility: String,
    pub max_drawdown: String,
}

/// Placeholder expense ratio. Randomized on every comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExpenseRatio {
    pub name: String,
    pub ratio: String,
}

/// Placeholder category ranking. Randomized on every comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CategoryRanking {
    pub name: String,
    pub category: String,
    pub percentile_rank: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub funds: Vec<FundRecord>,
    pub performance_comparison: PerformanceComparison,
    pub risk_comparison: Vec<RiskProfileRow>,
    pub expense_ratios: Vec<ExpenseRatio>,
    pub category_rankings: Vec<CategoryRanking>,
    pub top_performer_id: String,
    pub lowest_risk_id: String,
    pub summary: String,
}

/// One month of the dashboard performance chart, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthlyPerformance {
    pub month: String,
    pub portfolio: f64,
    pub benchmark: f64,
}

/// Dashboard payload for the sample portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DemoPortfolio {
    pub positions: Vec<PortfolioPosition>,
    pub analysis: PortfolioAnalysis,
    pub performance: Vec<MonthlyPerformance>,
}
