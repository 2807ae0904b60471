//! Single-fund analysis.
//!
//! Narrative fields are templated from the fund record; holdings, sector
//! allocation and risk metrics come from the injected [`ReferenceData`].

use std::sync::Arc;

use fund_core::{
    AnalysisInsights, AnalysisRecord, BenchmarkComparison, FundAnalysis, FundCatalog, FundError,
    FundRecord, Horizon, HorizonComparison, ReferenceData, RiskLevel, RiskMetrics, SectorWeight,
};

/// Five-year return above which a fund gets the strong-performance recommendation.
pub const STRONG_PERFORMANCE_THRESHOLD: f64 = 15.0;

pub const STRONG_PERFORMANCE_RECOMMENDATION: &str = "This fund has shown strong performance over the long term and could be a good addition to a diversified portfolio.";

pub const STABLE_RETURNS_RECOMMENDATION: &str = "This fund provides stable returns and could be suitable as a core holding in a balanced portfolio.";

pub struct FundAnalyzer {
    catalog: Arc<FundCatalog>,
    reference: Arc<dyn ReferenceData>,
}

impl FundAnalyzer {
    pub fn new(catalog: Arc<FundCatalog>, reference: Arc<dyn ReferenceData>) -> Self {
        Self { catalog, reference }
    }

    pub fn analyze(&self, fund_id: &str) -> Result<FundAnalysis, FundError> {
        let fund = self
            .catalog
            .get(fund_id)
            .ok_or_else(|| FundError::NotFound(fund_id.to_string()))?;

        let analysis = self.analyze_record(fund);
        tracing::debug!(fund_id, recommendation = %analysis.recommendation, "fund analysed");

        Ok(FundAnalysis {
            fund: fund.clone(),
            analysis,
        })
    }

    /// Derive the analysis for a fund that is already resolved.
    pub fn analyze_record(&self, fund: &FundRecord) -> AnalysisRecord {
        let sector_allocation = self.reference.sector_allocation_for(fund);
        let risk_metrics = self.reference.risk_metrics_for(fund);
        let benchmark_comparison = benchmark_comparison(fund);
        let insights = insights(fund, &benchmark_comparison, &risk_metrics, &sector_allocation);

        AnalysisRecord {
            summary: format!(
                "{} is a {} risk {} fund from {} with consistent performance over the last 5 years.",
                fund.name,
                fund.risk.label().to_lowercase(),
                fund.category.to_lowercase(),
                fund.fund_house
            ),
            strengths: vec![
                "Strong management team with proven track record".to_string(),
                format!(
                    "Consistent performance with {}% returns over 5 years",
                    fund.returns.five_year
                ),
                "Well-diversified portfolio reducing concentration risk".to_string(),
            ],
            weaknesses: vec![
                "Higher expense ratio compared to peers".to_string(),
                "May face sector-specific challenges".to_string(),
                "Performance volatility during market downturns".to_string(),
            ],
            holdings: self.reference.holdings_for(fund),
            sector_allocation,
            benchmark_comparison,
            risk_metrics,
            recommendation: recommendation(fund).to_string(),
            insights,
        }
    }
}

/// Benchmark per horizon is the fund's own return less a fixed spread.
pub fn benchmark_comparison(fund: &FundRecord) -> BenchmarkComparison {
    let compare = |horizon: Horizon| {
        let fund_return = fund.returns.get(horizon);
        HorizonComparison {
            fund: fund_return,
            benchmark: fund_return - horizon.benchmark_spread(),
        }
    };

    BenchmarkComparison {
        one_year: compare(Horizon::OneYear),
        three_year: compare(Horizon::ThreeYear),
        five_year: compare(Horizon::FiveYear),
    }
}

pub fn recommendation(fund: &FundRecord) -> &'static str {
    if fund.returns.five_year > STRONG_PERFORMANCE_THRESHOLD {
        STRONG_PERFORMANCE_RECOMMENDATION
    } else {
        STABLE_RETURNS_RECOMMENDATION
    }
}

fn insights(
    fund: &FundRecord,
    benchmark: &BenchmarkComparison,
    metrics: &RiskMetrics,
    sectors: &[SectorWeight],
) -> AnalysisInsights {
    let five_year = fund.returns.five_year;
    let tier = if five_year > 15.0 {
        "exceptional"
    } else if five_year > 10.0 {
        "strong"
    } else {
        "moderate"
    };
    let excess = benchmark.five_year.excess();
    let verdict = if excess > 0.0 {
        "outperforms"
    } else {
        "underperforms"
    };
    let performance = format!(
        "{} has shown {} performance over the last 5 years with returns of {}%. This {} its benchmark by {:.1}% over the same period.",
        fund.name,
        tier,
        five_year,
        verdict,
        excess.abs()
    );

    let volatility = if metrics.beta < 0.9 {
        "lower"
    } else if metrics.beta < 1.1 {
        "similar"
    } else {
        "higher"
    };
    let approach = match fund.risk {
        RiskLevel::Low => "conservative",
        RiskLevel::Moderate => "balanced",
        RiskLevel::High | RiskLevel::VeryHigh => "growth-oriented",
    };
    let risk_assessment = format!(
        "With a Sharpe ratio of {} and a beta of {}, this fund shows {} volatility compared to the market. The fund's risk level is classified as {}, making it suitable for investors with a {} investment approach.",
        metrics.sharpe_ratio,
        metrics.beta,
        volatility,
        fund.risk.label().to_lowercase(),
        approach
    );

    let (suitable_for, not_suitable_for) = suitability(fund.risk);

    AnalysisInsights {
        performance,
        risk_assessment,
        strategy: strategy_insight(sectors),
        suitable_for: to_strings(suitable_for),
        not_suitable_for: to_strings(not_suitable_for),
    }
}

const LOW_RISK_SUITABLE: &[&str] = &[
    "Conservative investors",
    "Capital preservation focus",
    "Near-term financial goals",
];
const LOW_RISK_UNSUITABLE: &[&str] = &[
    "Growth-focused investors",
    "Very long-term goals (15+ years)",
    "Inflation-beating returns seekers",
];
const MODERATE_RISK_SUITABLE: &[&str] = &[
    "Balanced investors",
    "Medium-term goals (5-10 years)",
    "Mix of growth and stability",
];
const MODERATE_RISK_UNSUITABLE: &[&str] = &[
    "Very conservative investors",
    "Short-term needs (< 3 years)",
    "Low risk tolerance individuals",
];
const HIGH_RISK_SUITABLE: &[&str] = &[
    "Growth-oriented investors",
    "Long-term wealth creation",
    "Higher risk tolerance",
];
const HIGH_RISK_UNSUITABLE: &[&str] = &[
    "Conservative investors",
    "Short to medium-term goals",
    "Investors nearing retirement",
];

/// Investor profiles a risk level suits and does not suit.
fn suitability(risk: RiskLevel) -> (&'static [&'static str], &'static [&'static str]) {
    match risk {
        RiskLevel::Low => (LOW_RISK_SUITABLE, LOW_RISK_UNSUITABLE),
        RiskLevel::Moderate => (MODERATE_RISK_SUITABLE, MODERATE_RISK_UNSUITABLE),
        RiskLevel::High | RiskLevel::VeryHigh => (HIGH_RISK_SUITABLE, HIGH_RISK_UNSUITABLE),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn strategy_insight(sectors: &[SectorWeight]) -> String {
    let (top, second) = match sectors {
        [] => return "Sector allocation data is not available for this fund.".to_string(),
        [only] => {
            return format!(
                "The fund's portfolio is concentrated entirely in {} ({}%).",
                only.sector, only.allocation
            )
        }
        [top, second, ..] => (top, second),
    };

    let (shape, effect) = if top.allocation > 25.0 {
        (
            "high concentration",
            "increase sector-specific risks but also potential returns",
        )
    } else {
        (
            "diversified approach",
            "help mitigate sector-specific risks while capturing growth opportunities",
        )
    };

    format!(
        "The fund's portfolio is concentrated in {} ({}%) and {} ({}%) sectors. This {} in key sectors could {}.",
        top.sector, top.allocation, second.sector, second.allocation, shape, effect
    )
}
