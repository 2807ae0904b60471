//! Portfolio Aggregation
//!
//! Weighted returns and composite risk for a set of fund positions.
//!
//! Each fund's effective weight is its supplied percentage divided by 100. A
//! fund whose position carries no usable weight falls back to `1/N` of the
//! resolved funds on its own, even when sibling positions are weighted, so
//! the effective weights need not sum to one.

use std::collections::HashSet;
use std::sync::Arc;

use fund_core::{
    CompositionEntry, DemoPortfolio, FundCatalog, FundError, FundRecord, FundReturns, Horizon,
    PortfolioAnalysis, PortfolioPosition, ReferenceData, RiskLevel,
};

pub struct PortfolioAnalyzer {
    catalog: Arc<FundCatalog>,
    reference: Arc<dyn ReferenceData>,
}

impl PortfolioAnalyzer {
    pub fn new(catalog: Arc<FundCatalog>, reference: Arc<dyn ReferenceData>) -> Self {
        Self { catalog, reference }
    }

    pub fn analyze_portfolio(
        &self,
        positions: &[PortfolioPosition],
    ) -> Result<PortfolioAnalysis, FundError> {
        let resolved = self.resolve(positions);
        if resolved.is_empty() {
            return Err(FundError::EmptyPortfolio);
        }

        let composition = composition(&resolved);
        let funds: Vec<&FundRecord> = resolved.iter().map(|(fund, _)| *fund).collect();

        let weighted = |horizon: Horizon| -> f64 {
            funds
                .iter()
                .zip(&composition)
                .map(|(fund, entry)| fund.returns.get(horizon) * entry.fraction())
                .sum()
        };
        let returns = FundReturns::new(
            weighted(Horizon::OneYear),
            weighted(Horizon::ThreeYear),
            weighted(Horizon::FiveYear),
        );

        let risk_score: f64 = composition
            .iter()
            .map(|entry| f64::from(entry.risk.ordinal()) * entry.fraction())
            .sum();
        let risk = RiskLevel::from_score(risk_score);

        tracing::debug!(
            funds = composition.len(),
            one_year = returns.one_year,
            risk_score,
            risk = %risk,
            "portfolio analysed"
        );

        Ok(PortfolioAnalysis {
            display_returns: returns.formatted(),
            returns,
            risk,
            risk_score,
            sector_exposure: self.reference.portfolio_sector_exposure(&composition),
            risk_metrics: self.reference.portfolio_risk_metrics(&composition),
            diversification_score: self.reference.diversification_score(&composition),
            recommendation: self.reference.portfolio_recommendation(&composition),
            composition,
        })
    }

    /// Dashboard payload for the sample portfolio
    pub fn demo_portfolio(&self) -> Result<DemoPortfolio, FundError> {
        let positions = demo_positions();
        let analysis = self.analyze_portfolio(&positions)?;
        Ok(DemoPortfolio {
            positions,
            analysis,
            performance: self.reference.monthly_performance(),
        })
    }

    /// Resolve positions against the catalog in request order. Unknown ids are
    /// skipped; a repeated id keeps its first position.
    fn resolve<'a>(&'a self, positions: &[PortfolioPosition]) -> Vec<(&'a FundRecord, Option<f64>)> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(positions.len());

        for position in positions {
            let Some(fund) = self.catalog.get(&position.fund_id) else {
                tracing::warn!(fund_id = %position.fund_id, "skipping unknown fund in portfolio");
                continue;
            };
            if !seen.insert(fund.id.as_str()) {
                tracing::warn!(fund_id = %fund.id, "skipping duplicate fund in portfolio");
                continue;
            }
            resolved.push((fund, usable_weight(position.weight)));
        }

        resolved
    }
}

/// A zero or non-finite weight counts as not supplied.
fn usable_weight(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| w.is_finite() && *w != 0.0)
}

fn composition(resolved: &[(&FundRecord, Option<f64>)]) -> Vec<CompositionEntry> {
    let equal_share = 100.0 / resolved.len() as f64;

    resolved
        .iter()
        .map(|(fund, weight)| CompositionEntry {
            fund_id: fund.id.clone(),
            fund: fund.name.clone(),
            category: fund.category.clone(),
            risk: fund.risk,
            weight: weight.unwrap_or(equal_share),
            weight_defaulted: weight.is_none(),
        })
        .collect()
}

/// The sample portfolio shown on the dashboard
pub fn demo_positions() -> Vec<PortfolioPosition> {
    vec![
        PortfolioPosition::weighted("fund-2", 30.0),
        PortfolioPosition::weighted("fund-4", 25.0),
        PortfolioPosition::weighted("fund-5", 25.0),
        PortfolioPosition::weighted("fund-8", 20.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticReferenceData;

    fn analyzer() -> PortfolioAnalyzer {
        PortfolioAnalyzer::new(
            Arc::new(FundCatalog::sample()),
            Arc::new(StaticReferenceData::new()),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_weighted_returns_for_sample_portfolio() {
        let analysis = analyzer().analyze_portfolio(&demo_positions()).unwrap();

        let expected = 0.30 * 12.4 + 0.25 * 7.2 + 0.25 * 16.8 + 0.20 * 15.2;
        assert_close(analysis.returns.one_year, expected);
        assert_eq!(analysis.display_returns.one_year, "12.76");

        let expected_five = 0.30 * 14.2 + 0.25 * 7.8 + 0.25 * 18.2 + 0.20 * 16.9;
        assert_close(analysis.returns.five_year, expected_five);
        assert_eq!(analysis.display_returns.five_year, format!("{:.2}", expected_five));
    }

    #[test]
    fn test_risk_classification_is_weighted() {
        let analysis = analyzer().analyze_portfolio(&demo_positions()).unwrap();
        // 0.3*2 + 0.25*1 + 0.25*3 + 0.2*2
        assert_close(analysis.risk_score, 2.0);
        assert_eq!(analysis.risk, RiskLevel::Moderate);

        let aggressive = analyzer()
            .analyze_portfolio(&[
                PortfolioPosition::weighted("fund-3", 80.0),
                PortfolioPosition::weighted("fund-1", 20.0),
            ])
            .unwrap();
        // 0.8*4 + 0.2*3 = 3.8
        assert_eq!(aggressive.risk, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_missing_weights_default_to_equal_share() {
        let analysis = analyzer()
            .analyze_portfolio(&[
                PortfolioPosition::unweighted("fund-2"),
                PortfolioPosition::unweighted("fund-4"),
            ])
            .unwrap();

        assert_close(analysis.returns.one_year, 0.5 * 12.4 + 0.5 * 7.2);
        assert!(analysis.composition.iter().all(|e| e.weight_defaulted));
        assert_close(analysis.composition[0].weight, 50.0);
    }

    #[test]
    fn test_fallback_is_per_fund() {
        // fund-2 keeps its 80%, fund-4 independently falls back to 1/2
        let analysis = analyzer()
            .analyze_portfolio(&[
                PortfolioPosition::weighted("fund-2", 80.0),
                PortfolioPosition::unweighted("fund-4"),
            ])
            .unwrap();

        assert_close(analysis.returns.one_year, 0.8 * 12.4 + 0.5 * 7.2);
        assert!(!analysis.composition[0].weight_defaulted);
        assert!(analysis.composition[1].weight_defaulted);
        assert_close(analysis.composition[1].weight, 50.0);
    }

    #[test]
    fn test_zero_weight_counts_as_missing() {
        let analysis = analyzer()
            .analyze_portfolio(&[
                PortfolioPosition::weighted("fund-2", 0.0),
                PortfolioPosition::weighted("fund-4", f64::NAN),
            ])
            .unwrap();
        assert!(analysis.composition.iter().all(|e| e.weight_defaulted));
        assert_close(analysis.returns.one_year, 0.5 * 12.4 + 0.5 * 7.2);
    }

    #[test]
    fn test_unknown_and_duplicate_ids_are_skipped() {
        let analysis = analyzer()
            .analyze_portfolio(&[
                PortfolioPosition::unweighted("fund-404"),
                PortfolioPosition::unweighted("fund-7"),
                PortfolioPosition::weighted("fund-7", 90.0),
            ])
            .unwrap();

        assert_eq!(analysis.composition.len(), 1);
        assert_eq!(analysis.composition[0].fund, "Kotak Balanced Advantage Fund");
        assert_close(analysis.composition[0].weight, 100.0);
        assert_close(analysis.returns.three_year, 12.7);
    }

    #[test]
    fn test_empty_portfolio_is_an_error() {
        let analyzer = analyzer();
        assert_eq!(
            analyzer.analyze_portfolio(&[]).unwrap_err(),
            FundError::EmptyPortfolio
        );
        assert_eq!(
            analyzer
                .analyze_portfolio(&[PortfolioPosition::weighted("ghost", 100.0)])
                .unwrap_err(),
            FundError::EmptyPortfolio
        );
    }

    #[test]
    fn test_reference_fields_and_demo_payload() {
        let demo = analyzer().demo_portfolio().unwrap();
        assert_eq!(demo.positions.len(), 4);
        assert_eq!(demo.performance.len(), 12);
        assert_eq!(demo.analysis.diversification_score, 76);
        assert_eq!(demo.analysis.sector_exposure.len(), 6);
        assert_close(demo.analysis.risk_metrics.sharpe_ratio, 1.1);
    }

    #[test]
    fn test_portfolio_analysis_is_idempotent() {
        let analyzer = analyzer();
        let positions = demo_positions();
        assert_eq!(
            analyzer.analyze_portfolio(&positions).unwrap(),
            analyzer.analyze_portfolio(&positions).unwrap()
        );
    }
}
