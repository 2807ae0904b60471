//! Side-by-side fund comparison.
//!
//! Expense ratios and category rankings are random placeholders and change on
//! every call. Everything else is a deterministic function of the catalog.

use std::sync::Arc;

use fund_core::{
    CategoryRanking, ComparisonResult, ExpenseRatio, FundCatalog, FundError, FundRecord, Horizon,
    PerformanceComparison, PerformanceDataset, ReferenceData, RiskProfileRow,
};
use rand::Rng;

pub const MIN_COMPARISON_FUNDS: usize = 2;

pub struct ComparisonEngine {
    catalog: Arc<FundCatalog>,
    reference: Arc<dyn ReferenceData>,
}

impl ComparisonEngine {
    pub fn new(catalog: Arc<FundCatalog>, reference: Arc<dyn ReferenceData>) -> Self {
        Self { catalog, reference }
    }

    pub fn compare(&self, fund_ids: &[String]) -> Result<ComparisonResult, FundError> {
        self.compare_with_rng(fund_ids, &mut rand::thread_rng())
    }

    /// Compare funds drawing the placeholder figures from `rng`.
    ///
    /// Funds are reported in catalog order regardless of request order.
    pub fn compare_with_rng<R: Rng>(
        &self,
        fund_ids: &[String],
        rng: &mut R,
    ) -> Result<ComparisonResult, FundError> {
        let funds: Vec<FundRecord> = self
            .catalog
            .iter()
            .filter(|fund| fund_ids.iter().any(|id| id == &fund.id))
            .cloned()
            .collect();

        if funds.len() < MIN_COMPARISON_FUNDS {
            return Err(FundError::InsufficientFunds { found: funds.len() });
        }

        let top = top_performer(&funds);
        let safest = lowest_risk(&funds);
        let summary = format!(
            "Based on the comparison, {} has shown the strongest long-term performance, while {} offers the lowest risk profile.",
            top.name, safest.name
        );
        let top_performer_id = top.id.clone();
        let lowest_risk_id = safest.id.clone();

        let performance_comparison = PerformanceComparison {
            labels: Horizon::ALL.iter().map(|h| h.label().to_string()).collect(),
            datasets: funds
                .iter()
                .map(|fund| PerformanceDataset {
                    name: fund.name.clone(),
                    data: fund.returns.as_array().to_vec(),
                })
                .collect(),
        };

        let risk_comparison = funds
            .iter()
            .map(|fund| {
                let band = self.reference.risk_band(fund.risk);
                RiskProfileRow {
                    name: fund.name.clone(),
                    risk: fund.risk,
                    volatility: format!("{}%", band.volatility),
                    max_drawdown: format!("{}%", band.max_drawdown),
                }
            })
            .collect();

        let expense_ratios = funds
            .iter()
            .map(|fund| ExpenseRatio {
                name: fund.name.clone(),
                ratio: format!("{:.2}%", rng.gen_range(0.5..2.0)),
            })
            .collect();

        let category_rankings = funds
            .iter()
            .map(|fund| CategoryRanking {
                name: fund.name.clone(),
                category: fund.category.clone(),
                percentile_rank: rng.gen_range(1..=100),
            })
            .collect();

        tracing::debug!(
            funds = funds.len(),
            top_performer = %top_performer_id,
            lowest_risk = %lowest_risk_id,
            "funds compared"
        );

        Ok(ComparisonResult {
            funds,
            performance_comparison,
            risk_comparison,
            expense_ratios,
            category_rankings,
            top_performer_id,
            lowest_risk_id,
            summary,
        })
    }
}

/// Highest five-year return; the earliest fund wins a tie.
fn top_performer(funds: &[FundRecord]) -> &FundRecord {
    let mut best = &funds[0];
    for fund in &funds[1..] {
        if fund.returns.five_year > best.returns.five_year {
            best = fund;
        }
    }
    best
}

/// Lowest risk ordinal; the earliest fund wins a tie.
fn lowest_risk(funds: &[FundRecord]) -> &FundRecord {
    let mut best = &funds[0];
    for fund in &funds[1..] {
        if fund.risk.ordinal() < best.risk.ordinal() {
            best = fund;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticReferenceData;
    use fund_core::RiskLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> ComparisonEngine {
        ComparisonEngine::new(
            Arc::new(FundCatalog::sample()),
            Arc::new(StaticReferenceData::new()),
        )
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_fund_is_insufficient() {
        let err = engine().compare(&ids(&["fund-1"])).unwrap_err();
        assert_eq!(err, FundError::InsufficientFunds { found: 1 });

        let err = engine().compare(&ids(&["fund-1", "missing"])).unwrap_err();
        assert_eq!(err, FundError::InsufficientFunds { found: 1 });
    }

    #[test]
    fn test_names_top_performer_and_lowest_risk() {
        let result = engine().compare(&ids(&["fund-1", "fund-2"])).unwrap();

        assert_eq!(result.top_performer_id, "fund-1");
        assert_eq!(result.lowest_risk_id, "fund-2");
        assert_eq!(
            result.summary,
            "Based on the comparison, ICICI Prudential Technology Fund has shown the strongest long-term performance, while Axis Bluechip Fund offers the lowest risk profile."
        );
    }

    #[test]
    fn test_funds_follow_catalog_order() {
        let result = engine()
            .compare(&ids(&["fund-8", "fund-4", "fund-3", "fund-4"]))
            .unwrap();
        let order: Vec<&str> = result.funds.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(order, vec!["fund-3", "fund-4", "fund-8"]);
        assert_eq!(result.top_performer_id, "fund-3");
        assert_eq!(result.lowest_risk_id, "fund-4");
    }

    #[test]
    fn test_ties_resolved_by_catalog_order() {
        // fund-2, fund-7 and fund-8 are all Moderate
        let result = engine()
            .compare(&ids(&["fund-8", "fund-7", "fund-2"]))
            .unwrap();
        assert_eq!(result.lowest_risk_id, "fund-2");
        assert_eq!(result.top_performer_id, "fund-8");
    }

    #[test]
    fn test_performance_and_risk_tables() {
        let result = engine()
            .compare(&ids(&["fund-3", "fund-4", "fund-7"]))
            .unwrap();

        assert_eq!(
            result.performance_comparison.labels,
            vec!["1Y Return", "3Y Return", "5Y Return"]
        );
        assert_eq!(result.performance_comparison.datasets[0].data, vec![25.7, 31.2, 22.5]);

        let rows = &result.risk_comparison;
        assert_eq!(rows[0].risk, RiskLevel::VeryHigh);
        assert_eq!(rows[0].volatility, "22.7%");
        assert_eq!(rows[0].max_drawdown, "32.3%");
        assert_eq!(rows[1].volatility, "8.5%");
        assert_eq!(rows[1].max_drawdown, "10.2%");
        assert_eq!(rows[2].volatility, "15.2%");
        assert_eq!(rows[2].max_drawdown, "18.5%");
    }

    #[test]
    fn test_placeholders_stay_in_range() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(7);
        let all: Vec<String> = FundCatalog::sample().iter().map(|f| f.id.clone()).collect();

        for _ in 0..50 {
            let result = engine.compare_with_rng(&all, &mut rng).unwrap();
            for ratio in &result.expense_ratios {
                let value: f64 = ratio.ratio.trim_end_matches('%').parse().unwrap();
                assert!((0.5..=2.0).contains(&value), "ratio {value} out of range");
            }
            for ranking in &result.category_rankings {
                assert!((1..=100).contains(&ranking.percentile_rank));
            }
        }
    }

    #[test]
    fn test_deterministic_fields_are_stable() {
        let engine = engine();
        let request = ids(&["fund-5", "fund-6"]);
        let first = engine.compare(&request).unwrap();
        let second = engine.compare(&request).unwrap();

        assert_eq!(first.funds, second.funds);
        assert_eq!(first.performance_comparison, second.performance_comparison);
        assert_eq!(first.risk_comparison, second.risk_comparison);
        assert_eq!(first.summary, second.summary);
    }
}
