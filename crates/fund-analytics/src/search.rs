//! Fund Search
//!
//! Free-text matching with OR semantics across query tokens, followed by
//! conjunctive filtering on fund type, risk level and minimum one-year return.

use std::sync::Arc;

use fund_core::{FundCatalog, FundRecord, FundType, SearchFilters};

pub struct SearchFilterEngine {
    catalog: Arc<FundCatalog>,
}

impl SearchFilterEngine {
    pub fn new(catalog: Arc<FundCatalog>) -> Self {
        Self { catalog }
    }

    /// Search the catalog. Results keep catalog order.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<FundRecord> {
        let filters = filters.normalized();
        let tokens = tokenize(query);
        let constrained = !filters.is_unconstrained();

        let results: Vec<FundRecord> = self
            .catalog
            .iter()
            .filter(|fund| matches_query(fund, &tokens))
            .filter(|fund| !constrained || matches_filters(fund, &filters))
            .cloned()
            .collect();

        tracing::debug!(
            query = %query,
            tokens = tokens.len(),
            constrained,
            matched = results.len(),
            "fund search complete"
        );

        results
    }
}

fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| token.to_lowercase())
        .collect()
}

/// A fund matches when any token occurs in its searchable text.
/// No tokens means no constraint.
fn matches_query(fund: &FundRecord, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let text = fund.searchable_text();
    tokens.iter().any(|token| text.contains(token.as_str()))
}

fn matches_filters(fund: &FundRecord, filters: &SearchFilters) -> bool {
    matches_fund_type(fund, filters.fund_type)
        && filters
            .risk_level
            .level()
            .map_or(true, |level| fund.risk == level)
        && (filters.min_return <= 0.0 || fund.returns.one_year >= filters.min_return)
}

fn matches_fund_type(fund: &FundRecord, fund_type: FundType) -> bool {
    if fund_type == FundType::All {
        return true;
    }
    fund_type
        .categories()
        .iter()
        .any(|category| fund.category.contains(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_core::{RiskFilter, RiskLevel};

    fn engine() -> SearchFilterEngine {
        SearchFilterEngine::new(Arc::new(FundCatalog::sample()))
    }

    fn ids(funds: &[FundRecord]) -> Vec<&str> {
        funds.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog_in_order() {
        let engine = engine();
        let results = engine.search("", &SearchFilters::default());
        let catalog = FundCatalog::sample();

        assert_eq!(results.len(), catalog.len());
        assert_eq!(results.as_slice(), catalog.funds());

        let whitespace = engine.search("   \t ", &SearchFilters::default());
        assert_eq!(whitespace.len(), catalog.len());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let results = engine().search("hdfc", &SearchFilters::default());
        assert!(results.iter().any(|f| f.name == "HDFC Corporate Bond Fund"));
        for fund in &results {
            assert!(fund.searchable_text().contains("hdfc"));
        }
    }

    #[test]
    fn test_tokens_use_or_semantics() {
        let results = engine().search("Axis kotak", &SearchFilters::default());
        assert_eq!(ids(&results), vec!["fund-2", "fund-7"]);
    }

    #[test]
    fn test_query_matches_ticker_and_category() {
        let engine = engine();
        assert_eq!(ids(&engine.search("ppfcf", &SearchFilters::default())), vec!["fund-8"]);
        assert_eq!(
            ids(&engine.search("thematic", &SearchFilters::default())),
            vec!["fund-1", "fund-6"]
        );
    }

    #[test]
    fn test_unmatched_query_returns_empty() {
        let results = engine().search("zzzz-nothing", &SearchFilters::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_fund_type_filter_uses_category_mapping() {
        let engine = engine();

        let equity = engine.search("", &SearchFilters::new(FundType::Equity, RiskFilter::All, 0.0));
        assert_eq!(
            ids(&equity),
            vec!["fund-1", "fund-2", "fund-3", "fund-5", "fund-6", "fund-8"]
        );

        let debt = engine.search("", &SearchFilters::new(FundType::Debt, RiskFilter::All, 0.0));
        assert_eq!(ids(&debt), vec!["fund-4"]);

        let hybrid = engine.search("", &SearchFilters::new(FundType::Hybrid, RiskFilter::All, 0.0));
        assert_eq!(ids(&hybrid), vec!["fund-7"]);

        let etf = engine.search("", &SearchFilters::new(FundType::Etf, RiskFilter::All, 0.0));
        assert!(etf.is_empty());
    }

    #[test]
    fn test_risk_and_min_return_filters() {
        let engine = engine();

        let high = engine.search("", &SearchFilters::new(FundType::All, RiskFilter::High, 0.0));
        assert_eq!(ids(&high), vec!["fund-1", "fund-5", "fund-6"]);

        let min = engine.search("", &SearchFilters::new(FundType::All, RiskFilter::All, 16.8));
        assert_eq!(ids(&min), vec!["fund-1", "fund-3", "fund-5", "fund-6"]);
    }

    #[test]
    fn test_unreachable_min_return_matches_nothing() {
        let engine = engine();

        for raw in ["inf", "1e400"] {
            let min_return: f64 = raw.parse().unwrap();
            let filters = SearchFilters::new(FundType::All, RiskFilter::All, min_return);
            let results = engine.search("", &filters);
            assert!(results.is_empty(), "min_return {raw} matched {} funds", results.len());
        }

        let above_best = engine.search("", &SearchFilters::new(FundType::All, RiskFilter::All, 25.8));
        assert!(above_best.is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let engine = engine();
        let catalog = FundCatalog::sample();

        for fund_type in [
            FundType::All,
            FundType::Equity,
            FundType::Debt,
            FundType::Hybrid,
            FundType::Index,
        ] {
            for risk in [
                RiskFilter::All,
                RiskFilter::Low,
                RiskFilter::Moderate,
                RiskFilter::High,
                RiskFilter::VeryHigh,
            ] {
                for min_return in [0.0, 10.0, 15.2, 20.0] {
                    let filters = SearchFilters::new(fund_type, risk, min_return);
                    let results = engine.search("", &filters);

                    for fund in &results {
                        if let Some(level) = risk.level() {
                            assert_eq!(fund.risk, level);
                        }
                        assert!(fund.returns.one_year >= min_return);
                        if fund_type != FundType::All {
                            assert!(fund_type
                                .categories()
                                .iter()
                                .any(|c| fund.category.contains(c)));
                        }
                    }

                    let expected = catalog
                        .iter()
                        .filter(|f| risk.level().map_or(true, |l| f.risk == l))
                        .filter(|f| f.returns.one_year >= min_return)
                        .filter(|f| {
                            fund_type == FundType::All
                                || fund_type.categories().iter().any(|c| f.category.contains(c))
                        })
                        .count();
                    assert_eq!(results.len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_query_then_filters() {
        let results = engine().search(
            "fund",
            &SearchFilters::new(FundType::All, RiskFilter::Moderate, 12.0),
        );
        assert_eq!(ids(&results), vec!["fund-2", "fund-8"]);
        assert!(results.iter().all(|f| f.risk == RiskLevel::Moderate));
    }

    #[test]
    fn test_search_is_deterministic() {
        let engine = engine();
        let filters = SearchFilters::new(FundType::Equity, RiskFilter::All, 5.0);
        assert_eq!(engine.search("fund cap", &filters), engine.search("fund cap", &filters));
    }
}
