//! Async service facade.
//!
//! Wraps the engines behind [`FundService`] and optionally sleeps before each
//! response to model a network round trip. The delay is cosmetic; dropping the
//! returned future abandons the call with nothing to clean up.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fund_core::{
    ComparisonResult, DemoPortfolio, FundAnalysis, FundCatalog, FundError, FundRecord,
    FundService, PortfolioAnalysis, PortfolioPosition, ReferenceData, SearchFilters,
};

use crate::{
    ComparisonEngine, FundAnalyzer, PortfolioAnalyzer, SearchFilterEngine, StaticReferenceData,
};

/// Simulated response delays per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub search: Duration,
    pub analyze: Duration,
    pub compare: Duration,
    pub portfolio: Duration,
}

impl LatencyProfile {
    /// No delay at all
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            analyze: Duration::ZERO,
            compare: Duration::ZERO,
            portfolio: Duration::ZERO,
        }
    }

    /// Round-trip delays of a typical hosted backend
    pub fn realistic() -> Self {
        Self {
            search: Duration::from_millis(500),
            analyze: Duration::from_millis(1000),
            compare: Duration::from_millis(1500),
            portfolio: Duration::from_millis(1500),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::none()
    }
}

pub struct MockFundService {
    catalog: Arc<FundCatalog>,
    search: SearchFilterEngine,
    analyzer: FundAnalyzer,
    portfolio: PortfolioAnalyzer,
    comparison: ComparisonEngine,
    latency: LatencyProfile,
}

impl MockFundService {
    pub fn new(
        catalog: Arc<FundCatalog>,
        reference: Arc<dyn ReferenceData>,
        latency: LatencyProfile,
    ) -> Self {
        Self {
            search: SearchFilterEngine::new(catalog.clone()),
            analyzer: FundAnalyzer::new(catalog.clone(), reference.clone()),
            portfolio: PortfolioAnalyzer::new(catalog.clone(), reference.clone()),
            comparison: ComparisonEngine::new(catalog.clone(), reference),
            catalog,
            latency,
        }
    }

    /// Sample catalog with static reference data
    pub fn sample(latency: LatencyProfile) -> Self {
        Self::new(
            Arc::new(FundCatalog::sample()),
            Arc::new(StaticReferenceData::new()),
            latency,
        )
    }

    pub fn catalog(&self) -> &FundCatalog {
        &self.catalog
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    pub async fn demo_portfolio(&self) -> Result<DemoPortfolio, FundError> {
        delay(self.latency.portfolio).await;
        self.portfolio.demo_portfolio()
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl FundService for MockFundService {
    async fn search(&self, query: &str, filters: &SearchFilters) -> Vec<FundRecord> {
        delay(self.latency.search).await;
        self.search.search(query, filters)
    }

    async fn analyze(&self, fund_id: &str) -> Result<FundAnalysis, FundError> {
        delay(self.latency.analyze).await;
        self.analyzer.analyze(fund_id)
    }

    async fn compare(&self, fund_ids: &[String]) -> Result<ComparisonResult, FundError> {
        delay(self.latency.compare).await;
        self.comparison.compare(fund_ids)
    }

    async fn analyze_portfolio(
        &self,
        positions: &[PortfolioPosition],
    ) -> Result<PortfolioAnalysis, FundError> {
        delay(self.latency.portfolio).await;
        self.portfolio.analyze_portfolio(positions)
    }
}
