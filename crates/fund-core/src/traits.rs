use async_trait::async_trait;

use crate::{
    ComparisonResult, CompositionEntry, FundAnalysis, FundError, FundRecord, Holding,
    MonthlyPerformance, PortfolioAnalysis, PortfolioPosition, RiskBand, RiskLevel, RiskMetrics,
    SearchFilters, SectorWeight,
};

/// Market reference data the engines draw on for figures they do not compute
/// themselves. Swap the implementation to back the engines with a real
/// analytics source.
pub trait ReferenceData: Send + Sync {
    fn holdings_for(&self, fund: &FundRecord) -> Vec<Holding>;

    fn sector_allocation_for(&self, fund: &FundRecord) -> Vec<SectorWeight>;

    fn risk_metrics_for(&self, fund: &FundRecord) -> RiskMetrics;

    fn portfolio_sector_exposure(&self, composition: &[CompositionEntry]) -> Vec<SectorWeight>;

    fn portfolio_risk_metrics(&self, composition: &[CompositionEntry]) -> RiskMetrics;

    /// Diversification score (0 to 100)
    fn diversification_score(&self, composition: &[CompositionEntry]) -> u8;

    fn portfolio_recommendation(&self, composition: &[CompositionEntry]) -> String;

    fn risk_band(&self, risk: RiskLevel) -> RiskBand;

    /// Monthly portfolio vs benchmark returns for the dashboard chart
    fn monthly_performance(&self) -> Vec<MonthlyPerformance>;
}

/// Asynchronous request/response facade over the engines
#[async_trait]
pub trait FundService: Send + Sync {
    async fn search(&self, query: &str, filters: &SearchFilters) -> Vec<FundRecord>;

    async fn analyze(&self, fund_id: &str) -> Result<FundAnalysis, FundError>;

    async fn compare(&self, fund_ids: &[String]) -> Result<ComparisonResult, FundError>;

    async fn analyze_portfolio(
        &self,
        positions: &[PortfolioPosition],
    ) -> Result<PortfolioAnalysis, FundError>;
}
