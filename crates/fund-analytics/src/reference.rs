//! Static reference market data.
//!
//! Sample figures used for every fund and portfolio until a real analytics
//! backend is plugged in behind [`ReferenceData`].

use fund_core::{
    CompositionEntry, FundRecord, Holding, MonthlyPerformance, ReferenceData, RiskBand, RiskLevel,
    RiskMetrics, SectorWeight,
};

#[derive(Debug, Clone, Default)]
pub struct StaticReferenceData;

impl StaticReferenceData {
    pub fn new() -> Self {
        Self
    }
}

fn holding(name: &str, allocation: f64, sector: &str) -> Holding {
    Holding {
        name: name.to_string(),
        allocation,
        sector: sector.to_string(),
    }
}

fn sector(sector: &str, allocation: f64) -> SectorWeight {
    SectorWeight {
        sector: sector.to_string(),
        allocation,
    }
}

impl ReferenceData for StaticReferenceData {
    fn holdings_for(&self, _fund: &FundRecord) -> Vec<Holding> {
        vec![
            holding("HDFC Bank", 7.8, "Banking"),
            holding("Infosys", 6.5, "IT"),
            holding("Reliance Industries", 5.9, "Energy"),
            holding("TCS", 4.8, "IT"),
            holding("ICICI Bank", 4.2, "Banking"),
        ]
    }

    fn sector_allocation_for(&self, _fund: &FundRecord) -> Vec<SectorWeight> {
        vec![
            sector("Banking & Finance", 28.5),
            sector("IT", 18.2),
            sector("Consumer Goods", 12.7),
            sector("Pharmaceuticals", 10.5),
            sector("Energy", 8.9),
            sector("Others", 21.2),
        ]
    }

    fn risk_metrics_for(&self, _fund: &FundRecord) -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: 1.2,
            standard_deviation: 16.5,
            beta: 0.92,
            alpha: 2.1,
        }
    }

    fn portfolio_sector_exposure(&self, _composition: &[CompositionEntry]) -> Vec<SectorWeight> {
        vec![
            sector("Banking & Finance", 26.8),
            sector("IT", 20.5),
            sector("Consumer Goods", 14.2),
            sector("Pharmaceuticals", 12.1),
            sector("Energy", 9.5),
            sector("Others", 16.9),
        ]
    }

    fn portfolio_risk_metrics(&self, _composition: &[CompositionEntry]) -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: 1.1,
            standard_deviation: 14.8,
            beta: 0.95,
            alpha: 1.8,
        }
    }

    fn diversification_score(&self, _composition: &[CompositionEntry]) -> u8 {
        76
    }

    fn portfolio_recommendation(&self, _composition: &[CompositionEntry]) -> String {
        "Your portfolio has a balanced mix of funds across categories. Consider adding more international exposure for better diversification.".to_string()
    }

    fn risk_band(&self, risk: RiskLevel) -> RiskBand {
        match risk {
            RiskLevel::Low => RiskBand {
                volatility: 8.5,
                max_drawdown: 10.2,
            },
            RiskLevel::Moderate => RiskBand {
                volatility: 15.2,
                max_drawdown: 18.5,
            },
            RiskLevel::High | RiskLevel::VeryHigh => RiskBand {
                volatility: 22.7,
                max_drawdown: 32.3,
            },
        }
    }

    fn monthly_performance(&self) -> Vec<MonthlyPerformance> {
        const SERIES: [(&str, f64, f64); 12] = [
            ("Jan", 3.2, 2.8),
            ("Feb", 2.1, 1.7),
            ("Mar", -1.4, -2.1),
            ("Apr", 4.2, 3.5),
            ("May", 2.8, 2.2),
            ("Jun", 1.5, 1.2),
            ("Jul", 3.7, 3.1),
            ("Aug", -0.8, -1.4),
            ("Sep", 2.9, 2.5),
            ("Oct", 1.7, 1.4),
            ("Nov", 3.5, 2.8),
            ("Dec", 4.1, 3.4),
        ];

        SERIES
            .iter()
            .map(|&(month, portfolio, benchmark)| MonthlyPerformance {
                month: month.to_string(),
                portfolio,
                benchmark,
            })
            .collect()
    }
}
