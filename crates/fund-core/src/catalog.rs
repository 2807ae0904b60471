//! Read-only fund catalog.
//!
//! Funds are loaded once at startup and never mutated afterwards, so a catalog
//! can be shared behind an `Arc` by any number of concurrent readers.

use std::collections::HashMap;

use crate::{FundError, FundRecord, FundReturns, RiskLevel};

#[derive(Debug, Clone)]
pub struct FundCatalog {
    funds: Vec<FundRecord>,
    index: HashMap<String, usize>,
}

impl FundCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(funds: Vec<FundRecord>) -> Result<Self, FundError> {
        let mut index = HashMap::with_capacity(funds.len());
        for (position, fund) in funds.iter().enumerate() {
            if fund.id.trim().is_empty() {
                return Err(FundError::InvalidCatalog(format!(
                    "fund at position {} has an empty id",
                    position
                )));
            }
            if index.insert(fund.id.clone(), position).is_some() {
                return Err(FundError::DuplicateFundId(fund.id.clone()));
            }
        }
        Ok(Self { funds, index })
    }

    /// Parse a JSON array of fund records.
    pub fn from_json(json: &str) -> Result<Self, FundError> {
        let funds: Vec<FundRecord> =
            serde_json::from_str(json).map_err(|e| FundError::InvalidCatalog(e.to_string()))?;
        Self::new(funds)
    }

    /// The built-in sample catalog
    pub fn sample() -> Self {
        let funds = sample_funds();
        let index = funds
            .iter()
            .enumerate()
            .map(|(position, fund)| (fund.id.clone(), position))
            .collect();
        Self { funds, index }
    }

    pub fn get(&self, id: &str) -> Option<&FundRecord> {
        self.index.get(id).map(|&position| &self.funds[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FundRecord> {
        self.funds.iter()
    }

    pub fn funds(&self) -> &[FundRecord] {
        &self.funds
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}

impl Default for FundCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

#[allow(clippy::too_many_arguments)]
fn fund(
    id: &str,
    name: &str,
    ticker: &str,
    fund_house: &str,
    category: &str,
    returns: (f64, f64, f64),
    aum: &str,
    risk: RiskLevel,
    description: &str,
) -> FundRecord {
    FundRecord {
        id: id.to_string(),
        name: name.to_string(),
        ticker: ticker.to_string(),
        fund_house: fund_house.to_string(),
        category: category.to_string(),
        returns: FundReturns::new(returns.0, returns.1, returns.2),
        aum: aum.to_string(),
        risk,
        description: description.to_string(),
    }
}

fn sample_funds() -> Vec<FundRecord> {
    vec![
        fund(
            "fund-1",
            "ICICI Prudential Technology Fund",
            "ICICTECH-GR",
            "ICICI Prudential",
            "Sectoral/Thematic",
            (18.5, 22.3, 19.8),
            "₹8,245 Cr",
            RiskLevel::High,
            "This fund invests in technology and technology related companies including software, services, hardware, semiconductors and telecommunications.",
        ),
        fund(
            "fund-2",
            "Axis Bluechip Fund",
            "AXISBLU-GR",
            "Axis Mutual Fund",
            "Large Cap",
            (12.4, 15.7, 14.2),
            "₹37,892 Cr",
            RiskLevel::Moderate,
            "This fund primarily invests in blue chip companies with strong fundamentals, stable earnings, and potential for long-term growth.",
        ),
        fund(
            "fund-3",
            "SBI Small Cap Fund",
            "SBISMALL-GR",
            "SBI Mutual Fund",
            "Small Cap",
            (25.7, 31.2, 22.5),
            "₹15,367 Cr",
            RiskLevel::VeryHigh,
            "This fund invests in small-cap companies with high growth potential, focusing on emerging businesses with innovative models.",
        ),
        fund(
            "fund-4",
            "HDFC Corporate Bond Fund",
            "HDFCCORP-GR",
            "HDFC Mutual Fund",
            "Debt",
            (7.2, 8.1, 7.8),
            "₹28,641 Cr",
            RiskLevel::Low,
            "This fund invests in corporate bonds with high credit quality, aiming to provide stable returns with lower volatility.",
        ),
        fund(
            "fund-5",
            "Mirae Asset Emerging Bluechip",
            "MIRAEEM-GR",
            "Mirae Asset",
            "Large & Mid Cap",
            (16.8, 19.4, 18.2),
            "₹22,173 Cr",
            RiskLevel::High,
            "This fund invests in a mix of established large caps and growing mid-cap companies with strong fundamentals.",
        ),
        fund(
            "fund-6",
            "Aditya Birla Sun Life Digital India Fund",
            "ABSLDIG-GR",
            "Aditya Birla Sun Life",
            "Sectoral/Thematic",
            (17.3, 23.8, 21.2),
            "₹6,789 Cr",
            RiskLevel::High,
            "This fund invests in companies that benefit from digitalization trends in India, including IT, e-commerce, fintech, and digital services.",
        ),
        fund(
            "fund-7",
            "Kotak Balanced Advantage Fund",
            "KOTAKBA-GR",
            "Kotak Mahindra",
            "Hybrid",
            (10.5, 12.7, 11.3),
            "₹15,423 Cr",
            RiskLevel::Moderate,
            "This fund dynamically manages allocation between equity and debt based on market conditions to optimize returns while managing volatility.",
        ),
        fund(
            "fund-8",
            "Parag Parikh Flexi Cap Fund",
            "PPFCF-GR",
            "PPFAS Mutual Fund",
            "Flexi Cap",
            (15.2, 18.6, 16.9),
            "₹31,820 Cr",
            RiskLevel::Moderate,
            "This fund invests across market caps and geographies with a value investing approach, focusing on companies with strong moats.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_lookup() {
        let catalog = FundCatalog::sample();
        assert_eq!(catalog.len(), 8);

        let fund = catalog.get("fund-4").expect("fund-4 in sample");
        assert_eq!(fund.name, "HDFC Corporate Bond Fund");
        assert_eq!(fund.risk, RiskLevel::Low);
        assert_eq!(catalog.funds()[3].id, "fund-4");
        assert!(catalog.get("fund-99").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut funds = FundCatalog::sample().funds().to_vec();
        funds.push(funds[0].clone());

        let err = FundCatalog::new(funds).unwrap_err();
        assert_eq!(err, FundError::DuplicateFundId("fund-1".to_string()));
    }

    #[test]
    fn test_from_json_round_trips_wire_format() {
        let json = r#"[{
            "id": "fund-x",
            "name": "Nifty 50 Index Fund",
            "ticker": "NIFTY-IDX",
            "fundHouse": "UTI Mutual Fund",
            "category": "Index",
            "returns": {"oneYear": 11.0, "threeYear": 13.5, "fiveYear": -0.4},
            "aum": "₹12,000 Cr",
            "risk": "Very High",
            "description": "Tracks the Nifty 50."
        }]"#;

        let catalog = FundCatalog::from_json(json).unwrap();
        let fund = catalog.get("fund-x").unwrap();
        assert_eq!(fund.fund_house, "UTI Mutual Fund");
        assert_eq!(fund.risk, RiskLevel::VeryHigh);
        assert_eq!(fund.returns.five_year, -0.4);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = FundCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, FundError::InvalidCatalog(_)));
    }
}
