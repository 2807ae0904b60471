use serde::{Deserialize, Serialize};

/// Return horizons tracked for every fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum Horizon {
    OneYear,
    ThreeYear,
    FiveYear,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::OneYear, Horizon::ThreeYear, Horizon::FiveYear];

    /// Chart label used in comparison datasets
    pub fn label(&self) -> &'static str {
        match self {
            Horizon::OneYear => "1Y Return",
            Horizon::ThreeYear => "3Y Return",
            Horizon::FiveYear => "5Y Return",
        }
    }

    /// Fixed margin by which a fund is assumed to beat its synthetic benchmark.
    pub fn benchmark_spread(&self) -> f64 {
        match self {
            Horizon::OneYear => 1.5,
            Horizon::ThreeYear => 2.2,
            Horizon::FiveYear => 2.8,
        }
    }
}

/// Trailing returns in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FundReturns {
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

impl FundReturns {
    pub fn new(one_year: f64, three_year: f64, five_year: f64) -> Self {
        Self {
            one_year,
            three_year,
            five_year,
        }
    }

    pub fn get(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::OneYear => self.one_year,
            Horizon::ThreeYear => self.three_year,
            Horizon::FiveYear => self.five_year,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.one_year, self.three_year, self.five_year]
    }

    /// Two-decimal display strings; the numeric values stay untouched.
    pub fn formatted(&self) -> FormattedReturns {
        FormattedReturns {
            one_year: format!("{:.2}", self.one_year),
            three_year: format!("{:.2}", self.three_year),
            five_year: format!("{:.2}", self.five_year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FormattedReturns {
    pub one_year: String,
    pub three_year: String,
    pub five_year: String,
}

/// Risk classification shared by funds and portfolios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High", alias = "VeryHigh")]
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// Ordinal used for weighted risk scoring (1 to 4)
    pub fn ordinal(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
            RiskLevel::VeryHigh => 4,
        }
    }

    /// Classify a weighted ordinal score back into a level.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 1.5 => RiskLevel::Low,
            s if s < 2.5 => RiskLevel::Moderate,
            s if s < 3.5 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A mutual fund in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub fund_house: String,
    pub category: String,
    pub returns: FundReturns,
    /// Assets under management, display only
    pub aum: String,
    pub risk: RiskLevel,
    pub description: String,
}

impl FundRecord {
    /// Lower-cased text that free-text queries are matched against
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.ticker, self.fund_house, self.category
        )
        .to_lowercase()
    }
}

/// Fund type filter. Unknown wire values collapse to `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FundType {
    #[default]
    All,
    Equity,
    Debt,
    Hybrid,
    Index,
    #[serde(rename = "etf")]
    Etf,
}

impl FundType {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "equity" => FundType::Equity,
            "debt" => FundType::Debt,
            "hybrid" => FundType::Hybrid,
            "index" => FundType::Index,
            "etf" => FundType::Etf,
            _ => FundType::All,
        }
    }

    /// Category names a fund's category must contain to count as this type.
    /// `All` has no constraint and returns an empty slice.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            FundType::All => &[],
            FundType::Equity => &[
                "Large Cap",
                "Mid Cap",
                "Small Cap",
                "Large & Mid Cap",
                "Flexi Cap",
                "Sectoral/Thematic",
            ],
            FundType::Debt => &["Debt", "Corporate Bond", "Government Bond", "Liquid"],
            FundType::Hybrid => &["Hybrid", "Balanced", "Balanced Advantage"],
            FundType::Index => &["Index", "ETF"],
            FundType::Etf => &["ETF"],
        }
    }
}

impl From<String> for FundType {
    fn from(value: String) -> Self {
        FundType::parse_lenient(&value)
    }
}

/// Risk level filter. Unknown wire values collapse to `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum RiskFilter {
    #[default]
    All,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskFilter {
    pub fn parse_lenient(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "low" => RiskFilter::Low,
            "moderate" => RiskFilter::Moderate,
            "high" => RiskFilter::High,
            "veryhigh" => RiskFilter::VeryHigh,
            _ => RiskFilter::All,
        }
    }

    /// The level this filter pins, or `None` for no constraint
    pub fn level(&self) -> Option<RiskLevel> {
        match self {
            RiskFilter::All => None,
            RiskFilter::Low => Some(RiskLevel::Low),
            RiskFilter::Moderate => Some(RiskLevel::Moderate),
            RiskFilter::High => Some(RiskLevel::High),
            RiskFilter::VeryHigh => Some(RiskLevel::VeryHigh),
        }
    }
}

impl From<String> for RiskFilter {
    fn from(value: String) -> Self {
        RiskFilter::parse_lenient(&value)
    }
}

/// Filter configuration for fund search.
///
/// Defaults to no constraint on any dimension. `min_return` is an inclusive
/// lower bound on the one-year return and only applies when positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    pub fund_type: FundType,
    pub risk_level: RiskFilter,
    pub min_return: f64,
}

impl SearchFilters {
    pub fn new(fund_type: FundType, risk_level: RiskFilter, min_return: f64) -> Self {
        Self {
            fund_type,
            risk_level,
            min_return,
        }
        .normalized()
    }

    /// Reset a NaN or non-positive `min_return` to 0. Positive infinity stays
    /// and excludes every fund.
    pub fn normalized(self) -> Self {
        let min_return = if self.min_return > 0.0 {
            self.min_return
        } else {
            0.0
        };
        Self { min_return, ..self }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.fund_type == FundType::All && self.risk_level == RiskFilter::All && self.min_return <= 0.0
    }
}
