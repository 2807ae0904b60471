//! Fund Query & Portfolio Analytics
//!
//! Pure engines over a read-only [`FundCatalog`](fund_core::FundCatalog):
//! search and filtering, single-fund analysis, portfolio aggregation and
//! side-by-side comparison, plus an async service facade that models
//! request latency.

pub mod analyzer;
pub mod comparison;
pub mod portfolio;
pub mod reference;
pub mod search;
pub mod service;

pub use analyzer::FundAnalyzer;
pub use comparison::ComparisonEngine;
pub use portfolio::{demo_positions, PortfolioAnalyzer};
pub use reference::StaticReferenceData;
pub use search::SearchFilterEngine;
pub use service::{LatencyProfile, MockFundService};
