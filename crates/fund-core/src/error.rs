use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FundError {
    #[error("Fund not found: {0}")]
    NotFound(String),

    #[error("No valid funds selected for portfolio")]
    EmptyPortfolio,

    #[error("At least two funds are required for comparison ({found} resolved)")]
    InsufficientFunds { found: usize },

    #[error("Duplicate fund id in catalog: {0}")]
    DuplicateFundId(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl FundError {
    /// True for errors caused by the caller's request rather than the catalog
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            FundError::NotFound(_) | FundError::EmptyPortfolio | FundError::InsufficientFunds { .. }
        )
    }
}
