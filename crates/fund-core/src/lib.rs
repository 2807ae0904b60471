pub mod catalog;
pub mod error;
pub mod reports;
pub mod traits;
pub mod types;

pub use catalog::*;
pub use error::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
