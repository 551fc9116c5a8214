//! Fast Fisher's exact test for 2x2 contingency tables.
//!
//! ```
//! let p = fisher::pvalue(2, 7, 8, 2).unwrap();
//! assert!((p.two_tail - 0.02301413756522114).abs() < 1e-12);
//! ```

// Modules
pub mod alternative;
pub mod batch;
pub mod config;
pub mod constants;
pub mod errors;
pub mod hypergeometric;
pub mod log_factorial;
pub mod table;
pub mod utils;

#[cfg(test)]
mod tests;

// Individual classes, and functions
pub use alternative::Alternative;
pub use batch::{pvalue_batch, pvalue_columns};
pub use config::ExactTestConfig;
pub use errors::FisherError;
pub use exact_test::{default_engine, pvalue, pvalue_table, FisherExactTest, PValues};
pub use log_factorial::LogFactorialCache;
pub use table::ContingencyTable;
