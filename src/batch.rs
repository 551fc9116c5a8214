//! Batch Evaluation
//!
//! Many tables at once, spread over the rayon thread pool. Tables are
//! independent: an invalid table yields an error in its own slot and does not
//! affect the others.
use crate::constants::SADDLE_POINT_MIN_TOTAL;
use crate::errors::FisherError;
use crate::exact_test::{default_engine, FisherExactTest, PValues};
use log::debug;
use rayon::prelude::*;

impl FisherExactTest {
    /// Test each table given as row-major cells `[a, b, c, d]`.
    pub fn compute_batch(&self, tables: &[[i64; 4]]) -> Vec<Result<PValues, FisherError>> {
        debug!("Running exact test on {} tables.", tables.len());
        // Size the cache once for the tables small enough to use it, so workers only read it.
        let cached_totals = tables.iter().filter_map(checked_total).filter(|n| *n <= SADDLE_POINT_MIN_TOTAL);
        if let Some(max_n) = cached_totals.max() {
            let _ = self.cache().snapshot(max_n);
        }
        tables
            .par_iter()
            .map(|&[a, b, c, d]| self.compute(a, b, c, d))
            .collect()
    }

    /// Test tables given as four equally long cell columns.
    pub fn compute_columns(
        &self,
        a: &[i64],
        b: &[i64],
        c: &[i64],
        d: &[i64],
    ) -> Result<Vec<Result<PValues, FisherError>>, FisherError> {
        if a.len() != b.len() || a.len() != c.len() || a.len() != d.len() {
            return Err(FisherError::MismatchedLengths(a.len(), b.len(), c.len(), d.len()));
        }
        let tables: Vec<[i64; 4]> = (0..a.len()).map(|i| [a[i], b[i], c[i], d[i]]).collect();
        Ok(self.compute_batch(&tables))
    }
}

/// Grand total of a table with non-negative cells.
fn checked_total(cells: &[i64; 4]) -> Option<u64> {
    cells
        .iter()
        .try_fold(0u64, |acc, &v| u64::try_from(v).ok().and_then(|v| acc.checked_add(v)))
}

/// Batch test with the default engine.
pub fn pvalue_batch(tables: &[[i64; 4]]) -> Vec<Result<PValues, FisherError>> {
    default_engine().compute_batch(tables)
}

/// Columnar batch test with the default engine.
pub fn pvalue_columns(
    a: &[i64],
    b: &[i64],
    c: &[i64],
    d: &[i64],
) -> Result<Vec<Result<PValues, FisherError>>, FisherError> {
    default_engine().compute_columns(a, b, c, d)
}
