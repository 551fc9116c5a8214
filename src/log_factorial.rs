//! Log-factorial Cache
//!
//! Append-only table of `ln(k!)` shared between threads. Readers take an
//! immutable snapshot; growth builds a longer buffer from the current one and
//! publishes it under the write lock. A published buffer is never mutated.
//! Arguments past the configured limit are answered by the Stirling series.
use crate::constants::{LOG_FACTORIAL_CACHE_LIMIT, LOG_FACTORIAL_PRECOMPUTE, STIRLING_SHIFT};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// 0.5 * ln(2π)
const HALF_LN_TWO_PI: f64 = 0.918_938_533_204_672_8;

/// Natural log of the gamma function for `x > 0`.
///
/// Small arguments are shifted upward with `Γ(x) = Γ(x + 1) / x` before
/// applying the Stirling series with Bernoulli corrections.
pub fn ln_gamma(x: f64) -> f64 {
    if x <= 0.0 || x.is_nan() {
        return f64::NAN;
    }
    let mut x = x;
    let mut result = 0.0;
    while x < STIRLING_SHIFT {
        result -= x.ln();
        x += 1.0;
    }
    result + (x - 0.5) * x.ln() - x + HALF_LN_TWO_PI + stirling_series(x)
}

/// Bernoulli terms of the Stirling series, accurate for `x >= STIRLING_SHIFT`.
#[inline]
fn stirling_series(x: f64) -> f64 {
    let inv_x = 1.0 / x;
    let inv_x2 = inv_x * inv_x;
    inv_x * (1.0 / 12.0 - inv_x2 * (1.0 / 360.0 - inv_x2 * (1.0 / 1260.0 - inv_x2 * (1.0 / 1680.0 - inv_x2 / 1188.0))))
}

/// Error of Stirling's formula, `ln(n!) - (n + 0.5) ln(n) + n - 0.5 ln(2π)`,
/// for integer `n >= 1`.
///
/// The result is small, so it keeps full relative precision where `ln(n!)`
/// itself would not.
pub fn stirling_error(n: f64) -> f64 {
    if n < STIRLING_SHIFT {
        // n! is exact in an f64 below the shift.
        let factorial: f64 = (2..=n as u64).map(|k| k as f64).product();
        factorial.ln() - (n + 0.5) * n.ln() + n - HALF_LN_TWO_PI
    } else {
        stirling_series(n)
    }
}

/// Immutable view of the cache, valid for any argument.
#[derive(Debug, Clone)]
pub struct LogFactorials {
    table: Arc<[f64]>,
}

impl LogFactorials {
    /// `ln(n!)`
    #[inline]
    pub fn get(&self, n: u64) -> f64 {
        match usize::try_from(n).ok().and_then(|i| self.table.get(i)) {
            Some(v) => *v,
            None => ln_gamma(n as f64 + 1.0),
        }
    }

    /// Number of tabulated values.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Thread-safe, lazily grown table of log-factorials.
#[derive(Debug)]
pub struct LogFactorialCache {
    table: RwLock<Arc<[f64]>>,
    limit: usize,
}

impl Default for LogFactorialCache {
    fn default() -> Self {
        LogFactorialCache::new(LOG_FACTORIAL_PRECOMPUTE, LOG_FACTORIAL_CACHE_LIMIT)
    }
}

impl LogFactorialCache {
    /// Create a cache.
    ///
    /// * `precompute` - Largest index computed up front.
    /// * `limit` - Largest index the table ever grows to.
    pub fn new(precompute: usize, limit: usize) -> Self {
        let precompute = precompute.min(limit);
        LogFactorialCache {
            table: RwLock::new(extend_table(&[], precompute + 1)),
            limit,
        }
    }

    /// Largest index this cache will tabulate.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of values currently tabulated.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// `ln(n!)`, growing the table when needed.
    pub fn ln_factorial(&self, n: u64) -> f64 {
        self.snapshot(n).get(n)
    }

    /// A view covering every index up to `max_n`.
    ///
    /// Indices up to the limit are tabulated, anything above falls back to
    /// `ln_gamma`.
    pub fn snapshot(&self, max_n: u64) -> LogFactorials {
        let wanted = usize::try_from(max_n).map_or(self.limit, |n| n.min(self.limit));
        let current = self.current();
        if wanted < current.len() {
            return LogFactorials { table: current };
        }
        LogFactorials {
            table: self.grow(wanted),
        }
    }

    fn current(&self) -> Arc<[f64]> {
        Arc::clone(&self.table.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn grow(&self, wanted: usize) -> Arc<[f64]> {
        let mut guard = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have grown the table while we waited.
        if wanted < guard.len() {
            return Arc::clone(&guard);
        }
        let target = wanted.max(guard.len().saturating_mul(2)).min(self.limit) + 1;
        let grown = extend_table(&guard, target);
        debug!("Extended log-factorial cache from {} to {} entries.", guard.len(), grown.len());
        *guard = Arc::clone(&grown);
        grown
    }
}

/// Copy `prefix` and append `ln(k!)` up to `len` entries.
///
/// The running sum uses Neumaier compensation so values deep into the table
/// keep full precision.
fn extend_table(prefix: &[f64], len: usize) -> Arc<[f64]> {
    let mut values = Vec::with_capacity(len.max(prefix.len()));
    values.extend_from_slice(prefix);
    if values.is_empty() && len > 0 {
        values.push(0.0);
    }
    let mut sum = values.last().copied().unwrap_or(0.0);
    let mut compensation = 0.0;
    for k in values.len()..len {
        let term = (k as f64).ln();
        let t = sum + term;
        if sum.abs() >= term.abs() {
            compensation += (sum - t) + term;
        } else {
            compensation += (term - t) + sum;
        }
        sum = t;
        values.push(sum + compensation);
    }
    values.into()
}
