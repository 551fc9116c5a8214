//! Hypergeometric Null Distribution
//!
//! With the margins of a 2x2 table held fixed, cell `a` follows a
//! hypergeometric distribution on `[max(0, r1 - c2), min(r1, c1)]` with
//!
//! ```text
//! P(k) = C(r1, k) * C(r2, c1 - k) / C(n, c1)
//! ```
//!
//! Single probabilities are evaluated in log space. Runs of neighbouring
//! probabilities use the ratio `P(k + 1) / P(k)`, walking outward from the
//! mode so every relative weight stays within `(0, 1]`.
//!
//! Differences of log-factorials lose about `n ln(n)` ulps, so for large
//! totals a probability is also available in Loader's saddle-point form,
//! built from Stirling errors and binomial deviances that stay small.
use crate::log_factorial::{stirling_error, LogFactorials};
use crate::table::ContingencyTable;

/// ln(2π)
const LN_TWO_PI: f64 = 1.837_877_066_409_345_3;

/// `x ln(x / np) + np - x`, summed as a series when `x` is close to `np`.
fn binomial_deviance(x: f64, np: f64) -> f64 {
    if (x - np).abs() < 0.1 * (x + np) {
        let mut v = (x - np) / (x + np);
        let mut s = (x - np) * v;
        let mut term = 2.0 * x * v;
        v *= v;
        for j in 1..1000 {
            term *= v;
            let next = s + term / (2 * j + 1) as f64;
            if next == s {
                return next;
            }
            s = next;
        }
        s
    } else {
        x * (x / np).ln() + np - x
    }
}

/// `ln` of the binomial probability of `x` successes in `n` trials with
/// success probability `p = 1 - q`.
fn ln_binomial_saddle_point(x: f64, n: f64, p: f64, q: f64) -> f64 {
    if p == 0.0 {
        return if x == 0.0 { 0.0 } else { f64::NEG_INFINITY };
    }
    if q == 0.0 {
        return if x == n { 0.0 } else { f64::NEG_INFINITY };
    }
    if x == 0.0 {
        if n == 0.0 {
            return 0.0;
        }
        return if p < 0.1 { -binomial_deviance(n, n * q) - n * p } else { n * q.ln() };
    }
    if x == n {
        return if q < 0.1 { -binomial_deviance(n, n * p) - n * q } else { n * p.ln() };
    }
    let lc = stirling_error(n) - stirling_error(x) - stirling_error(n - x)
        - binomial_deviance(x, n * p)
        - binomial_deviance(n - x, n * q);
    let lf = LN_TWO_PI + x.ln() + (-x / n).ln_1p();
    lc - 0.5 * lf
}

/// Distribution of the top-left cell given the table margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    pub r1: u64,
    pub r2: u64,
    pub c1: u64,
    pub c2: u64,
    pub n: u64,
}

/// Probabilities relative to the mode, `w(k) = P(k) / P(mode)`.
///
/// Only the stretch of the support where the weights are normal floats is
/// stored; every weight outside it is treated as zero. The stored length
/// therefore follows the spread of the distribution, not the size of the
/// support.
#[derive(Debug, Clone)]
pub struct Weights {
    pub start: u64,
    pub mode: u64,
    pub values: Vec<f64>,
}

impl Weights {
    /// Weight of `k`, zero outside the stored range.
    #[inline]
    pub fn get(&self, k: u64) -> f64 {
        k.checked_sub(self.start)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Last value of `k` with a stored weight.
    pub fn end(&self) -> u64 {
        self.start + self.values.len() as u64 - 1
    }

    /// Weights of all stored `k <= a`.
    pub fn at_most(&self, a: u64) -> &[f64] {
        match a.checked_sub(self.start) {
            None => &self.values[..0],
            Some(i) => {
                let stop = usize::try_from(i).map_or(self.values.len(), |i| (i + 1).min(self.values.len()));
                &self.values[..stop]
            }
        }
    }

    /// Weights of all stored `k >= a`.
    pub fn at_least(&self, a: u64) -> &[f64] {
        match a.checked_sub(self.start) {
            None => &self.values[..],
            Some(i) => {
                let begin = usize::try_from(i).map_or(self.values.len(), |i| i.min(self.values.len()));
                &self.values[begin..]
            }
        }
    }
}

impl Hypergeometric {
    pub fn from_table(table: &ContingencyTable) -> Self {
        let (r1, r2) = table.row_sums();
        let (c1, c2) = table.col_sums();
        Hypergeometric {
            r1,
            r2,
            c1,
            c2,
            n: r1 + r2,
        }
    }

    /// Smallest and largest feasible value of the cell.
    pub fn support(&self) -> (u64, u64) {
        (self.r1.saturating_sub(self.c2), self.r1.min(self.c1))
    }

    /// Number of feasible tables.
    pub fn support_len(&self) -> u64 {
        let (lo, hi) = self.support();
        hi - lo + 1
    }

    /// Most probable value of the cell, `floor((r1 + 1)(c1 + 1) / (n + 2))`.
    pub fn mode(&self) -> u64 {
        let (lo, hi) = self.support();
        let m = (u128::from(self.r1) + 1) * (u128::from(self.c1) + 1) / (u128::from(self.n) + 2);
        u64::try_from(m).unwrap_or(hi).clamp(lo, hi)
    }

    /// `ln P(k)`, negative infinity outside the support.
    pub fn ln_pmf(&self, k: u64, lf: &LogFactorials) -> f64 {
        let (lo, hi) = self.support();
        if k < lo || k > hi {
            return f64::NEG_INFINITY;
        }
        let ln_numerator = lf.get(self.r1) - lf.get(k) - lf.get(self.r1 - k) + lf.get(self.r2)
            - lf.get(self.c1 - k)
            - lf.get(self.r2 - (self.c1 - k));
        let ln_denominator = lf.get(self.n) - lf.get(self.c1) - lf.get(self.c2);
        ln_numerator - ln_denominator
    }

    pub fn pmf(&self, k: u64, lf: &LogFactorials) -> f64 {
        self.ln_pmf(k, lf).exp()
    }

    /// `ln P(k)` in saddle-point form, without log-factorials.
    ///
    /// Keeps close to full relative precision for any total, where
    /// [`Hypergeometric::ln_pmf`] degrades once `ln(n!)` grows large.
    pub fn ln_pmf_saddle_point(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k < lo || k > hi {
            return f64::NEG_INFINITY;
        }
        let n = self.n as f64;
        let p = self.c1 as f64 / n;
        let q = self.c2 as f64 / n;
        let c1 = self.c1 as f64;
        let k = k as f64;
        ln_binomial_saddle_point(k, self.r1 as f64, p, q) + ln_binomial_saddle_point(c1 - k, self.r2 as f64, p, q)
            - ln_binomial_saddle_point(c1, n, p, q)
    }

    pub fn pmf_saddle_point(&self, k: u64) -> f64 {
        self.ln_pmf_saddle_point(k).exp()
    }

    /// `P(k + 1) / P(k)` for `k` and `k + 1` in the support.
    #[inline]
    pub fn ratio_up(&self, k: u64) -> f64 {
        let num = (self.r1 - k) as f64 * (self.c1 - k) as f64;
        let den = (k + 1) as f64 * (self.c2 + k + 1 - self.r1) as f64;
        num / den
    }

    /// `P(k - 1) / P(k)` for `k - 1` and `k` in the support.
    #[inline]
    pub fn ratio_down(&self, k: u64) -> f64 {
        let num = k as f64 * (self.c2 + k - self.r1) as f64;
        let den = (self.r1 - k + 1) as f64 * (self.c1 - k + 1) as f64;
        num / den
    }

    /// Relative weights over the support, built by the ratio recurrence from the mode.
    pub fn weights(&self) -> Weights {
        let (lo, hi) = self.support();
        let mode = self.mode();

        let mut below = Vec::new();
        let mut w = 1.0;
        let mut k = mode;
        while k > lo {
            w *= self.ratio_down(k);
            if w < f64::MIN_POSITIVE {
                break;
            }
            below.push(w);
            k -= 1;
        }

        let mut values = Vec::with_capacity(below.len() + 1);
        let start = mode - below.len() as u64;
        values.extend(below.into_iter().rev());
        values.push(1.0);

        let mut w = 1.0;
        let mut k = mode;
        while k < hi {
            w *= self.ratio_up(k);
            if w < f64::MIN_POSITIVE {
                break;
            }
            values.push(w);
            k += 1;
        }

        Weights { start, mode, values }
    }
}
