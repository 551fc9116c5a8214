use crate::constants::CLAMP_WARN_THRESHOLD;
use crate::errors::FisherError;
use log::warn;

/// Create a string of all available items.
pub fn items_to_strings(items: &[&str]) -> String {
    items.join(", ")
}

// Validation
pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), FisherError> {
    if value.is_nan() || value < min || max < value {
        Err(FisherError::InvalidParameter(
            parameter.to_string(),
            format!("real value within range {} and {}", min, max),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_usize_parameter(value: usize, min: usize, parameter: &str) -> Result<(), FisherError> {
    if value < min {
        Err(FisherError::InvalidParameter(
            parameter.to_string(),
            format!("integer value of at least {}", min),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Clamp a summed probability into [0, 1].
///
/// Summation can drift slightly past either bound. The value is clamped,
/// never rescaled.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    if p > 1.0 + CLAMP_WARN_THRESHOLD || p < -CLAMP_WARN_THRESHOLD {
        warn!("Probability sum {} drifted outside [0, 1], clamping.", p);
    }
    p.clamp(0.0, 1.0)
}

const LANES: usize = 16;

/// Sum of values using independent lanes.
///
/// Each lane accumulates a strided subset, which keeps the running
/// sums short and lets the compiler vectorize the loop.
pub fn fast_sum(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(LANES);
    let remainder = chunks.remainder();

    let sum = chunks.fold([0.0_f64; LANES], |mut acc, chunk| {
        for i in 0..LANES {
            acc[i] += chunk[i];
        }
        acc
    });

    let remainder: f64 = remainder.iter().sum();

    let mut reduced = 0.0;
    for s in sum.iter() {
        reduced += *s;
    }
    reduced + remainder
}

/// Round a value to a fixed number of decimals.
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
