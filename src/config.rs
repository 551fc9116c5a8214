//! Exact Test Configuration
//!
//! Tunables of the exact-test engine. Every field has a default, so a partial
//! json document (or `{}`) is a valid configuration.
use crate::constants::{
    LOG_FACTORIAL_CACHE_LIMIT, LOG_FACTORIAL_PRECOMPUTE, MAX_LOG_FACTORIAL_CACHE_LIMIT, MAX_TWO_TAIL_TOLERANCE,
    TWO_TAIL_RELATIVE_TOLERANCE,
};
use crate::errors::FisherError;
use crate::utils::{validate_float_parameter, validate_usize_parameter};
use serde::{Deserialize, Serialize};

fn default_two_tail_tolerance() -> f64 {
    TWO_TAIL_RELATIVE_TOLERANCE
}
fn default_cache_precompute() -> usize {
    LOG_FACTORIAL_PRECOMPUTE
}
fn default_cache_limit() -> usize {
    LOG_FACTORIAL_CACHE_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExactTestConfig {
    /// Relative tolerance when comparing a table's probability with the observed one.
    #[serde(default = "default_two_tail_tolerance")]
    pub two_tail_tolerance: f64,
    /// Log-factorials computed when the engine is built.
    #[serde(default = "default_cache_precompute")]
    pub cache_precompute: usize,
    /// Largest tabulated log-factorial; larger arguments use the Stirling series.
    #[serde(default = "default_cache_limit")]
    pub cache_limit: usize,
}

impl Default for ExactTestConfig {
    fn default() -> Self {
        ExactTestConfig {
            two_tail_tolerance: default_two_tail_tolerance(),
            cache_precompute: default_cache_precompute(),
            cache_limit: default_cache_limit(),
        }
    }
}

impl ExactTestConfig {
    /// Set the two-tail tolerance.
    pub fn set_two_tail_tolerance(mut self, two_tail_tolerance: f64) -> Self {
        self.two_tail_tolerance = two_tail_tolerance;
        self
    }

    /// Set the number of log-factorials computed up front.
    pub fn set_cache_precompute(mut self, cache_precompute: usize) -> Self {
        self.cache_precompute = cache_precompute;
        self
    }

    /// Set the largest tabulated log-factorial.
    pub fn set_cache_limit(mut self, cache_limit: usize) -> Self {
        self.cache_limit = cache_limit;
        self
    }

    pub fn validate(&self) -> Result<(), FisherError> {
        validate_float_parameter(
            self.two_tail_tolerance,
            0.0,
            MAX_TWO_TAIL_TOLERANCE,
            "two_tail_tolerance",
        )?;
        validate_usize_parameter(self.cache_limit, self.cache_precompute, "cache_limit")?;
        if self.cache_limit > MAX_LOG_FACTORIAL_CACHE_LIMIT {
            return Err(FisherError::InvalidParameter(
                "cache_limit".to_string(),
                format!("integer value of at most {}", MAX_LOG_FACTORIAL_CACHE_LIMIT),
                self.cache_limit.to_string(),
            ));
        }
        Ok(())
    }

    /// Dump the configuration as a json object.
    pub fn json_dump(&self) -> Result<String, FisherError> {
        serde_json::to_string(self).map_err(|e| FisherError::UnableToWrite(e.to_string()))
    }

    /// Load and validate a configuration from a json string.
    pub fn from_json(json_str: &str) -> Result<Self, FisherError> {
        let cfg: ExactTestConfig =
            serde_json::from_str(json_str).map_err(|e| FisherError::UnableToRead(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
