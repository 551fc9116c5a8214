/// Relative tolerance used when deciding whether a table is no more probable than the observed one.
pub const TWO_TAIL_RELATIVE_TOLERANCE: f64 = 1e-7;
/// Largest accepted two-tail tolerance.
pub const MAX_TWO_TAIL_TOLERANCE: f64 = 1e-3;
/// Number of log-factorials computed when a cache is created.
pub const LOG_FACTORIAL_PRECOMPUTE: usize = 1024;
/// Largest index the log-factorial cache grows to before switching to the Stirling series.
pub const LOG_FACTORIAL_CACHE_LIMIT: usize = 1 << 20;
/// Below this argument ln(Γ(x)) is shifted upward by recurrence before applying Stirling.
pub const STIRLING_SHIFT: f64 = 16.0;
/// Drift outside [0, 1] larger than this is reported before clamping.
pub const CLAMP_WARN_THRESHOLD: f64 = 1e-9;
/// Hard ceiling on the configurable cache limit.
pub const MAX_LOG_FACTORIAL_CACHE_LIMIT: usize = 1 << 26;
/// Tables with a grand total above this take the probability of the mode from the saddle-point form.
pub const SADDLE_POINT_MIN_TOTAL: u64 = 1 << 12;
