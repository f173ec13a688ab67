// Sanitization constants
/// pp is kept to 5 decimal places
pub const PP_SCALE: f64 = 100_000.0;
pub const FALLBACK_PP: f64 = 0.0;
