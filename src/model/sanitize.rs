use tracing::warn;

use crate::{
    engine::RawRating,
    model::{
        constants::{FALLBACK_PP, PP_SCALE},
        structures::performance_result::{DifficultyRating, PerformanceRating, PerformanceResult}
    }
};

/// Makes a raw pp value safe to store.
///
/// NaN, infinite and non-positive values become `0.0`. Everything else is
/// rounded to 5 decimals, half away from zero on the scaled value
/// (`0.015625` becomes `0.01563`).
pub fn sanitize_pp(pp: f64) -> f64 {
    if !pp.is_finite() {
        warn!(pp, "Engine returned a non-finite pp value, storing {}", FALLBACK_PP);
        return FALLBACK_PP;
    }

    if pp <= 0.0 {
        return FALLBACK_PP;
    }

    let scaled = pp * PP_SCALE;
    // Scaling overflows near f64::MAX, keep the value as-is
    if !scaled.is_finite() {
        return pp;
    }

    scaled.round() / PP_SCALE
}

/// Builds the public result. Only the total pp is sanitized,
/// breakdown and difficulty values are passed through as-is.
pub fn assemble(raw: RawRating) -> PerformanceResult {
    PerformanceResult {
        performance: PerformanceRating {
            pp: sanitize_pp(raw.pp),
            pp_acc: raw.pp_acc,
            pp_aim: raw.pp_aim,
            pp_speed: raw.pp_speed,
            pp_flashlight: raw.pp_flashlight,
            effective_miss_count: raw.effective_miss_count,
            pp_difficulty: raw.pp_difficulty
        },
        difficulty: DifficultyRating {
            stars: raw.stars,
            aim: raw.aim,
            speed: raw.speed,
            flashlight: raw.flashlight,
            slider_factor: raw.slider_factor,
            speed_note_count: raw.speed_note_count,
            stamina: raw.stamina,
            color: raw.color,
            rhythm: raw.rhythm,
            peak: raw.peak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{assemble, sanitize_pp};
    use crate::engine::RawRating;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_nan_becomes_zero() {
        assert_eq!(sanitize_pp(f64::NAN), 0.0);
    }

    #[test]
    fn test_infinities_become_zero() {
        assert_eq!(sanitize_pp(f64::INFINITY), 0.0);
        assert_eq!(sanitize_pp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_negative_becomes_zero() {
        assert_eq!(sanitize_pp(-12.5), 0.0);
        // Would otherwise round to -0.0
        assert!(sanitize_pp(-0.000001).is_sign_positive());
    }

    #[test]
    fn test_rounds_to_five_decimals() {
        assert_eq!(sanitize_pp(123.456789), 123.45679);
        assert_eq!(sanitize_pp(1.000004), 1.0);
        assert_eq!(sanitize_pp(727.0), 727.0);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 0.015625 is exact in binary, so the scaled value is exactly 1562.5.
        // Half-to-even would give 0.01562.
        assert_eq!(sanitize_pp(0.015625), 0.01563);
        assert_eq!(sanitize_pp(0.046875), 0.04688);
    }

    #[test]
    fn test_large_value_is_still_rounded() {
        assert_eq!(sanitize_pp(123456789.123456), 123456789.12346);
    }

    #[test]
    fn test_huge_value_stays_finite() {
        assert_eq!(sanitize_pp(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_tiny_positive_rounds_to_zero() {
        assert_eq!(sanitize_pp(0.000001), 0.0);
    }

    #[test]
    fn test_assemble_sanitizes_total_only() {
        let raw = RawRating {
            pp: f64::NAN,
            pp_aim: Some(f64::INFINITY),
            pp_acc: Some(12.3456789),
            stars: 6.123456789,
            aim: Some(3.0),
            ..Default::default()
        };

        let result = assemble(raw);

        assert_eq!(result.performance.pp, 0.0);
        assert_eq!(result.performance.pp_aim, Some(f64::INFINITY));
        assert_eq!(result.performance.pp_acc, Some(12.3456789));
        assert_eq!(result.performance.pp_speed, None);
        assert_abs_diff_eq!(result.difficulty.stars, 6.123456789);
        assert_eq!(result.difficulty.aim, Some(3.0));
        assert_eq!(result.difficulty.peak, None);
    }

    #[test]
    fn test_non_finite_breakdown_serializes_as_null() {
        let raw = RawRating {
            pp: 100.0,
            pp_aim: Some(f64::NAN),
            ..Default::default()
        };

        let value = serde_json::to_value(assemble(raw)).unwrap();

        assert!(value["performance"]["pp_aim"].is_null());
        assert_eq!(value["performance"]["pp"], 100.0);
    }
}
