/// Rounds to the nearest integer, resolving halves towards positive infinity.
///
/// This differs from [`f64::round`], which resolves halves away from zero:
/// `-2.5` rounds to `-2.0` here. NaN and infinities are returned unchanged.
///
/// # Examples
///
/// ```
/// use ballotlens_stats::rounding::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(2.49), 2.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(-2.51), -3.0);
///
/// // Neither the largest double below one half nor large integers are nudged.
/// assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
/// assert_eq!(round_half_up(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
/// ```
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_edges() {
        let below_half = 0.5 - f64::EPSILON / 4.0;
        assert!(below_half < 0.5);
        assert_eq!(round_half_up(below_half), 0.0);
        assert_eq!(round_half_up(-below_half), -0.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);

        let big = 2f64.powi(52) + 1.0;
        assert_eq!(round_half_up(big), big);
        assert_eq!(round_half_up(-big), -big);
        assert_eq!(round_half_up(2f64.powi(53) + 2.0), 2f64.powi(53) + 2.0);
        assert!(round_half_up(f64::NAN).is_nan());
        assert_eq!(round_half_up(f64::INFINITY), f64::INFINITY);
    }
}
