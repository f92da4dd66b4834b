use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Converts an `f64` literal into `T`.
///
/// Every constant used by the tickers fits in `f32`; a failed cast gives NaN.
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Orders a view range and widens it when it is too small to tick.
///
/// Non-finite bounds give `(-expander, expander)`. A range whose width is
/// at most `tiny` times its largest magnitude is widened by `expander`
/// times each bound's magnitude, or to `(-expander, expander)` around zero.
///
/// # Examples
///
/// ```rust
/// use caltick::ticker::nonsingular;
///
/// assert_eq!(nonsingular(10.0, 0.0, 1e-7, 1e-13), (0.0, 10.0));
/// assert_eq!(nonsingular(0.0, 0.0, 1e-7, 1e-13), (-1e-7, 1e-7));
/// assert_eq!(nonsingular(f64::NAN, 1.0, 1e-7, 1e-13), (-1e-7, 1e-7));
///
/// let (lo, hi) = nonsingular(5.0, 5.0, 1e-7, 1e-13);
/// assert!(lo < 5.0 && hi > 5.0);
/// ```
pub fn nonsingular<T: Float>(vmin: T, vmax: T, expander: T, tiny: T) -> (T, T) {
    if !vmin.is_finite() || !vmax.is_finite() {
        return (-expander, expander);
    }
    let (mut lo, mut hi) = sorted_pair(vmin, vmax);
    let max_abs = lo.abs().max(hi.abs());
    if max_abs < constant::<T>(1e6) / tiny * T::min_positive_value() {
        return (-expander, expander);
    }
    if hi - lo <= max_abs * tiny {
        if hi == T::zero() && lo == T::zero() {
            return (-expander, expander);
        }
        lo = lo - expander * lo.abs();
        hi = hi + expander * hi.abs();
    }
    (lo, hi)
}

/// Floor division and remainder with the sign of the divisor.
///
/// `div` is the floored quotient nudged to the nearest integer when the
/// float subtraction leaves it just short, so `div * y + rem == x` holds as
/// closely as floating point allows.
pub(crate) fn div_mod_floor<T: Float>(x: T, y: T) -> (T, T) {
    let mut rem = x % y;
    let mut div = (x - rem) / y;
    if rem != T::zero() {
        if (y < T::zero()) != (rem < T::zero()) {
            rem = rem + y;
            div = div - T::one();
        }
    } else {
        rem = T::zero().copysign(y);
    }
    if div == T::zero() {
        return (T::zero().copysign(x / y), rem);
    }
    let mut floored = div.floor();
    if div - floored > constant(0.5) {
        floored = floored + T::one();
    }
    (floored, rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_pair() {
        assert_eq!(sorted_pair(3, 1), (1, 3));
        assert_eq!(sorted_pair(1.5, 2.5), (1.5, 2.5));
    }

    #[test]
    fn test_nonsingular_widens_flat_ranges() {
        let (lo, hi) = nonsingular(100.0, 100.0, 1e-7, 1e-13);
        assert!((lo - (100.0 - 1e-5)).abs() < 1e-12);
        assert!((hi - (100.0 + 1e-5)).abs() < 1e-12);

        let (lo, hi) = nonsingular(-4.0f32, -4.0, 0.5, 1e-6);
        assert_eq!((lo, hi), (-6.0, -2.0));
    }

    #[test]
    fn test_nonsingular_keeps_wide_ranges() {
        assert_eq!(nonsingular(0.0, 30.0, 1e-7, 1e-13), (0.0, 30.0));
        assert_eq!(nonsingular(1.0, 1.07, 1e-13, 1e-14), (1.0, 1.07));
    }

    #[test]
    fn test_div_mod_floor_matches_floor_semantics() {
        assert_eq!(div_mod_floor(30.0, 7.0), (4.0, 2.0));
        assert_eq!(div_mod_floor(-1.0, 7.0), (-1.0, 6.0));
        assert_eq!(div_mod_floor(0.0, 7.0), (0.0, 0.0));
        assert_eq!(div_mod_floor(-14.0, 7.0), (-2.0, 0.0));
        let (d, r) = div_mod_floor(0.3, 0.1);
        assert_eq!(d, 2.0);
        assert!((r - 0.1).abs() < 1e-12);
    }
}
