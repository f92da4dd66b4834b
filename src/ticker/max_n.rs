use num_traits::Float;

use super::util::{constant, div_mod_floor, nonsingular};
use super::Locator;
use crate::error::{AxisError, Result};

const DEFAULT_STEPS: [f64; 10] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0];

/// Tick sets larger than this are reported.
const MAX_TICKS: usize = 1000;

/// Bounded round-number locator: at most `nbins + 1` ticks at a "nice"
/// multiple of a power of ten.
///
/// Preferred steps are mantissas in `[1, 10]`. For a range, the locator
/// scales them to the magnitude of `(vmax - vmin) / nbins`, takes the
/// smallest step that covers the range in `nbins` intervals and lays ticks
/// at its multiples. If that leaves fewer than `min_n_ticks` ticks inside
/// the range, it falls back to smaller steps. The outermost ticks may lie
/// up to one step outside the range.
///
/// Ranges far from zero relative to their width are ticked about a power
/// of ten offset, so `[1e9, 1e9 + 1]` still gets sub-unit steps.
///
/// # Examples
///
/// ```rust
/// use caltick::ticker::MaxNLocator;
///
/// let locator = MaxNLocator::new(4).unwrap();
/// assert_eq!(locator.tick_values(2.0, 3.0), vec![2.0, 2.25, 2.5, 2.75, 3.0]);
///
/// let days = MaxNLocator::new(5)
///     .and_then(|l| l.with_steps(&[1.0, 2.0, 4.0, 7.0, 10.0]))
///     .unwrap()
///     .with_integer(true);
/// assert_eq!(days.tick_values(0.0, 30.0), vec![0.0, 7.0, 14.0, 21.0, 28.0, 35.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MaxNLocator {
    nbins: usize,
    /// Staircase of the preferred steps: a decade below, the steps, and the
    /// next step a decade above.
    extended_steps: Vec<f64>,
    integer: bool,
    min_n_ticks: usize,
    round_numbers: bool,
}

impl MaxNLocator {
    /// Locator with at most `nbins` intervals and the default steps.
    pub fn new(nbins: usize) -> Result<Self> {
        if nbins == 0 {
            return Err(AxisError::InvalidMaxTicks);
        }
        Ok(Self {
            nbins,
            extended_steps: staircase(&DEFAULT_STEPS),
            integer: false,
            min_n_ticks: 2,
            round_numbers: false,
        })
    }

    /// Replaces the preferred steps.
    ///
    /// Steps must increase strictly and lie within `[1, 10]`; 1 and 10 are
    /// added when missing.
    pub fn with_steps(mut self, steps: &[f64]) -> Result<Self> {
        let invalid = || AxisError::InvalidSteps(steps.to_vec());
        let (first, last) = match (steps.first(), steps.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(invalid()),
        };
        if first < 1.0 || last > 10.0 || steps.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(invalid());
        }
        let mut full = Vec::with_capacity(steps.len() + 2);
        if first != 1.0 {
            full.push(1.0);
        }
        full.extend_from_slice(steps);
        if last != 10.0 {
            full.push(10.0);
        }
        self.extended_steps = staircase(&full);
        Ok(self)
    }

    /// Restricts steps of one unit or more to whole numbers.
    pub fn with_integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    /// Minimum number of ticks that must fall inside the range.
    pub fn with_min_n_ticks(mut self, min_n_ticks: usize) -> Self {
        self.min_n_ticks = min_n_ticks.max(1);
        self
    }

    /// Also requires `nbins` steps from the floored lower bound to reach the
    /// upper bound, so the ticks can serve as round axis limits.
    pub fn with_round_numbers(mut self, round_numbers: bool) -> Self {
        self.round_numbers = round_numbers;
        self
    }

    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Ticks spanning `[vmin, vmax]`, ascending.
    pub fn tick_values<T: Float>(&self, vmin: T, vmax: T) -> Vec<T> {
        let (vmin, vmax) = nonsingular(vmin, vmax, constant(1e-13), constant(1e-14));
        let ticks = self.raw_ticks(vmin, vmax);
        if ticks.len() > MAX_TICKS {
            tracing::warn!(
                count = ticks.len(),
                "round-number locator generated more than {MAX_TICKS} ticks"
            );
        }
        ticks
    }

    fn raw_ticks<T: Float>(&self, vmin: T, vmax: T) -> Vec<T> {
        let nbins: T = constant(self.nbins as f64);
        let (scale, offset) = scale_range(vmin, vmax, nbins);
        let lo = vmin - offset;
        let hi = vmax - offset;

        let steps: Vec<T> = self
            .extended_steps
            .iter()
            .map(|&s| constant::<T>(s) * scale)
            .filter(|&s| !self.integer || s < T::one() || (s - s.round()).abs() < constant(0.001))
            .collect();
        if steps.is_empty() {
            return Vec::new();
        }

        let raw_step = (hi - lo) / nbins;
        let covers = |step: T| {
            step >= raw_step
                && (!self.round_numbers || div_mod_floor(lo, step).0 * step + step * nbins >= hi)
        };
        let istep = steps.iter().position(|&s| covers(s)).unwrap_or(steps.len() - 1);

        let min_n: T = constant(self.min_n_ticks as f64);
        let mut ticks = Vec::new();
        for &candidate in steps[..=istep].iter().rev() {
            let step = if self.integer && hi.floor() - lo.ceil() >= min_n - T::one() {
                candidate.max(T::one())
            } else {
                candidate
            };
            let best = div_mod_floor(lo, step).0 * step;
            let edge = Edge::new(step, offset);
            let low = edge.le(lo - best);
            let high = edge.ge(hi - best);

            ticks.clear();
            let mut k = low;
            while k <= high {
                ticks.push(k * step + best);
                k = k + T::one();
            }
            let inside = ticks.iter().filter(|&&t| t >= lo && t <= hi).count();
            if inside >= self.min_n_ticks {
                break;
            }
        }
        ticks.into_iter().map(|t| t + offset).collect()
    }
}

impl Locator for MaxNLocator {
    fn tick_values(&self, vmin: f64, vmax: f64) -> Result<Vec<f64>> {
        Ok(MaxNLocator::tick_values(self, vmin, vmax))
    }
}

fn staircase(steps: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = steps[..steps.len() - 1].iter().map(|s| 0.1 * s).collect();
    out.extend_from_slice(steps);
    out.push(10.0 * steps[1]);
    out
}

/// `(scale, offset)`: the power of ten matching `(vmax - vmin) / n`, and a
/// power-of-ten offset when the range sits far from zero.
fn scale_range<T: Float>(vmin: T, vmax: T, n: T) -> (T, T) {
    let ten: T = constant(10.0);
    let dv = (vmax - vmin).abs();
    let meanv = (vmax + vmin) / constant(2.0);
    let offset = if meanv.abs() / dv < constant(100.0) {
        T::zero()
    } else {
        ten.powf(meanv.abs().log10().floor()).copysign(meanv)
    };
    let scale = ten.powf((dv / n).log10().floor());
    (scale, offset)
}

/// Integer tick bounds with a tolerance that grows with the offset, so
/// rounding in `x - offset` does not add or drop an edge tick.
struct Edge<T> {
    step: T,
    tol: T,
}

impl<T: Float> Edge<T> {
    fn new(step: T, offset: T) -> Self {
        let offset = offset.abs();
        let tol = if offset > T::zero() {
            let digits = (offset / step).log10();
            constant::<T>(10.0)
                .powf(digits - constant(12.0))
                .max(constant(1e-10))
                .min(constant(0.4999))
        } else {
            constant(1e-10)
        };
        Self { step, tol }
    }

    fn close_to(&self, ms: T, edge: T) -> bool {
        (ms - edge).abs() < self.tol
    }

    /// Largest `n` with `n * step <= x`, within tolerance.
    fn le(&self, x: T) -> T {
        let (d, m) = div_mod_floor(x, self.step);
        if self.close_to(m / self.step, T::one()) {
            d + T::one()
        } else {
            d
        }
    }

    /// Smallest `n` with `n * step >= x`, within tolerance.
    fn ge(&self, x: T) -> T {
        let (d, m) = div_mod_floor(x, self.step);
        if self.close_to(m / self.step, T::zero()) {
            d
        } else {
            d + T::one()
        }
    }
}
