//! `FlatForwardCurve` — a piecewise flat-forward curve of (date, rate)
//! knots under an explicit compounding basis and day count, usable as
//! either a discount curve or a survival/hazard curve.

use ql_core::errors::{Error, Result};
use ql_core::{ensure_curve, CompoundingBasis};
use ql_time::{Actual365Fixed, Date, DayCounter};
use std::sync::Arc;

/// An immutable piecewise flat-forward curve: `baseDate`, a compounding
/// `basis`, a `dayCount`, and an ordered sequence of `(date, rate)` knots
/// with strictly increasing dates.
///
/// Every stored rate, interpreted under `(baseDate, basis, dayCount)`,
/// implies a strictly positive discount factor — enforced at construction.
/// Zero rates outside `[firstDate, lastDate]` are extrapolated flat.
/// Immutable once built: the bootstrap produces a new curve rather than
/// mutating this one.
#[derive(Debug, Clone)]
pub struct FlatForwardCurve {
    base_date: Date,
    basis: CompoundingBasis,
    day_count: Arc<dyn DayCounter>,
    dates: Vec<Date>,
    rates: Vec<f64>,
    /// Continuously-compounded rate at each knot, expressed against
    /// Actual/365 (Fixed) time from `base_date`. Cached at construction so
    /// interpolation (which always operates in ACT/365F time per spec) does
    /// not redo the basis conversion on every lookup.
    cc_rates_act365: Vec<f64>,
    times_act365: Vec<f64>,
}

impl FlatForwardCurve {
    /// Build a curve from explicit knots.
    ///
    /// # Errors
    /// `CurveDefective` if there are no knots, if dates are not strictly
    /// increasing, or if any knot implies a non-positive discount factor.
    pub fn new(
        base_date: Date,
        points: Vec<(Date, f64)>,
        basis: CompoundingBasis,
        day_count: impl DayCounter + 'static,
    ) -> Result<Self> {
        Self::new_with_arc_day_count(base_date, points, basis, Arc::new(day_count))
    }

    /// The curve's base (reference) date.
    pub fn base_date(&self) -> Date {
        self.base_date
    }

    /// The compounding basis of the stored rates.
    pub fn basis(&self) -> CompoundingBasis {
        self.basis
    }

    /// The day counter applied to the stored rates.
    pub fn day_count(&self) -> &dyn DayCounter {
        &*self.day_count
    }

    /// The knot dates, in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The knot rates, parallel to [`dates`][Self::dates].
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Binary search for `date` among the knot dates.
    ///
    /// Returns `(exact, lo, hi)`: `exact` is true when `date` matches a
    /// knot exactly (in which case `lo == hi`); otherwise `lo`/`hi` bracket
    /// `date` (clamped to the first/last index at the boundaries).
    fn locate(&self, date: Date) -> (bool, usize, usize) {
        match self.dates.binary_search(&date) {
            Ok(i) => (true, i, i),
            Err(0) => (false, 0, 0),
            Err(i) if i >= self.dates.len() => (false, self.dates.len() - 1, self.dates.len() - 1),
            Err(i) => (false, i - 1, i),
        }
    }

    /// The discount factor to `date`, under flat-forward interpolation on
    /// continuously-compounded rates measured in ACT/365F time.
    ///
    /// Returns `1.0` at `date == base_date`. Dates before the first knot use
    /// the first knot's continuous rate, held flat. Dates after the last
    /// knot extrapolate the forward rate implied by the last two knots (or,
    /// with a single knot, hold that knot's rate flat).
    pub fn zero_price(&self, date: Date) -> f64 {
        if date == self.base_date {
            return 1.0;
        }
        let t = Actual365Fixed.year_fraction(self.base_date, date);
        if t == 0.0 {
            return 1.0;
        }

        let n = self.dates.len();
        let (exact, lo, hi) = self.locate(date);

        let rt = if exact {
            self.cc_rates_act365[lo] * self.times_act365[lo]
        } else if date < self.dates[0] {
            // Flat extrapolation before the first knot.
            self.cc_rates_act365[0] * t
        } else if date > self.dates[n - 1] {
            if n >= 2 {
                let t1 = self.times_act365[n - 2];
                let t2 = self.times_act365[n - 1];
                let r1 = self.cc_rates_act365[n - 2];
                let r2 = self.cc_rates_act365[n - 1];
                let fwd = if t2 > t1 {
                    (r2 * t2 - r1 * t1) / (t2 - t1)
                } else {
                    r2
                };
                r2 * t2 + fwd * (t - t2)
            } else {
                self.cc_rates_act365[0] * t
            }
        } else {
            let t1 = self.times_act365[lo];
            let t2 = self.times_act365[hi];
            let r1 = self.cc_rates_act365[lo];
            let r2 = self.cc_rates_act365[hi];
            if t2 > t1 {
                r1 * t1 + (r2 * t2 - r1 * t1) * (t - t1) / (t2 - t1)
            } else {
                r1 * t1
            }
        };

        (-rt).exp()
    }

    /// `zeroPrice(end) / zeroPrice(start)`.
    pub fn forward_zero_price(&self, start: Date, end: Date) -> f64 {
        self.zero_price(end) / self.zero_price(start)
    }

    /// Convert this curve to a new compounding basis and day count,
    /// preserving every knot's discount factor exactly (segment-by-segment
    /// conversion, not a re-interpolation).
    pub fn convert_basis(
        &self,
        new_basis: CompoundingBasis,
        new_day_count: impl DayCounter + 'static,
    ) -> Result<Self> {
        let new_day_count = Arc::new(new_day_count);
        let mut points = Vec::with_capacity(self.dates.len());
        for (i, &date) in self.dates.iter().enumerate() {
            let df = (-self.cc_rates_act365[i] * self.times_act365[i]).exp();
            let t_new = new_day_count.year_fraction(self.base_date, date);
            let rate = new_basis.rate_from_discount_factor(df, t_new);
            points.push((date, rate));
        }
        Self::new_with_arc_day_count(self.base_date, points, new_basis, new_day_count)
    }

    fn new_with_arc_day_count(
        base_date: Date,
        points: Vec<(Date, f64)>,
        basis: CompoundingBasis,
        day_count: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        ensure_curve!(!points.is_empty(), "curve must have at least one point");
        for w in points.windows(2) {
            ensure_curve!(
                w[0].0 < w[1].0,
                "curve dates must be strictly increasing, got {} then {}",
                w[0].0,
                w[1].0
            );
        }

        let act365 = Actual365Fixed;
        let mut dates = Vec::with_capacity(points.len());
        let mut rates = Vec::with_capacity(points.len());
        let mut cc_rates_act365 = Vec::with_capacity(points.len());
        let mut times_act365 = Vec::with_capacity(points.len());

        for (date, rate) in points {
            let t = day_count.year_fraction(base_date, date);
            let df = basis.discount_factor(rate, t);
            ensure_curve!(
                df > 0.0,
                "rate {rate} at {date} implies a non-positive discount factor {df}"
            );
            let t365 = act365.year_fraction(base_date, date);
            let cc = if t365 > 0.0 { -df.ln() / t365 } else { 0.0 };

            dates.push(date);
            rates.push(rate);
            cc_rates_act365.push(cc);
            times_act365.push(t365);
        }

        Ok(Self {
            base_date,
            basis,
            day_count,
            dates,
            rates,
            cc_rates_act365,
            times_act365,
        })
    }
}
