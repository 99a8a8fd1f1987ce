//! `makeCurve` — construct a piecewise flat-forward curve from explicit
//! `(date, rate)` knots.

use ql_core::errors::Result;
use ql_core::{CompoundingBasis, Real};
use ql_termstructures::FlatForwardCurve;
use ql_time::{Date, DayCounter};

/// Build a [`FlatForwardCurve`] from `points`, validating strictly
/// increasing dates and strictly positive implied discount factors.
///
/// # Errors
/// `CurveDefective` if `points` is empty, its dates are not strictly
/// increasing, or any knot implies a non-positive discount factor.
pub fn make_curve(
    base_date: Date,
    points: Vec<(Date, Real)>,
    basis: CompoundingBasis,
    day_count: impl DayCounter + 'static,
) -> Result<FlatForwardCurve> {
    FlatForwardCurve::new(base_date, points, basis, day_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_time::{Actual365Fixed, TimeUnit};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn builds_a_valid_curve() {
        let base = date(2020, 1, 1);
        let curve = make_curve(
            base,
            vec![(base.advance(5, TimeUnit::Years).unwrap(), 0.03)],
            CompoundingBasis::Continuous,
            Actual365Fixed,
        )
        .unwrap();
        assert_eq!(curve.base_date(), base);
    }

    #[test]
    fn rejects_unsorted_dates() {
        let base = date(2020, 1, 1);
        let err = make_curve(
            base,
            vec![
                (date(2025, 1, 1), 0.03),
                (date(2023, 1, 1), 0.02),
            ],
            CompoundingBasis::Continuous,
            Actual365Fixed,
        );
        assert!(err.is_err());
    }
}
