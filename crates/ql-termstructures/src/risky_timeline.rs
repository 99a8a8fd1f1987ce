//! Merges the pillar dates of a discount curve and a survival curve into the
//! sorted, deduplicated list of knots bounding each flat-forward segment of
//! an integral over `[start, end]`.
//!
//! Grounded on `JpmcdsRiskyTimeLine`: protection-leg and accrual-on-default
//! integrals are exact only within a single flat-forward segment of *both*
//! curves, so every curve knot inside the integration window becomes a
//! segment boundary.

use crate::flat_forward_curve::FlatForwardCurve;
use ql_time::Date;

/// Build the merged timeline for `[start, end]` from both curves' own
/// knots, always including `start` and `end` themselves.
pub fn risky_timeline(start: Date, end: Date, disc_curve: &FlatForwardCurve, spread_curve: &FlatForwardCurve) -> Vec<Date> {
    let mut dates: Vec<Date> = disc_curve
        .dates()
        .iter()
        .chain(spread_curve.dates().iter())
        .copied()
        .filter(|&d| d > start && d < end)
        .collect();
    dates.push(start);
    dates.push(end);
    dates.sort();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::CompoundingBasis;
    use ql_time::Actual365Fixed;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn curve(base: Date, points: Vec<(Date, f64)>) -> FlatForwardCurve {
        FlatForwardCurve::new(base, points, CompoundingBasis::Continuous, Actual365Fixed).unwrap()
    }

    #[test]
    fn merges_and_dedups_both_curves_knots() {
        let base = date(2020, 1, 1);
        let disc = curve(
            base,
            vec![(date(2020, 6, 1), 0.02), (date(2021, 1, 1), 0.021)],
        );
        let spread = curve(
            base,
            vec![(date(2020, 9, 1), 0.03), (date(2021, 1, 1), 0.031)],
        );
        let tl = risky_timeline(date(2020, 3, 20), date(2020, 12, 20), &disc, &spread);
        assert_eq!(
            tl,
            vec![
                date(2020, 3, 20),
                date(2020, 6, 1),
                date(2020, 9, 1),
                date(2020, 12, 20),
            ]
        );
    }

    #[test]
    fn always_includes_endpoints_even_with_no_interior_knots() {
        let base = date(2020, 1, 1);
        let disc = curve(base, vec![(date(2030, 1, 1), 0.02)]);
        let spread = curve(base, vec![(date(2030, 1, 1), 0.03)]);
        let tl = risky_timeline(date(2020, 3, 20), date(2020, 6, 20), &disc, &spread);
        assert_eq!(tl, vec![date(2020, 3, 20), date(2020, 6, 20)]);
    }
}
