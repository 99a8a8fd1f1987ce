//! `cleanSpreadCurveBootstrap` — calibrate a clean hazard-rate curve from a
//! strip of CDS par-spread quotes, with an optional benchmark mask.

use ql_core::errors::{Error, Result};
use ql_core::{CompoundingBasis, Real};
use ql_pricingengines::{bootstrap_hazard_curve, BootstrapInput};
use ql_termstructures::FlatForwardCurve;
use ql_time::cds_schedule::StubKind;
use ql_time::{Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, Period};
use std::sync::Arc;

/// Bootstrap a clean hazard-rate curve, optionally restricted to the
/// benchmarks flagged `true` in `includes` (all benchmarks if `None`),
/// converting the result to annual compounding on output.
#[allow(clippy::too_many_arguments)]
pub fn clean_spread_curve_bootstrap(
    today: Date,
    disc_curve: &FlatForwardCurve,
    start_date: Date,
    step_in_date: Date,
    cash_settle_date: Date,
    end_dates: &[Date],
    coupon_rates: &[Real],
    includes: Option<&[bool]>,
    recovery: Real,
    pay_acc_on_default: bool,
    interval: Period,
    payment_day_count: Arc<dyn DayCounter>,
    stub: StubKind,
    bad_day_convention: BusinessDayConvention,
    calendar: &dyn Calendar,
) -> Result<FlatForwardCurve> {
    let (filtered_ends, filtered_coupons) = match includes {
        Some(mask) => {
            if mask.len() != end_dates.len() {
                return Err(Error::InvalidArgument(
                    "bootstrap includes mask must match end_dates length".into(),
                ));
            }
            let ends: Vec<Date> = end_dates
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(&d, _)| d)
                .collect();
            let coupons: Vec<Real> = coupon_rates
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(&c, _)| c)
                .collect();
            (ends, coupons)
        }
        None => (end_dates.to_vec(), coupon_rates.to_vec()),
    };

    let input = BootstrapInput {
        today,
        disc_curve,
        start_date,
        step_in_date,
        cash_settle_date,
        end_dates: &filtered_ends,
        coupon_rates: &filtered_coupons,
        recovery_rate: recovery,
        pay_acc_on_default,
        coupon_interval: interval,
        payment_day_count,
        stub,
        calendar,
        bad_day_convention,
    };

    let cc_curve = bootstrap_hazard_curve(&input)?;
    cc_curve.convert_basis(CompoundingBasis::Periodic(1.0), Actual365Fixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::Real;
    use ql_time::{Actual360, TimeUnit, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat_curve(base: Date, rate: Real) -> FlatForwardCurve {
        FlatForwardCurve::new(
            base,
            vec![(base.advance(50, TimeUnit::Years).unwrap(), rate)],
            CompoundingBasis::Continuous,
            Actual365Fixed,
        )
        .unwrap()
    }

    #[test]
    fn includes_mask_drops_excluded_benchmarks() {
        let today = date(2009, 3, 20);
        let cal = WeekendsOnly;
        let disc = flat_curve(today, 0.03);
        let end_dates = vec![
            date(2009, 6, 20),
            date(2010, 6, 20),
            date(2012, 6, 20),
        ];
        let coupons = vec![0.01, 0.0125, 0.015];
        let mask = [true, false, true];

        let curve = clean_spread_curve_bootstrap(
            today,
            &disc,
            date(2008, 3, 20),
            today,
            today,
            &end_dates,
            &coupons,
            Some(&mask),
            0.40,
            true,
            Period::new(3, TimeUnit::Months),
            Arc::new(Actual360),
            StubKind::BackShort,
            BusinessDayConvention::Following,
            &cal,
        )
        .unwrap();

        assert_eq!(curve.dates().len(), 2);
        assert_eq!(curve.basis(), CompoundingBasis::Periodic(1.0));
    }

    #[test]
    fn near_zero_recovery_does_not_trip_negative_hazard_check() {
        let today = date(2009, 3, 20);
        let cal = WeekendsOnly;
        let disc = flat_curve(today, 0.03);
        let end_dates = vec![date(2010, 6, 20), date(2014, 6, 20)];
        let coupons = vec![0.02, 0.05];

        let curve = clean_spread_curve_bootstrap(
            today,
            &disc,
            date(2008, 3, 20),
            today,
            today,
            &end_dates,
            &coupons,
            None,
            0.01,
            true,
            Period::new(3, TimeUnit::Months),
            Arc::new(Actual360),
            StubKind::BackShort,
            BusinessDayConvention::Following,
            &cal,
        )
        .unwrap();

        let fwd = curve.forward_zero_price(end_dates[0], end_dates[1]);
        assert!(fwd < 1.0);
    }
}
