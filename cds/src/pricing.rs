//! `cdsPrice` / `cdsParSpreads` — single-name CDS pricing against an
//! explicit discount and survival curve.

use crate::schedule::build_periods;
use ql_cashflows::fee_leg::{AccrualPaymentConvention, FeeLeg};
use ql_core::errors::{Error, Result};
use ql_core::Real;
use ql_instruments::{ContingentLeg, ProtectionPayConvention};
use ql_pricingengines::ProtectionLegEngine;
use ql_termstructures::FlatForwardCurve;
use ql_time::cds_schedule::StubKind;
use ql_time::{BusinessDayConvention, Date, DayCounter, Period};

/// Per-unit-notional dirty or clean price of a single-name CDS.
///
/// `stepinDate` must not precede `today`. Protection always starts one day
/// before `startDate` (`protectStart` is always on, per the external
/// interface). Returns `0.0` exactly when `endDate < stepinDate` — the
/// contract has already matured from the step-in date's point of view.
#[allow(clippy::too_many_arguments)]
pub fn cds_price(
    today: Date,
    value_date: Date,
    step_in_date: Date,
    start_date: Date,
    end_date: Date,
    coupon_rate: Real,
    pay_acc_on_default: bool,
    interval: Period,
    stub: StubKind,
    payment_day_count: impl DayCounter + 'static,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
    disc_curve: &FlatForwardCurve,
    spread_curve: &FlatForwardCurve,
    recovery: Real,
    is_clean: bool,
) -> Result<Real> {
    if step_in_date < today {
        return Err(Error::InvalidArgument(
            "cds price: step-in date must not precede today".into(),
        ));
    }
    if end_date < step_in_date {
        return Ok(0.0);
    }

    let contingent_leg = ContingentLeg::new(
        start_date,
        end_date,
        1.0,
        ProtectionPayConvention::AtDefault,
        true,
    )?;
    let engine = ProtectionLegEngine {
        today,
        step_in_date,
        value_date,
        disc_curve: disc_curve.clone(),
        spread_curve: spread_curve.clone(),
        recovery_rate: recovery,
    };
    let pv_contingent = engine.price(&contingent_leg)?;

    let periods = build_periods(
        start_date,
        end_date,
        interval,
        stub,
        bad_day_convention,
        calendar_name,
    )?;
    let fee_leg = FeeLeg::new(
        periods,
        1.0,
        coupon_rate,
        payment_day_count,
        if pay_acc_on_default {
            AccrualPaymentConvention::All
        } else {
            AccrualPaymentConvention::None
        },
        true,
    )?;
    let pv_fee = fee_leg.pv(
        today,
        step_in_date,
        value_date,
        disc_curve,
        spread_curve,
        is_clean,
    )?;

    Ok(pv_contingent - pv_fee)
}

/// Fair (par) coupon for each of `end_dates`, against the given discount and
/// survival curves: `contingentLegPv / riskyAnnuity`, both computed with a
/// unit coupon.
#[allow(clippy::too_many_arguments)]
pub fn cds_par_spreads(
    today: Date,
    step_in_date: Date,
    start_date: Date,
    end_dates: &[Date],
    pay_acc_on_default: bool,
    interval: Period,
    stub: StubKind,
    payment_day_count: impl DayCounter + Copy + 'static,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
    disc_curve: &FlatForwardCurve,
    spread_curve: &FlatForwardCurve,
    recovery: Real,
) -> Result<Vec<Real>> {
    let mut spreads = Vec::with_capacity(end_dates.len());
    for &end_date in end_dates {
        let contingent_leg = ContingentLeg::new(
            start_date,
            end_date,
            1.0,
            ProtectionPayConvention::AtDefault,
            true,
        )?;
        let engine = ProtectionLegEngine {
            today,
            step_in_date,
            value_date: today,
            disc_curve: disc_curve.clone(),
            spread_curve: spread_curve.clone(),
            recovery_rate: recovery,
        };
        let pv_contingent = engine.price(&contingent_leg)?;

        let periods = build_periods(
            start_date,
            end_date,
            interval,
            stub,
            bad_day_convention,
            calendar_name,
        )?;
        let annuity_leg = FeeLeg::new(
            periods,
            1.0,
            1.0,
            payment_day_count,
            if pay_acc_on_default {
                AccrualPaymentConvention::All
            } else {
                AccrualPaymentConvention::None
            },
            true,
        )?;
        let annuity = annuity_leg.pv(today, step_in_date, today, disc_curve, spread_curve, true)?;

        spreads.push(pv_contingent / annuity);
    }
    Ok(spreads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::CompoundingBasis;
    use ql_time::{Actual360, Actual365Fixed, TimeUnit};

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
    fn zero_price_when_end_date_before_step_in() {
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let price = cds_price(
            today,
            today,
            date(2020, 6, 1),
            date(2008, 3, 20),
            date(2013, 3, 20),
            0.01,
            true,
            Period::new(3, TimeUnit::Months),
            StubKind::BackShort,
            Actual360,
            BusinessDayConvention::Following,
            "WeekendsOnly",
            &disc,
            &spread,
            0.4,
            true,
        )
        .unwrap();
        assert_eq!(price, 0.0);
    }

    #[test]
    fn rejects_step_in_before_today() {
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let err = cds_price(
            today,
            today,
            date(2019, 1, 1),
            date(2008, 3, 20),
            date(2013, 3, 20),
            0.01,
            true,
            Period::new(3, TimeUnit::Months),
            StubKind::BackShort,
            Actual360,
            BusinessDayConvention::Following,
            "WeekendsOnly",
            &disc,
            &spread,
            0.4,
            true,
        );
        assert!(err.is_err());
    }

    #[test]
    fn par_spread_matches_flat_hazard_times_loss() {
        let today = date(2008, 3, 20);
        let disc = flat_curve(today, 0.02);
        let h = 0.0300;
        let spread = flat_curve(today, h);
        let end_dates = vec![date(2013, 3, 20)];
        let spreads = cds_par_spreads(
            today,
            today,
            today,
            &end_dates,
            true,
            Period::new(3, TimeUnit::Months),
            StubKind::NoStub,
            Actual360,
            BusinessDayConvention::Following,
            "WeekendsOnly",
            &disc,
            &spread,
            0.40,
        )
        .unwrap();
        let expected = h * (1.0 - 0.40);
        assert!((spreads[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn bootstrapped_curve_reprices_each_benchmark_to_zero() {
        use crate::bootstrap::clean_spread_curve_bootstrap;
        use ql_time::WeekendsOnly;
        use std::sync::Arc;

        let today = date(2009, 3, 20);
        let disc = FlatForwardCurve::new(
            today,
            vec![(date(2009, 3, 20), 0.03), (date(2019, 3, 20), 0.03)],
            CompoundingBasis::Periodic(1.0),
            Actual365Fixed,
        )
        .unwrap();
        let start_date = date(2008, 3, 20);
        let end_dates = vec![
            date(2009, 6, 20),
            date(2010, 6, 20),
            date(2012, 6, 20),
            date(2014, 6, 20),
            date(2019, 6, 20),
        ];
        let coupon_rates = vec![0.01, 0.0125, 0.015, 0.0175, 0.02];
        let recovery = 0.40;
        let cal = WeekendsOnly;

        let spread = clean_spread_curve_bootstrap(
            today,
            &disc,
            start_date,
            today,
            today,
            &end_dates,
            &coupon_rates,
            None,
            recovery,
            true,
            Period::new(3, TimeUnit::Months),
            Arc::new(Actual360),
            StubKind::BackShort,
            BusinessDayConvention::Following,
            &cal,
        )
        .unwrap();

        for (&end_date, &coupon) in end_dates.iter().zip(&coupon_rates) {
            let price = cds_price(
                today,
                today,
                today,
                start_date,
                end_date,
                coupon,
                true,
                Period::new(3, TimeUnit::Months),
                StubKind::BackShort,
                Actual360,
                BusinessDayConvention::Following,
                "WeekendsOnly",
                &disc,
                &spread,
                recovery,
                true,
            )
            .unwrap();
            assert!(price.abs() < 1e-8, "benchmark {end_date} repriced to {price}");
        }
    }

    #[test]
    fn protect_start_one_day_matches_closed_form() {
        let today = date(2020, 1, 1);
        let step_in_date = today;
        let end_date = today.advance(1, TimeUnit::Days).unwrap();
        let disc = flat_curve(today, 0.02);
        let h = 0.03;
        let spread = flat_curve(today, h);
        let recovery = 0.40;

        // The one-day residual window this scenario describes is exercised
        // directly against the protection and fee engines, matching the
        // closed-form relationship without routing through a full coupon
        // schedule.
        let contingent_leg = ContingentLeg::new(
            today,
            end_date,
            1.0,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        let engine = ProtectionLegEngine {
            today,
            step_in_date,
            value_date: today,
            disc_curve: disc.clone(),
            spread_curve: spread.clone(),
            recovery_rate: recovery,
        };
        let pv_contingent = engine.price(&contingent_leg).unwrap();
        let z = disc.zero_price(end_date);
        let s = spread.zero_price(end_date);
        let expected_contingent = (1.0 - recovery) * (1.0 - s) * z;
        assert!((pv_contingent - expected_contingent).abs() < 1e-6);

        use ql_cashflows::fee_leg::AccrualPeriod;
        let fee_leg = FeeLeg::new(
            vec![AccrualPeriod {
                accrual_start: today,
                accrual_end: end_date,
                pay_date: end_date,
            }],
            1.0,
            0.01,
            Actual360,
            AccrualPaymentConvention::None,
            true,
        )
        .unwrap();
        let pv_fee = fee_leg
            .pv(today, step_in_date, today, &disc, &spread, true)
            .unwrap();
        let expected_fee = 0.01 * (1.0 / 360.0) * z;
        assert!((pv_fee - expected_fee).abs() < 1e-6);
    }
}
