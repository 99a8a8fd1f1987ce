//! Clean hazard-rate curve bootstrap from a strip of CDS par-spread quotes.
//!
//! Grounded on `cdsbootstrap.c`'s `JpmcdsCleanSpreadCurve`/`CdsBootstrap`:
//! sequentially solves each benchmark's clean hazard-rate pillar so that its
//! own contingent and fee legs net to zero, given every pillar already
//! solved for earlier (shorter) maturities. The curve is built and
//! bootstrapped in the continuously-compounded, ACT/365F basis, then
//! converted to annual compounding for external use.

use crate::protection_leg_engine::ProtectionLegEngine;
use ql_cashflows::fee_leg::{AccrualPaymentConvention, AccrualPeriod, FeeLeg};
use ql_core::errors::{Error, Result};
use ql_core::{ensure_curve, CompoundingBasis, Real};
use ql_instruments::{ContingentLeg, ProtectionPayConvention};
use ql_math::solvers1d::solve_with_guess;
use ql_termstructures::FlatForwardCurve;
use ql_time::{Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter};
use ql_time::cds_schedule::{CdsSchedule, StubKind};
use std::sync::Arc;

/// Inputs for bootstrapping a clean hazard-rate curve from a strip of CDS
/// benchmarks, all sharing the same recovery, accrual conventions, and
/// schedule parameters.
#[allow(clippy::too_many_arguments)]
pub struct BootstrapInput<'a> {
    pub today: Date,
    pub disc_curve: &'a FlatForwardCurve,
    pub start_date: Date,
    pub step_in_date: Date,
    pub cash_settle_date: Date,
    pub end_dates: &'a [Date],
    pub coupon_rates: &'a [Real],
    pub recovery_rate: Real,
    pub pay_acc_on_default: bool,
    pub coupon_interval: ql_time::Period,
    pub payment_day_count: Arc<dyn DayCounter>,
    pub stub: StubKind,
    pub calendar: &'a dyn Calendar,
    pub bad_day_convention: BusinessDayConvention,
}

/// Bootstrap the clean hazard-rate curve: one knot per benchmark maturity,
/// continuously compounded against ACT/365F.
pub fn bootstrap_hazard_curve(input: &BootstrapInput) -> Result<FlatForwardCurve> {
    ensure_curve!(!input.end_dates.is_empty(), "bootstrap requires at least one benchmark");
    ensure_curve!(
        input.end_dates.len() == input.coupon_rates.len(),
        "bootstrap end_dates and coupon_rates must have matching length"
    );
    for w in input.end_dates.windows(2) {
        ensure_curve!(w[0] < w[1], "bootstrap benchmark maturities must be strictly increasing");
    }

    let mut points: Vec<(Date, Real)> = Vec::with_capacity(input.end_dates.len());
    let accrual_start = if input.today > input.start_date { input.today } else { input.start_date };

    for (i, (&end_date, &coupon_rate)) in input.end_dates.iter().zip(input.coupon_rates).enumerate() {
        let guess = coupon_rate / (1.0 - input.recovery_rate);

        let contingent_leg = ContingentLeg::new(
            accrual_start,
            end_date,
            1.0,
            ProtectionPayConvention::AtDefault,
            true,
        )?;

        let fee_periods = build_accrual_periods(
            input.start_date,
            end_date,
            input.coupon_interval,
            input.stub,
            input.calendar,
            input.bad_day_convention,
        )?;

        let objective = |h: Real| -> Real {
            let mut trial = points.clone();
            trial.push((end_date, h));
            let trial_curve = match FlatForwardCurve::new(
                input.today,
                trial,
                CompoundingBasis::Continuous,
                Actual365Fixed,
            ) {
                Ok(c) => c,
                Err(_) => return Real::NAN,
            };

            let pv_contingent = ProtectionLegEngine {
                today: input.today,
                step_in_date: input.step_in_date,
                value_date: input.cash_settle_date,
                disc_curve: input.disc_curve.clone(),
                spread_curve: trial_curve.clone(),
                recovery_rate: input.recovery_rate,
            }
            .price(&contingent_leg)
            .unwrap_or(Real::NAN);

            let fee_leg = match FeeLeg::new_with_arc_day_count(
                fee_periods.clone(),
                1.0,
                coupon_rate,
                input.payment_day_count.clone(),
                if input.pay_acc_on_default {
                    AccrualPaymentConvention::All
                } else {
                    AccrualPaymentConvention::None
                },
                true,
            ) {
                Ok(f) => f,
                Err(_) => return Real::NAN,
            };

            let pv_fee = fee_leg
                .pv(
                    input.today,
                    input.step_in_date,
                    input.cash_settle_date,
                    input.disc_curve,
                    &trial_curve,
                    true,
                )
                .unwrap_or(Real::NAN);

            pv_contingent - pv_fee
        };

        let spread = solve_with_guess(objective, guess, 0.0005, 0.0, 1e10, 1e-10, 1e-10, 100)
            .map_err(|_| Error::NumericalFailure(format!("could not calibrate CDS maturity {end_date}")))?;

        points.push((end_date, spread));

        if i > 0 {
            let curve = FlatForwardCurve::new(
                input.today,
                points.clone(),
                CompoundingBasis::Continuous,
                Actual365Fixed,
            )?;
            let fwd = curve.forward_zero_price(input.end_dates[i - 1], end_date);
            ensure_curve!(
                fwd <= 1.0,
                "negative forward hazard rate at maturity {end_date} with spread {spread}"
            );
        }
    }

    FlatForwardCurve::new(input.today, points, CompoundingBasis::Continuous, Actual365Fixed)
}

fn build_accrual_periods(
    start_date: Date,
    end_date: Date,
    interval: ql_time::Period,
    stub: StubKind,
    calendar: &dyn Calendar,
    bad_day_convention: BusinessDayConvention,
) -> Result<Vec<AccrualPeriod>> {
    let schedule = CdsSchedule::build(
        start_date,
        end_date,
        interval,
        stub,
        calendar,
        BusinessDayConvention::Unadjusted,
        calendar,
        bad_day_convention,
    )?;

    let mut periods = Vec::with_capacity(schedule.num_periods());
    for i in 0..schedule.num_periods() {
        let (accrual_start, accrual_end, pay_date) = schedule.period(i);
        periods.push(AccrualPeriod {
            accrual_start,
            accrual_end,
            pay_date,
        });
    }
    Ok(periods)
}
