//! `ProtectionLegEngine` — prices the protection (contingent) leg of a
//! single-name CDS.
//!
//! Grounded on `contingentleg.c`'s `JpmcdsContingentLegPV`: integrates
//! `loss(t) . Z(t) . dS/dt` over the protection period, assuming flat
//! forwards between the merged knots of the discount and survival curves.
//! Both payment timings named by [`ProtectionPayConvention`] are supported:
//! `AtDefault` pays the loss at the moment of default, `AtMaturity` defers
//! payment of any accumulated loss to the leg's end date.

use ql_core::errors::{Error, Result};
use ql_core::Real;
use ql_instruments::{ContingentLeg, ProtectionPayConvention};
use ql_instruments::{PricingEngine, PricingResults};
use ql_termstructures::{risky_timeline, FlatForwardCurve};
use ql_time::Date;

/// Threshold below which the exact integrand is replaced by its Taylor
/// expansion to avoid cancellation noise in the `1/(λ+f)` term.
const TAYLOR_THRESHOLD: Real = 1e-4;
const DENOMINATOR_FLOOR: Real = 1e-50;

/// Prices a [`ContingentLeg`] against a discount curve, a survival curve,
/// and a flat recovery rate.
#[derive(Debug)]
pub struct ProtectionLegEngine {
    pub today: Date,
    pub step_in_date: Date,
    pub value_date: Date,
    pub disc_curve: FlatForwardCurve,
    pub spread_curve: FlatForwardCurve,
    pub recovery_rate: Real,
}

/// Arguments consumed by [`ProtectionLegEngine::calculate`].
#[derive(Debug, Clone, Copy)]
pub struct ProtectionLegArgs<'a> {
    pub leg: &'a ContingentLeg,
}

impl ProtectionLegEngine {
    fn effective_start(&self, leg: &ContingentLeg) -> Date {
        let offset = if leg.protect_start { 1 } else { 0 };
        let a = max_date(leg.start_date, self.step_in_date.add_days(-offset).unwrap_or(self.step_in_date));
        max_date(a, self.today.add_days(-offset).unwrap_or(self.today))
    }

    /// The protection leg's PV as seen from `value_date`.
    pub fn price(&self, leg: &ContingentLeg) -> Result<Real> {
        let start = self.effective_start(leg);

        let leg_pv = match leg.pay_convention {
            ProtectionPayConvention::AtMaturity => one_period_integral_at_pay_date(
                self.today,
                start,
                leg.end_date,
                leg.end_date,
                &self.disc_curve,
                &self.spread_curve,
                self.recovery_rate,
            )?,
            ProtectionPayConvention::AtDefault => one_period_integral(
                self.today,
                start,
                leg.end_date,
                &self.disc_curve,
                &self.spread_curve,
                self.recovery_rate,
            )?,
        };

        let value_date_df = self.disc_curve.forward_zero_price(self.today, self.value_date);
        Ok(leg_pv * leg.notional / value_date_df)
    }
}

impl<'a> PricingEngine<ProtectionLegArgs<'a>> for ProtectionLegEngine {
    fn calculate(&self, args: &ProtectionLegArgs<'a>) -> Result<PricingResults> {
        let npv = self.price(args.leg)?;
        Ok(PricingResults::from_npv(npv))
    }
}

fn max_date(a: Date, b: Date) -> Date {
    if a > b {
        a
    } else {
        b
    }
}

fn one_period_integral(
    today: Date,
    start_date: Date,
    end_date: Date,
    disc_curve: &FlatForwardCurve,
    spread_curve: &FlatForwardCurve,
    recovery_rate: Real,
) -> Result<Real> {
    if end_date <= start_date {
        return Err(Error::InvalidArgument(
            "protection leg end date must be after start date".into(),
        ));
    }
    if today > end_date {
        return Ok(0.0);
    }

    let timeline = risky_timeline(start_date, end_date, disc_curve, spread_curve);
    let loss = 1.0 - recovery_rate;

    let settle_ref = if today > start_date { today } else { start_date };
    let mut s1 = spread_curve.forward_zero_price(today, start_date);
    let mut df1 = disc_curve.forward_zero_price(today, settle_ref);

    let mut pv = 0.0;
    for w in timeline.windows(2) {
        let d1 = w[1];
        let s0 = s1;
        let df0 = df1;
        s1 = spread_curve.forward_zero_price(today, d1);
        df1 = disc_curve.forward_zero_price(today, d1);

        let lambda = s0.ln() - s1.ln();
        let fwd_rate = df0.ln() - df1.ln();
        let m = lambda + fwd_rate + DENOMINATOR_FLOOR;

        let this_pv = if m.abs() > TAYLOR_THRESHOLD {
            loss * lambda / m * (1.0 - (-m).exp()) * s0 * df0
        } else {
            let p0 = loss * lambda * s0 * df0;
            let p1 = -p0 * m * 0.5;
            let p2 = -p1 * m / 3.0;
            let p3 = -p2 * m * 0.25;
            let p4 = -p3 * m * 0.2;
            p0 + p1 + p2 + p3 + p4
        };

        pv += this_pv;
    }

    Ok(pv)
}

fn one_period_integral_at_pay_date(
    today: Date,
    start_date: Date,
    end_date: Date,
    pay_date: Date,
    disc_curve: &FlatForwardCurve,
    spread_curve: &FlatForwardCurve,
    recovery_rate: Real,
) -> Result<Real> {
    if end_date <= start_date {
        return Err(Error::InvalidArgument(
            "protection leg end date must be after start date".into(),
        ));
    }
    if today > end_date {
        return Ok(0.0);
    }

    let s0 = spread_curve.forward_zero_price(today, start_date);
    let s1 = spread_curve.forward_zero_price(today, end_date);
    let df = disc_curve.forward_zero_price(today, pay_date);
    let loss = 1.0 - recovery_rate;
    Ok((s0 - s1) * df * loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::CompoundingBasis;
    use ql_instruments::ProtectionPayConvention;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat_curve(base: Date, rate: Real) -> FlatForwardCurve {
        FlatForwardCurve::new(
            base,
            vec![(base.advance(50, ql_time::TimeUnit::Years).unwrap(), rate)],
            CompoundingBasis::Continuous,
            ql_time::Actual365Fixed,
        )
        .unwrap()
    }

    fn engine(today: Date, disc_rate: Real, hazard_rate: Real) -> ProtectionLegEngine {
        ProtectionLegEngine {
            today,
            step_in_date: today,
            value_date: today,
            disc_curve: flat_curve(today, disc_rate),
            spread_curve: flat_curve(today, hazard_rate),
            recovery_rate: 0.4,
        }
    }

    #[test]
    fn at_default_pv_is_positive_and_less_than_notional() {
        let today = date(2020, 1, 1);
        let leg = ContingentLeg::new(
            today,
            date(2025, 1, 1),
            1.0e7,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        let pv = engine(today, 0.02, 0.03).price(&leg).unwrap();
        assert!(pv > 0.0);
        assert!(pv < 1.0e7 * 0.6);
    }

    #[test]
    fn at_maturity_pv_is_smaller_than_at_default_for_same_inputs() {
        let today = date(2020, 1, 1);
        let leg_default = ContingentLeg::new(
            today,
            date(2025, 1, 1),
            1.0e7,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        let leg_maturity = ContingentLeg::new(
            today,
            date(2025, 1, 1),
            1.0e7,
            ProtectionPayConvention::AtMaturity,
            true,
        )
        .unwrap();
        let eng = engine(today, 0.02, 0.03);
        let pv_default = eng.price(&leg_default).unwrap();
        let pv_maturity = eng.price(&leg_maturity).unwrap();
        assert!(pv_maturity < pv_default);
        assert!(pv_maturity > 0.0);
    }

    #[test]
    fn zero_recovery_increases_pv_over_partial_recovery() {
        let today = date(2020, 1, 1);
        let leg = ContingentLeg::new(
            today,
            date(2025, 1, 1),
            1.0e7,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        let mut eng = engine(today, 0.02, 0.03);
        let pv_partial = eng.price(&leg).unwrap();
        eng.recovery_rate = 0.0;
        let pv_zero = eng.price(&leg).unwrap();
        assert!(pv_zero > pv_partial);
    }

    #[test]
    fn near_maturity_step_in_shrinks_the_integration_window() {
        let today = date(2020, 1, 1);
        let leg = ContingentLeg::new(
            today,
            date(2020, 7, 1),
            1.0e7,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        let mut eng = engine(today, 0.02, 0.03);
        let pv_full = eng.price(&leg).unwrap();
        eng.step_in_date = date(2020, 6, 1);
        let pv_stepped_in = eng.price(&leg).unwrap();
        assert!(pv_stepped_in < pv_full);
        assert!(pv_stepped_in > 0.0);
    }
}
