//! `FeeLeg` — the premium (fee) leg of a credit default swap.
//!
//! Grounded on `feeleg.c`'s `TFeeLeg`/`JpmcdsFeeLegPV`/`JpmcdsFeeLegFlows`:
//! a fee leg is a list of accrual periods, each paying a fixed coupon if it
//! survives to the period's end, plus an optional accrual-on-default
//! component for the period during which default actually occurs.

use crate::accrual_on_default::accrual_on_default_pv;
use crate::cashflow::{CashFlow, Leg, SimpleCashFlow};
use ql_core::errors::{Error, Result};
use ql_core::Real;
use ql_termstructures::{risky_timeline, FlatForwardCurve};
use ql_time::{Date, DayCounter};
use std::sync::Arc;

/// How the fee leg treats accrued interest on the defaulting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccrualPaymentConvention {
    /// Pay nothing for the period during which default occurs; the fee
    /// leg only pays coupons for periods that survive to their end.
    None,
    /// Pay the accrual owed up to the moment of default.
    All,
}

/// One accrual period of a fee leg: the interval over which the coupon
/// accrues, and the date on which it is paid if the period survives.
#[derive(Debug, Clone, Copy)]
pub struct AccrualPeriod {
    pub accrual_start: Date,
    pub accrual_end: Date,
    pub pay_date: Date,
}

/// The fee (premium) leg of a single-name CDS.
#[derive(Debug, Clone)]
pub struct FeeLeg {
    periods: Vec<AccrualPeriod>,
    notional: Real,
    coupon_rate: Real,
    day_count: Arc<dyn DayCounter>,
    accrual_pay_convention: AccrualPaymentConvention,
    /// Whether survival is observed at the start of day (shifts the
    /// survival-probability lookup back by one day, per `obsStartOfDay`).
    obs_start_of_day: bool,
}

impl FeeLeg {
    pub fn new(
        periods: Vec<AccrualPeriod>,
        notional: Real,
        coupon_rate: Real,
        day_count: impl DayCounter + 'static,
        accrual_pay_convention: AccrualPaymentConvention,
        obs_start_of_day: bool,
    ) -> Result<Self> {
        Self::new_with_arc_day_count(
            periods,
            notional,
            coupon_rate,
            Arc::new(day_count),
            accrual_pay_convention,
            obs_start_of_day,
        )
    }

    /// As [`FeeLeg::new`], but for callers that already hold their day
    /// counter behind an `Arc` (e.g. a bootstrap loop rebuilding a fee leg
    /// against a caller-supplied convention on every solver iteration).
    pub fn new_with_arc_day_count(
        periods: Vec<AccrualPeriod>,
        notional: Real,
        coupon_rate: Real,
        day_count: Arc<dyn DayCounter>,
        accrual_pay_convention: AccrualPaymentConvention,
        obs_start_of_day: bool,
    ) -> Result<Self> {
        if periods.is_empty() {
            return Err(Error::InvalidArgument(
                "fee leg must have at least one accrual period".into(),
            ));
        }
        for p in &periods {
            if p.accrual_end <= p.accrual_start {
                return Err(Error::InvalidArgument(
                    "fee leg accrual period end must be after start".into(),
                ));
            }
        }
        Ok(Self {
            periods,
            notional,
            coupon_rate,
            day_count,
            accrual_pay_convention,
            obs_start_of_day,
        })
    }

    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    fn obs_offset(&self) -> i32 {
        if self.obs_start_of_day {
            -1
        } else {
            0
        }
    }

    /// PV (as seen from `value_date`) of the fee leg, including
    /// accrual-on-default if configured, optionally net of accrued
    /// interest for a clean price.
    pub fn pv(
        &self,
        today: Date,
        step_in_date: Date,
        value_date: Date,
        disc_curve: &FlatForwardCurve,
        spread_curve: &FlatForwardCurve,
        clean_price: bool,
    ) -> Result<Real> {
        if value_date < today {
            return Err(Error::InvalidArgument(
                "fee leg value date must not precede today".into(),
            ));
        }
        if step_in_date < today {
            return Err(Error::InvalidArgument(
                "fee leg step-in date must not precede today".into(),
            ));
        }

        let last = self.periods.len() - 1;
        let mat_date = if self.obs_start_of_day {
            self.periods[last]
                .accrual_end
                .add_days(-1)
                .unwrap_or(self.periods[last].accrual_end)
        } else {
            self.periods[last].accrual_end
        };
        if today > mat_date || step_in_date > mat_date {
            return Ok(0.0);
        }

        let timeline = self.full_timeline(disc_curve, spread_curve);

        let mut pv = 0.0;
        for period in &self.periods {
            pv += self.period_pv(
                today,
                step_in_date,
                period,
                disc_curve,
                spread_curve,
                &timeline,
            )?;
        }

        let value_date_df = disc_curve.forward_zero_price(today, value_date);
        let mut pv = pv / value_date_df;

        if clean_price {
            pv -= self.accrued_interest(step_in_date);
        }

        Ok(pv)
    }

    fn period_pv(
        &self,
        today: Date,
        step_in_date: Date,
        period: &AccrualPeriod,
        disc_curve: &FlatForwardCurve,
        spread_curve: &FlatForwardCurve,
        timeline: &[Date],
    ) -> Result<Real> {
        if period.accrual_end <= step_in_date {
            return Ok(0.0);
        }

        let obs_offset = self.obs_offset();
        let survival_date = period.accrual_end.add_days(obs_offset)?;

        let acc_time = self
            .day_count
            .year_fraction(period.accrual_start, period.accrual_end);
        let amount = self.notional * self.coupon_rate * acc_time;
        let survival = spread_curve.forward_zero_price(today, survival_date);
        let discount = disc_curve.forward_zero_price(today, period.pay_date);
        let mut pv = amount * survival * discount;

        if self.accrual_pay_convention == AccrualPaymentConvention::All {
            let shifted_step_in = step_in_date.add_days(obs_offset)?;
            let shifted_start = period.accrual_start.add_days(obs_offset)?;
            let shifted_end = period.accrual_end.add_days(obs_offset)?;
            pv += accrual_on_default_pv(
                today,
                shifted_step_in,
                shifted_start,
                shifted_end,
                amount,
                disc_curve,
                spread_curve,
                timeline,
            );
        }

        Ok(pv)
    }

    /// Timeline spanning the whole fee leg, bounding each flat-forward
    /// segment used by the accrual-on-default integral.
    fn full_timeline(&self, disc_curve: &FlatForwardCurve, spread_curve: &FlatForwardCurve) -> Vec<Date> {
        let start = self.periods[0].accrual_start;
        let end = self.periods[self.periods.len() - 1].accrual_end;
        risky_timeline(start, end, disc_curve, spread_curve)
    }

    /// Accrued interest as of `today`, for a clean-price quote: zero if
    /// `today` falls outside `(first accrual start, last accrual end)` or
    /// lands exactly on an accrual boundary; otherwise the day-count
    /// fraction from the bracketing period's start to `today`.
    fn accrued_interest(&self, today: Date) -> Real {
        let first_start = self.periods[0].accrual_start;
        let last_end = self.periods[self.periods.len() - 1].accrual_end;
        if today <= first_start || today >= last_end {
            return 0.0;
        }

        match self.periods.binary_search_by_key(&today, |p| p.accrual_start) {
            Ok(_) => 0.0,
            Err(0) => 0.0,
            Err(idx) => {
                let period = &self.periods[idx - 1];
                let accrual = self.day_count.year_fraction(period.accrual_start, today);
                accrual * self.coupon_rate * self.notional
            }
        }
    }

    /// The fee leg's non-contingent cash flows: the coupon each period
    /// pays at its pay date if it survives unconditionally, ignoring
    /// default risk. Used for display and for the survival-independent
    /// half of par-spread quoting.
    pub fn flows(&self) -> Leg {
        self.periods
            .iter()
            .map(|p| {
                let time = self.day_count.year_fraction(p.accrual_start, p.accrual_end);
                let amount = time * self.coupon_rate * self.notional;
                Box::new(SimpleCashFlow::new(amount, p.pay_date)) as Box<dyn CashFlow>
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::CompoundingBasis;
    use ql_time::Actual360;

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

    fn quarterly_leg(conv: AccrualPaymentConvention) -> FeeLeg {
        let periods = vec![
            AccrualPeriod {
                accrual_start: date(2020, 3, 20),
                accrual_end: date(2020, 6, 20),
                pay_date: date(2020, 6, 22),
            },
            AccrualPeriod {
                accrual_start: date(2020, 6, 20),
                accrual_end: date(2020, 9, 20),
                pay_date: date(2020, 9, 21),
            },
        ];
        FeeLeg::new(periods, 1.0e7, 0.01, Actual360, conv, true).unwrap()
    }

    #[test]
    fn pv_is_positive_and_bounded_by_undiscounted_coupons() {
        let today = date(2020, 1, 1);
        let leg = quarterly_leg(AccrualPaymentConvention::None);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let pv = leg
            .pv(today, today, today, &disc, &spread, false)
            .unwrap();
        assert!(pv > 0.0);
        assert!(pv < 1.0e7 * 0.01 * 0.51);
    }

    #[test]
    fn accrual_on_default_increases_pv_over_none() {
        let today = date(2020, 1, 1);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.05);
        let pv_none = quarterly_leg(AccrualPaymentConvention::None)
            .pv(today, today, today, &disc, &spread, false)
            .unwrap();
        let pv_all = quarterly_leg(AccrualPaymentConvention::All)
            .pv(today, today, today, &disc, &spread, false)
            .unwrap();
        assert!(pv_all > pv_none);
    }

    #[test]
    fn clean_price_deducts_accrued_interest() {
        let today = date(2020, 1, 1);
        let leg = quarterly_leg(AccrualPaymentConvention::None);
        let disc = flat_curve(today, 0.02);
        let spread = flat_curve(today, 0.03);
        let step_in = date(2020, 5, 1);
        let dirty = leg
            .pv(today, step_in, today, &disc, &spread, false)
            .unwrap();
        let clean = leg
            .pv(today, step_in, today, &disc, &spread, true)
            .unwrap();
        assert!(clean < dirty);
    }

    #[test]
    fn zero_pv_past_maturity() {
        let today = date(2021, 1, 1);
        let leg = quarterly_leg(AccrualPaymentConvention::None);
        let disc = flat_curve(date(2020, 1, 1), 0.02);
        let spread = flat_curve(date(2020, 1, 1), 0.03);
        let pv = leg
            .pv(today, today, today, &disc, &spread, false)
            .unwrap();
        assert_eq!(pv, 0.0);
    }

    #[test]
    fn flows_match_simple_coupon_amounts() {
        let leg = quarterly_leg(AccrualPaymentConvention::None);
        let flows = leg.flows();
        assert_eq!(flows.len(), 2);
        assert!(flows[0].amount() > 0.0);
    }
}
