//! `buildCouponSchedule` / `feeLegFlows` — non-contingent coupon cash flows
//! for a fixed-rate accrual schedule, independent of any survival curve.

use crate::calendar_lookup;
use ql_cashflows::fee_leg::{AccrualPaymentConvention, AccrualPeriod, FeeLeg};
use ql_cashflows::Leg;
use ql_core::errors::Result;
use ql_core::Real;
use ql_time::cds_schedule::{CdsSchedule, StubKind};
use ql_time::{BusinessDayConvention, Date, DayCounter, Period};

/// Build the bad-day-adjusted accrual periods for `[start_date, end_date]`
/// under `interval`/`stub`, paid per `bad_day_convention` on `calendar_name`.
pub(crate) fn build_periods(
    start_date: Date,
    end_date: Date,
    interval: Period,
    stub: StubKind,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
) -> Result<Vec<AccrualPeriod>> {
    let calendar = calendar_lookup::resolve(calendar_name)?;
    let schedule = CdsSchedule::build(
        start_date,
        end_date,
        interval,
        stub,
        calendar.as_ref(),
        BusinessDayConvention::Unadjusted,
        calendar.as_ref(),
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

/// The non-contingent coupon cash flows of a fixed-rate accrual schedule:
/// `notional . couponRate . yearFraction` at each bad-day-adjusted pay date.
#[allow(clippy::too_many_arguments)]
pub fn build_coupon_schedule(
    start_date: Date,
    end_date: Date,
    interval: Period,
    stub: StubKind,
    day_count: impl DayCounter + 'static,
    notional: Real,
    coupon_rate: Real,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
) -> Result<Leg> {
    let periods = build_periods(
        start_date,
        end_date,
        interval,
        stub,
        bad_day_convention,
        calendar_name,
    )?;
    let leg = FeeLeg::new(
        periods,
        notional,
        coupon_rate,
        day_count,
        AccrualPaymentConvention::None,
        false,
    )?;
    Ok(leg.flows())
}

/// Alias of [`build_coupon_schedule`] under the name used by the external
/// interface for a standalone fee leg's non-contingent flows.
#[allow(clippy::too_many_arguments)]
pub fn fee_leg_flows(
    start_date: Date,
    end_date: Date,
    interval: Period,
    stub: StubKind,
    day_count: impl DayCounter + 'static,
    notional: Real,
    coupon_rate: Real,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
) -> Result<Leg> {
    build_coupon_schedule(
        start_date,
        end_date,
        interval,
        stub,
        day_count,
        notional,
        coupon_rate,
        bad_day_convention,
        calendar_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_cashflows::CashFlow;
    use ql_time::{Actual360, TimeUnit};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn no_stub_quarterly_schedule_has_twenty_flows() {
        let flows = build_coupon_schedule(
            date(2008, 3, 20),
            date(2013, 3, 20),
            Period::new(3, TimeUnit::Months),
            StubKind::NoStub,
            Actual360,
            1.0e7,
            0.01,
            BusinessDayConvention::Following,
            "WeekendsOnly",
        )
        .unwrap();
        assert_eq!(flows.len(), 20);
        assert!(flows[0].amount() > 0.0);
    }

    #[test]
    fn back_short_stub_schedule_pay_dates() {
        let flows = build_coupon_schedule(
            date(2008, 3, 20),
            date(2013, 3, 20),
            Period::new(3, TimeUnit::Months),
            StubKind::BackShort,
            Actual360,
            1.0e7,
            0.01,
            BusinessDayConvention::Following,
            "WeekendsOnly",
        )
        .unwrap();
        assert_eq!(flows.len(), 20);
        assert_eq!(flows[0].date(), date(2008, 6, 20));
        assert_eq!(flows[flows.len() - 1].date(), date(2013, 3, 20));
    }
}
