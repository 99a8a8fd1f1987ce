//! `defaultedAccrual` — accrued interest owed on a fee leg as of a credit
//! event, for settlement once the event determination date is confirmed.

use crate::schedule::build_periods;
use ql_core::errors::Result;
use ql_core::Real;
use ql_time::cds_schedule::StubKind;
use ql_time::{BusinessDayConvention, Date, DayCounter, Period};

/// Accrual days and accrued amount owed as of `event_determination_date`,
/// under the accrual period that brackets `trade_date`.
///
/// Returns `(0, 0.0)` when `trade_date < event_determination_date` — the
/// trade was entered into before the event was confirmed, so no accrual
/// has yet been earned under it. Errors when `event_determination_date`
/// precedes `start_date` — there is no accrual period it could belong to.
/// Otherwise accrues from the bracketing period's start to
/// `event_determination_date + 1` day, per `JpmcdsDefaultAccrual`'s
/// convention of including the determination date itself in the accrued
/// days.
///
/// `trade_date` and `event_determination_date` are expected to fall in the
/// same accrual period, as they do in practice (a trade confirms within
/// days of the event it references); `JpmcdsDefaultAccrual` itself does not
/// special-case the reverse, so accrual from a period bracketing a
/// later-rolled `trade_date` back to an earlier `event_determination_date`
/// is left exactly as the reference computes it.
#[allow(clippy::too_many_arguments)]
pub fn defaulted_accrual(
    trade_date: Date,
    event_determination_date: Date,
    start_date: Date,
    end_date: Date,
    interval: Period,
    stub: StubKind,
    notional: Real,
    coupon_rate: Real,
    payment_day_count: &dyn DayCounter,
    bad_day_convention: BusinessDayConvention,
    calendar_name: &str,
) -> Result<(i64, Real)> {
    if trade_date < event_determination_date {
        return Ok((0, 0.0));
    }
    if event_determination_date < start_date {
        return Err(ql_core::errors::Error::InvalidArgument(
            "defaulted accrual: event determination date precedes the fee leg's start date"
                .into(),
        ));
    }

    let periods = build_periods(
        start_date,
        end_date,
        interval,
        stub,
        bad_day_convention,
        calendar_name,
    )?;

    let bracket = periods
        .iter()
        .find(|p| p.accrual_start <= trade_date && trade_date < p.accrual_end);
    let Some(period) = bracket else {
        return Ok((0, 0.0));
    };

    let edd_plus_one = event_determination_date.add_days(1)?;
    let days = payment_day_count.day_count(period.accrual_start, edd_plus_one);
    let accrual = payment_day_count.year_fraction(period.accrual_start, edd_plus_one);
    Ok((days, accrual * coupon_rate * notional))
}
