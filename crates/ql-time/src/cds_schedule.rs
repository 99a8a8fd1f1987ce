//! Stub-aware accrual/payment schedule generation for CDS-style contracts.
//!
//! Builds dates with the anchor+multiplier date-stepping idiom
//! (`seed.advance(n * tenor.length, tenor.unit)`) extended to the full
//! front/back, short/long stub classification, with independent accrual
//! and payment calendar/convention pairs.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use ql_core::errors::{Error, Result};

/// Stub classification for a coupon schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubKind {
    /// Short stub at the front of the schedule.
    FrontShort,
    /// Long stub at the front of the schedule (coalesced with the next
    /// regular period).
    FrontLong,
    /// Short stub at the back of the schedule.
    BackShort,
    /// Long stub at the back of the schedule (coalesced with the previous
    /// regular period).
    BackLong,
    /// No stub: `startDate`/`endDate` must divide evenly into whole
    /// `interval` periods.
    NoStub,
}

impl StubKind {
    fn is_front(self) -> bool {
        matches!(self, StubKind::FrontShort | StubKind::FrontLong)
    }
}

/// Generate the unadjusted date list for `[start, end]` under `interval`
/// and `stub`, including `start` and `end`.
///
/// Back-stub schedules roll forward from `start` by `k * interval`,
/// `k = 1, 2, ...`, until the next roll would reach or exceed `end`; the
/// remainder `[last_regular, end]` is the stub. Front-stub schedules roll
/// backward from `end` symmetrically. The step is always computed from the
/// anchor with a multiplier (`anchor.advance_eom(k * interval.length,
/// interval.unit)`), never by repeated single-step addition, because
/// month-end date-interval semantics are not associative.
pub fn generate_unadjusted_dates(
    start: Date,
    end: Date,
    interval: Period,
    stub: StubKind,
) -> Result<Vec<Date>> {
    if start >= end {
        return Err(Error::InvalidArgument(
            "schedule start date must be before end date".into(),
        ));
    }
    if interval.length <= 0 {
        return Err(Error::InvalidArgument(
            "schedule interval must be strictly positive".into(),
        ));
    }

    let mut dates = if stub.is_front() {
        roll_backward(start, end, interval)?
    } else {
        roll_forward(start, end, interval)?
    };

    match stub {
        StubKind::NoStub => {
            // The walk must have landed exactly on `end`/`start` with no
            // leftover stub fragment.
            if dates.len() < 2 {
                return Err(Error::InvalidArgument(
                    "NoStub schedule requires at least one full period".into(),
                ));
            }
        }
        StubKind::FrontLong if dates.len() > 2 => {
            dates.remove(1);
        }
        StubKind::BackLong if dates.len() > 2 => {
            let n = dates.len();
            dates.remove(n - 2);
        }
        _ => {}
    }

    Ok(dates)
}

fn roll_forward(start: Date, end: Date, interval: Period) -> Result<Vec<Date>> {
    let mut dates = vec![start];
    let mut k = 1i32;
    loop {
        let next = start
            .advance_eom(k.checked_mul(interval.length).ok_or_else(|| {
                Error::InvalidArgument("schedule interval multiplier overflow".into())
            })?, interval.unit)
            .map_err(|e| Error::Date(e.to_string()))?;
        if next >= end {
            break;
        }
        dates.push(next);
        k += 1;
    }
    dates.push(end);
    Ok(dates)
}

fn roll_backward(start: Date, end: Date, interval: Period) -> Result<Vec<Date>> {
    let mut dates = vec![end];
    let mut k = 1i32;
    loop {
        let prev = end
            .advance_eom(-k.checked_mul(interval.length).ok_or_else(|| {
                Error::InvalidArgument("schedule interval multiplier overflow".into())
            })?, interval.unit)
            .map_err(|e| Error::Date(e.to_string()))?;
        if prev <= start {
            break;
        }
        dates.insert(0, prev);
        k += 1;
    }
    dates.insert(0, start);
    Ok(dates)
}

/// An accrual/payment schedule: the unadjusted anchor dates plus their
/// business-day-adjusted accrual and payment projections.
///
/// The unadjusted `startDate`/`endDate` remain visible (via
/// [`unadjusted_dates`][Self::unadjusted_dates]) for integrators that need
/// the original, un-rolled contract boundaries.
#[derive(Debug, Clone)]
pub struct CdsSchedule {
    unadjusted: Vec<Date>,
    accrual: Vec<Date>,
    pay: Vec<Date>,
}

impl CdsSchedule {
    /// Build a schedule from explicit accrual and payment calendar/convention
    /// pairs.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        start: Date,
        end: Date,
        interval: Period,
        stub: StubKind,
        accrual_calendar: &dyn Calendar,
        accrual_convention: BusinessDayConvention,
        pay_calendar: &dyn Calendar,
        pay_convention: BusinessDayConvention,
    ) -> Result<Self> {
        let unadjusted = generate_unadjusted_dates(start, end, interval, stub)?;
        let accrual = unadjusted
            .iter()
            .map(|&d| accrual_calendar.adjust(d, accrual_convention))
            .collect();
        let pay = unadjusted
            .iter()
            .map(|&d| pay_calendar.adjust(d, pay_convention))
            .collect();
        Ok(Self {
            unadjusted,
            accrual,
            pay,
        })
    }

    /// The unadjusted anchor dates, including the original `start`/`end`.
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted
    }

    /// The accrual-convention-adjusted dates.
    pub fn accrual_dates(&self) -> &[Date] {
        &self.accrual
    }

    /// The payment-convention-adjusted dates.
    pub fn pay_dates(&self) -> &[Date] {
        &self.pay
    }

    /// Number of accrual periods (`dates().len() - 1`).
    pub fn num_periods(&self) -> usize {
        self.unadjusted.len().saturating_sub(1)
    }

    /// The `i`-th accrual period as `(accStart, accEnd, payDate)`, using the
    /// accrual-adjusted boundaries and the payment-adjusted end.
    pub fn period(&self, i: usize) -> (Date, Date, Date) {
        (self.accrual[i], self.accrual[i + 1], self.pay[i + 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekendsOnly;
    use crate::time_unit::TimeUnit;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn no_stub_quarterly_divides_evenly() {
        let dates = generate_unadjusted_dates(
            date(2008, 3, 20),
            date(2013, 3, 20),
            Period::new(3, TimeUnit::Months),
            StubKind::NoStub,
        )
        .unwrap();
        assert_eq!(dates.first().copied(), Some(date(2008, 3, 20)));
        assert_eq!(dates.last().copied(), Some(date(2013, 3, 20)));
        // 5 years of quarters = 20 periods = 21 boundaries.
        assert_eq!(dates.len(), 21);
    }

    #[test]
    fn back_short_stub() {
        // 2008-03-20 to 2009-05-05 quarterly: periods land on the 20th of
        // Jun/Sep/Dec/Mar, with a short stub from 2009-03-20 to 2009-05-05.
        let dates = generate_unadjusted_dates(
            date(2008, 3, 20),
            date(2009, 5, 5),
            Period::new(3, TimeUnit::Months),
            StubKind::BackShort,
        )
        .unwrap();
        assert_eq!(dates.first().copied(), Some(date(2008, 3, 20)));
        assert_eq!(dates.last().copied(), Some(date(2009, 5, 5)));
        assert_eq!(dates[dates.len() - 2], date(2009, 3, 20));
    }

    #[test]
    fn back_long_stub_coalesces_one_boundary() {
        let short = generate_unadjusted_dates(
            date(2008, 3, 20),
            date(2009, 5, 5),
            Period::new(3, TimeUnit::Months),
            StubKind::BackShort,
        )
        .unwrap();
        let long = generate_unadjusted_dates(
            date(2008, 3, 20),
            date(2009, 5, 5),
            Period::new(3, TimeUnit::Months),
            StubKind::BackLong,
        )
        .unwrap();
        assert_eq!(long.len(), short.len() - 1);
        assert_eq!(long.first().copied(), Some(date(2008, 3, 20)));
        assert_eq!(long.last().copied(), Some(date(2009, 5, 5)));
    }

    #[test]
    fn front_short_stub() {
        let dates = generate_unadjusted_dates(
            date(2008, 1, 15),
            date(2009, 3, 20),
            Period::new(3, TimeUnit::Months),
            StubKind::FrontShort,
        )
        .unwrap();
        assert_eq!(dates.first().copied(), Some(date(2008, 1, 15)));
        assert_eq!(dates.last().copied(), Some(date(2009, 3, 20)));
        // Second date is the first roll-back boundary before (or at) start+stub.
        assert_eq!(dates[1], date(2008, 6, 20));
    }

    #[test]
    fn cds_schedule_with_adjustment() {
        let cal = WeekendsOnly;
        let sched = CdsSchedule::build(
            date(2008, 3, 20),
            date(2013, 3, 20),
            Period::new(3, TimeUnit::Months),
            StubKind::NoStub,
            &cal,
            BusinessDayConvention::Following,
            &cal,
            BusinessDayConvention::Following,
        )
        .unwrap();
        assert_eq!(sched.num_periods(), 20);
        assert_eq!(sched.pay_dates().first().copied(), Some(date(2008, 3, 20)));
        assert_eq!(sched.pay_dates().last().copied(), Some(date(2013, 3, 20)));
    }
}
