//! # ql-time
//!
//! Date, calendar, day counter, CDS accrual schedule, and
//! business-day-convention types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// Stub-aware accrual/payment schedule generation for CDS-style contracts.
pub mod cds_schedule;

/// Concrete calendar implementations (country / exchange specific).
pub mod calendars;

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

/// Payment / event frequency.
pub mod frequency;

/// `InterestRate` — rate with compounding and day-counting conventions.
pub mod interest_rate;

/// `Month` — month of the year.
pub mod month;

/// `Period` — a time span in a `TimeUnit`.
pub mod period;

/// `TimeUnit` — days, weeks, months, years.
pub mod time_unit;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use calendars::file_calendar::FileCalendar;
pub use calendars::target::Target;
pub use calendars::united_states::{UnitedStatesNyse, UnitedStatesSettlement};
pub use cds_schedule::{generate_unadjusted_dates, CdsSchedule, StubKind};
pub use date::Date;
pub use day_counter::{
    Actual360, Actual364, Actual36525, Actual365Fixed, Actual366, ActualActualAfb,
    ActualActualIsda, ActualActualIsma, Business252, DayCounter, EffectiveRateDayCounter,
    OneDayCounter, SimpleDayCounter, Thirty360, Thirty360European, Thirty360German,
    Thirty360Italian, Thirty365,
};
pub use frequency::Frequency;
pub use interest_rate::InterestRate;
pub use month::Month;
pub use period::Period;
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
