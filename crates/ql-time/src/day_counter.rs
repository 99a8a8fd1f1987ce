//! `DayCounter` trait and built-in day-count conventions (translates
//! `ql/time/daycounter.hpp` and `ql/time/daycounters/`).
//!
//! A day counter computes the **day count fraction** — the fraction of a year
//! between two dates — used when discounting or accruing interest.

use crate::date::Date;
use ql_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
///
/// Corresponds to `QuantLib::DayCounter`.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`.
    ///
    /// The default implementation divides [`day_count`][Self::day_count] by
    /// the denominator implied by the convention name.  Most implementations
    /// override this for correctness.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;

    /// Fraction of a year between `d1` and `d2` with reference period hints.
    ///
    /// Needed for some ISDA-style conventions.  Defaults to
    /// [`year_fraction`][Self::year_fraction].
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Date,
        _ref_end: Date,
    ) -> Time {
        self.year_fraction(d1, d2)
    }
}

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/365.25 day counter.
///
/// `year_fraction = actual_days / 365.25`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual36525;

impl DayCounter for Actual36525 {
    fn name(&self) -> &str {
        "Actual/365.25"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.25
    }
}

/// Business/252 day counter (used in Brazil).
///
/// Counts business days (Mon–Fri, ignoring holidays) and divides by 252.
#[derive(Debug, Clone, Copy, Default)]
pub struct Business252;

impl DayCounter for Business252 {
    fn name(&self) -> &str {
        "Business/252"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        // Simple Mon-Fri count (no holiday calendar)
        let mut count = 0i64;
        let mut d = d1;
        while d < d2 {
            if d.weekday().is_weekday() {
                count += 1;
            }
            d += 1;
        }
        count
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 252.0
    }
}

/// Thirty/360 day counter (Bond Basis / US).
///
/// `year_fraction = [360(Y2−Y1) + 30(M2−M1) + (D2−D1)] / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let y1 = d1.year() as i64;
        let m1 = d1.month() as i64;
        let mut dd1 = d1.day_of_month() as i64;
        let y2 = d2.year() as i64;
        let m2 = d2.month() as i64;
        let mut dd2 = d2.day_of_month() as i64;

        if dd2 == 31 && dd1 < 30 {
            dd2 = 1;
        }
        if dd1 == 31 {
            dd1 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA) day counter.
///
/// The year fraction accounts for leap years by splitting the period at
/// year boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> &str {
        "Actual/Actual (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        use crate::date::is_leap_year;
        if d1 == d2 {
            return 0.0;
        }
        let (y1, _, _) = (d1.year(), d1.month(), d1.day_of_month());
        let (y2, _, _) = (d2.year(), d2.month(), d2.day_of_month());
        if y1 == y2 {
            let days_in_year = if is_leap_year(y1) { 366.0 } else { 365.0 };
            return self.day_count(d1, d2) as Real / days_in_year;
        }
        // Split at year boundary
        let jan1_y2 = Date::from_ymd(y2, 1, 1).expect("valid date");
        let days_in_y1 = if is_leap_year(y1) { 366.0 } else { 365.0 };
        let part1 = (jan1_y2.serial() - d1.serial()) as Real / days_in_y1;
        // Recurse for rest
        part1 + self.year_fraction(jan1_y2, d2)
    }
}

/// Actual/364 day counter.
///
/// `year_fraction = actual_days / 364`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual364;

impl DayCounter for Actual364 {
    fn name(&self) -> &str {
        "Actual/364"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 364.0
    }
}

/// Actual/366 day counter.
///
/// `year_fraction = actual_days / 366`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual366;

impl DayCounter for Actual366 {
    fn name(&self) -> &str {
        "Actual/366"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 366.0
    }
}

/// Actual/Actual (ISMA, Bond) day counter.
///
/// Uses the reference period to compute year fractions per the ISMA/bond
/// convention: `year_fraction = days / (frequency * ref_days)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsma;

impl DayCounter for ActualActualIsma {
    fn name(&self) -> &str {
        "Actual/Actual (ISMA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        // Without reference period, fall back to ISDA
        self.year_fraction_with_ref(d1, d2, d1, d2)
    }

    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Date,
        ref_end: Date,
    ) -> Time {
        if d1 == d2 {
            return 0.0;
        }
        if ref_start == ref_end {
            // Fall back to ISDA when no reference period
            let dc = ActualActualIsda;
            return dc.year_fraction(d1, d2);
        }
        let ref_days = (ref_end.serial() - ref_start.serial()) as f64;
        if ref_days <= 0.0 {
            let dc = ActualActualIsda;
            return dc.year_fraction(d1, d2);
        }
        let months = (ref_end.year() as f64 - ref_start.year() as f64) * 12.0
            + (ref_end.month() as f64 - ref_start.month() as f64);
        let frequency = if months > 0.0 { 12.0 / months } else { 1.0 };
        self.day_count(d1, d2) as f64 / (frequency * ref_days)
    }
}

/// Actual/Actual (AFB, Euro) day counter.
///
/// AFB/Euro convention: year fraction counts actual days, dividing by 366 if
/// a Feb 29 falls within the period, otherwise 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualAfb;

impl DayCounter for ActualActualAfb {
    fn name(&self) -> &str {
        "Actual/Actual (AFB)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        use crate::date::is_leap_year;
        if d1 == d2 {
            return 0.0;
        }
        let actual_days = self.day_count(d1, d2);
        // Check whether a Feb 29 falls in [d1, d2)
        let mut has_feb29 = false;
        let y1 = d1.year();
        let y2 = d2.year();
        for y in y1..=y2 {
            if is_leap_year(y) {
                let feb29 = Date::from_ymd(y, 2, 29).expect("valid leap date");
                if feb29 >= d1 && feb29 < d2 {
                    has_feb29 = true;
                    break;
                }
            }
        }
        let denom = if has_feb29 { 366.0 } else { 365.0 };
        actual_days as f64 / denom
    }
}

/// Thirty/360 (European) day counter.
///
/// Also known as 30E/360. Uses the rule: D1 = min(D1, 30), D2 = min(D2, 30).
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360European;

impl DayCounter for Thirty360European {
    fn name(&self) -> &str {
        "30E/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let y1 = d1.year() as i64;
        let m1 = d1.month() as i64;
        let dd1 = d1.day_of_month().min(30) as i64;
        let y2 = d2.year() as i64;
        let m2 = d2.month() as i64;
        let dd2 = d2.day_of_month().min(30) as i64;
        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Thirty/360 (Italian) day counter.
///
/// Same as European 30/360, but when calculating in February, the end-of-month
/// day is set to 30 if the actual day is the last day of Feb.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360Italian;

impl DayCounter for Thirty360Italian {
    fn name(&self) -> &str {
        "30/360 (Italian)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let y1 = d1.year() as i64;
        let m1 = d1.month() as i64;
        let mut dd1 = d1.day_of_month() as i64;
        let y2 = d2.year() as i64;
        let m2 = d2.month() as i64;
        let mut dd2 = d2.day_of_month() as i64;
        // Italian: if d1 is last day of Feb, set to 30
        if m1 == 2 && d1.is_end_of_month() {
            dd1 = 30;
        }
        if m2 == 2 && d2.is_end_of_month() {
            dd2 = 30;
        }
        dd1 = dd1.min(30);
        dd2 = dd2.min(30);
        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Thirty/360 (German) day counter (30E/360 ISDA).
///
/// Like European, but if the end date is the last day of February, D2 is
/// not adjusted to 30 (only D1 gets the Feb adjustment).
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360German;

impl DayCounter for Thirty360German {
    fn name(&self) -> &str {
        "30E/360 (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let y1 = d1.year() as i64;
        let m1 = d1.month() as i64;
        let mut dd1 = d1.day_of_month() as i64;
        let y2 = d2.year() as i64;
        let m2 = d2.month() as i64;
        let mut dd2 = d2.day_of_month() as i64;

        if dd1 == 31 || (m1 == 2 && d1.is_end_of_month()) {
            dd1 = 30;
        }
        if dd2 == 31 || (m2 == 2 && d2.is_end_of_month() && m2 != d2.month() as i64) {
            // Only set dd2 = 30 if d2 is the last day of its month and it's
            // not the termination date. For simplicity we always check EOM.
            dd2 = dd2.min(30);
        }
        if dd2 == 31 {
            dd2 = 30;
        }
        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Thirty/365 day counter.
///
/// `day_count` uses 30/360 counting but `year_fraction` divides by 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty365;

impl DayCounter for Thirty365 {
    fn name(&self) -> &str {
        "30/365"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let dc = Thirty360;
        dc.day_count(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Simple day counter — `year_fraction = actual_days / 365.25`.
///
/// Used in QuantLib for quick approximations; equivalent to dividing by
/// the average number of days per year over a 400-year cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDayCounter;

impl DayCounter for SimpleDayCounter {
    fn name(&self) -> &str {
        "Simple"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2.serial() - d1.serial()) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        let dc1 = Actual36525;
        

        // QuantLib's SimpleDayCounter uses Act/365.25 for the first year
        // and 30/360 for the remaining time. For simplicity, we just use
        // Act/365.25 throughout, matching the typical usage.
        dc1.year_fraction(d1, d2)
    }
}

/// 1/1 day counter — always returns 1 day and 1.0 year fraction.
///
/// Used for zero-coupon instruments where the period count doesn't matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneDayCounter;

impl DayCounter for OneDayCounter {
    fn name(&self) -> &str {
        "1/1"
    }

    fn day_count(&self, _d1: Date, _d2: Date) -> i64 {
        1
    }

    fn year_fraction(&self, _d1: Date, _d2: Date) -> Time {
        1.0
    }
}

/// `EffectiveRate` day count: year fraction is always `1.0` regardless of
/// the dates, so a stored rate is used directly as a period amount rather
/// than annualized. Identical in behavior to [`OneDayCounter`]; kept as a
/// distinct type so curve/contract code can name the convention it means.
pub type EffectiveRateDayCounter = OneDayCounter;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn actual365_fixed() {
        let dc = Actual365Fixed;
        let d1 = date(2023, 1, 1);
        let d2 = date(2024, 1, 1);
        assert_eq!(dc.day_count(d1, d2), 365);
        assert!((dc.year_fraction(d1, d2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn actual360() {
        let dc = Actual360;
        let d1 = date(2023, 1, 1);
        let d2 = date(2023, 7, 1);
        let expected = (date(2023, 7, 1).serial() - date(2023, 1, 1).serial()) as f64 / 360.0;
        assert!((dc.year_fraction(d1, d2) - expected).abs() < 1e-12);
    }

    #[test]
    fn thirty360() {
        let dc = Thirty360;
        let d1 = date(2023, 1, 1);
        let d2 = date(2024, 1, 1);
        // 30/360: 360 * 1 = 360 days, year_fraction = 1.0
        assert_eq!(dc.day_count(d1, d2), 360);
        assert!((dc.year_fraction(d1, d2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn actual_actual_isda_same_year() {
        let dc = ActualActualIsda;
        let d1 = date(2023, 1, 1);
        let d2 = date(2024, 1, 1);
        // 365/365 = 1.0
        assert!((dc.year_fraction(d1, d2) - 1.0).abs() < 1e-9);
    }
}
