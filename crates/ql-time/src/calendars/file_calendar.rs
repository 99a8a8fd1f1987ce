//! A calendar whose holidays are loaded from a line-oriented text file.
//!
//! Holiday files list one `YYYYMMDD` date per line. A line may carry an
//! optional trailing weekend mask token (seven characters, `1`/`0` for
//! Mon..Sun, `1` meaning "is a weekend day") that overrides the default
//! Saturday/Sunday weekend; the mask is read from the *first* such line
//! encountered and applies to the whole calendar. Blank lines and lines
//! starting with `#` are ignored.

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;
use ql_core::errors::{Error, Result};
use std::collections::HashSet;

/// A calendar backed by an explicit holiday set and an optional
/// non-default weekend mask, loaded from a holiday file or an
/// in-memory list of dates.
///
/// Immutable once constructed: matches the "created from a holiday file,
/// cached by name, immutable after load" requirement of the calendar
/// cache in [`super::registry`].
#[derive(Debug, Clone)]
pub struct FileCalendar {
    name: String,
    holidays: HashSet<i32>,
    weekend_mask: [bool; 7],
}

/// Default weekend mask: Saturday and Sunday.
const DEFAULT_WEEKEND_MASK: [bool; 7] = [false, false, false, false, false, true, true];

impl FileCalendar {
    /// Build a calendar from an explicit list of holiday dates and the
    /// default (Saturday/Sunday) weekend mask.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().map(|d| d.serial()).collect(),
            weekend_mask: DEFAULT_WEEKEND_MASK,
        }
    }

    /// Build a calendar from an explicit list of holiday dates and a
    /// weekend mask indexed `[Mon, Tue, Wed, Thu, Fri, Sat, Sun]`.
    pub fn with_weekend_mask(
        name: impl Into<String>,
        holidays: impl IntoIterator<Item = Date>,
        weekend_mask: [bool; 7],
    ) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().map(|d| d.serial()).collect(),
            weekend_mask,
        }
    }

    /// Parse a holiday file's contents.
    ///
    /// Each non-blank, non-`#`-prefixed line holds an 8-digit `YYYYMMDD`
    /// date, optionally followed by whitespace and a 7-character weekend
    /// mask (`1`/`0` for Mon..Sun). Only the first mask token encountered
    /// is honoured; subsequent ones are ignored.
    pub fn from_holiday_file(name: impl Into<String>, contents: &str) -> Result<Self> {
        let mut holidays = HashSet::new();
        let mut weekend_mask = DEFAULT_WEEKEND_MASK;
        let mut mask_seen = false;

        for (lineno, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let date_tok = parts.next().ok_or_else(|| {
                Error::CalendarMiss(format!("holiday file: empty token on line {}", lineno + 1))
            })?;
            let date = parse_yyyymmdd(date_tok).map_err(|e| {
                Error::CalendarMiss(format!("holiday file line {}: {e}", lineno + 1))
            })?;
            holidays.insert(date.serial());

            if !mask_seen {
                if let Some(mask_tok) = parts.next() {
                    weekend_mask = parse_weekend_mask(mask_tok).map_err(|e| {
                        Error::CalendarMiss(format!("holiday file line {}: {e}", lineno + 1))
                    })?;
                    mask_seen = true;
                }
            }
        }

        Ok(Self {
            name: name.into(),
            holidays,
            weekend_mask,
        })
    }

    /// The number of holidays in this calendar.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

fn parse_yyyymmdd(tok: &str) -> Result<Date> {
    if tok.len() != 8 || !tok.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::CalendarMiss(format!(
            "expected YYYYMMDD date, got {tok:?}"
        )));
    }
    let year: u16 = tok[0..4].parse().map_err(|_| {
        Error::CalendarMiss(format!("invalid year in date token {tok:?}"))
    })?;
    let month: u8 = tok[4..6].parse().map_err(|_| {
        Error::CalendarMiss(format!("invalid month in date token {tok:?}"))
    })?;
    let day: u8 = tok[6..8].parse().map_err(|_| {
        Error::CalendarMiss(format!("invalid day in date token {tok:?}"))
    })?;
    Date::from_ymd(year, month, day).map_err(|e| Error::CalendarMiss(e.to_string()))
}

fn parse_weekend_mask(tok: &str) -> Result<[bool; 7]> {
    if tok.len() != 7 || !tok.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(Error::CalendarMiss(format!(
            "expected 7-character 0/1 weekend mask, got {tok:?}"
        )));
    }
    let mut mask = [false; 7];
    for (i, b) in tok.bytes().enumerate() {
        mask[i] = b == b'1';
    }
    Ok(mask)
}

fn weekday_index(w: Weekday) -> usize {
    match w {
        Weekday::Monday => 0,
        Weekday::Tuesday => 1,
        Weekday::Wednesday => 2,
        Weekday::Thursday => 3,
        Weekday::Friday => 4,
        Weekday::Saturday => 5,
        Weekday::Sunday => 6,
    }
}

impl Calendar for FileCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date.serial())
    }

    fn is_weekend(&self, date: Date) -> bool {
        self.weekend_mask[weekday_index(date.weekday())]
    }
}
