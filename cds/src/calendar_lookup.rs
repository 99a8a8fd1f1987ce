//! Calendar-name resolution for the façade's `calendarName` parameters.
//!
//! Per the core's own design note, string-keyed calendar lookup is kept out
//! of the pricing/schedule code entirely; those take an explicit `&dyn
//! Calendar`. This module is the thin translation layer: a small built-in
//! name table, backed by [`ql_time::calendars::registry`] for anything
//! loaded from a holiday file at runtime.

use ql_core::errors::{Error, Result};
use ql_time::calendars::registry;
use ql_time::{Calendar, NullCalendar, Target, UnitedStatesSettlement, WeekendsOnly};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn ensure_builtins_registered() {
    INIT.call_once(|| {
        registry::register("NullCalendar", Arc::new(NullCalendar));
        registry::register("WeekendsOnly", Arc::new(WeekendsOnly));
        registry::register("TARGET", Arc::new(Target));
        registry::register("US", Arc::new(UnitedStatesSettlement));
    });
}

/// Resolve `name` to a calendar, consulting the built-in table first and
/// falling back to calendars previously loaded via
/// [`register_holiday_file`].
///
/// # Errors
/// Returns `Error::CalendarMiss` if `name` names neither a built-in nor a
/// previously-loaded calendar.
pub fn resolve(name: &str) -> Result<Arc<dyn Calendar>> {
    ensure_builtins_registered();
    registry::lookup(name).map_err(|_| Error::CalendarMiss(name.to_string()))
}

/// Load a holiday-file calendar and register it under `name`, making it
/// resolvable by subsequent [`resolve`] calls.
pub fn register_holiday_file(name: &str, file_contents: &str) -> Result<()> {
    registry::load_from_file(name, file_contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_built_in_names() {
        assert!(resolve("WeekendsOnly").is_ok());
        assert!(resolve("TARGET").is_ok());
    }

    #[test]
    fn missing_name_is_calendar_miss() {
        assert!(matches!(resolve("not-a-calendar"), Err(Error::CalendarMiss(_))));
    }

    #[test]
    fn holiday_file_round_trips() {
        register_holiday_file("custom-test", "20240101\n").unwrap();
        let cal = resolve("custom-test").unwrap();
        assert!(!cal.is_business_day(ql_time::Date::from_ymd(2024, 1, 1).unwrap()));
    }
}
