//! Process-wide, name-keyed cache of loaded calendars.
//!
//! Mirrors `ql_core::patterns::singleton::define_singleton!`: a single
//! lazily-initialised global holds a mutex-guarded map from calendar name to
//! an already-loaded, immutable [`Calendar`]. Loading is idempotent per
//! name; a hot-reload under the same name must be externally serialized
//! with in-flight readers, since the map is replaced atomically but
//! `Arc` handles already cloned out by prior readers keep observing the
//! old calendar.

use super::file_calendar::FileCalendar;
use crate::calendar::Calendar;
use ql_core::errors::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

type CalendarMap = HashMap<String, Arc<dyn Calendar>>;

static CACHE: LazyLock<Mutex<CalendarMap>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Register a calendar under `name`, replacing any previous entry for the
/// same name. Readers that already cloned out the old `Arc` keep using it;
/// new lookups see the replacement.
pub fn register(name: &str, calendar: Arc<dyn Calendar>) {
    let mut guard = CACHE.lock().expect("calendar registry mutex poisoned");
    guard.insert(name.to_string(), calendar);
}

/// Load a calendar from a holiday-file's contents and register it under
/// `name`.
pub fn load_from_file(name: &str, file_contents: &str) -> Result<Arc<dyn Calendar>> {
    let cal: Arc<dyn Calendar> = Arc::new(FileCalendar::from_holiday_file(name, file_contents)?);
    register(name, Arc::clone(&cal));
    Ok(cal)
}

/// Look up a previously registered calendar by name.
///
/// # Errors
/// Returns `Error::CalendarMiss` if no calendar has been registered under
/// `name`.
pub fn lookup(name: &str) -> Result<Arc<dyn Calendar>> {
    let guard = CACHE.lock().expect("calendar registry mutex poisoned");
    guard
        .get(name)
        .cloned()
        .ok_or_else(|| Error::CalendarMiss(name.to_string()))
}

/// Remove every registered calendar. Intended for test isolation only.
#[cfg(test)]
pub fn clear() {
    CACHE.lock().expect("calendar registry mutex poisoned").clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    #[test]
    fn load_and_lookup_round_trip() {
        clear();
        let contents = "20240101\n20241225\n";
        load_from_file("test-calendar", contents).unwrap();
        let cal = lookup("test-calendar").unwrap();
        assert!(!cal.is_business_day(Date::from_ymd(2024, 12, 25).unwrap()));
    }

    #[test]
    fn missing_calendar_errors() {
        clear();
        assert!(matches!(lookup("nope"), Err(Error::CalendarMiss(_))));
    }

    #[test]
    fn replace_is_atomic_by_name() {
        clear();
        load_from_file("c", "20240101\n").unwrap();
        let first = lookup("c").unwrap();
        load_from_file("c", "20240704\n").unwrap();
        let second = lookup("c").unwrap();
        assert!(!first.is_business_day(Date::from_ymd(2024, 1, 1).unwrap()));
        assert!(second.is_business_day(Date::from_ymd(2024, 1, 1).unwrap()));
        assert!(!second.is_business_day(Date::from_ymd(2024, 7, 4).unwrap()));
    }
}
