//! `ContingentLeg` — the protection (default payment) side of a credit
//! default swap.

use crate::instrument::Instrument;
use ql_core::errors::{Error, Result};
use ql_time::Date;

/// When the protection payment is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionPayConvention {
    /// Paid at the time of default.
    AtDefault,
    /// Paid at contract maturity regardless of when default occurred.
    AtMaturity,
}

/// The protection (contingent) leg of a CDS: pays `(1 - recovery) *
/// notional` on a credit event between `start_date` and `end_date`.
///
/// Invariant: `end_date > start_date`. When `protect_start` is set, the
/// effective protection start is one day earlier than `start_date` — the
/// standard CDS "protection from the start of the first day" convention.
#[derive(Debug, Clone, Copy)]
pub struct ContingentLeg {
    /// Protection period start (unadjusted contract date).
    pub start_date: Date,
    /// Protection period end (unadjusted contract date, i.e. maturity).
    pub end_date: Date,
    /// Notional on which the loss is computed.
    pub notional: f64,
    /// When the protection payment is made.
    pub pay_convention: ProtectionPayConvention,
    /// Whether protection starts one day before `start_date`.
    pub protect_start: bool,
}

impl ContingentLeg {
    /// Build a contingent leg, validating `end_date > start_date`.
    pub fn new(
        start_date: Date,
        end_date: Date,
        notional: f64,
        pay_convention: ProtectionPayConvention,
        protect_start: bool,
    ) -> Result<Self> {
        if end_date <= start_date {
            return Err(Error::InvalidArgument(
                "contingent leg end date must be after start date".into(),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
            notional,
            pay_convention,
            protect_start,
        })
    }

    /// `start_date - 1 day` when `protect_start`, else `start_date`.
    pub fn protection_start(&self) -> Date {
        if self.protect_start {
            self.start_date.add_days(-1).unwrap_or(self.start_date)
        } else {
            self.start_date
        }
    }
}

impl Instrument for ContingentLeg {
    fn is_expired(&self) -> bool {
        false
    }

    fn maturity_date(&self) -> Option<Date> {
        Some(self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn protect_start_shifts_by_one_day() {
        let leg = ContingentLeg::new(
            date(2020, 1, 2),
            date(2021, 1, 2),
            1.0,
            ProtectionPayConvention::AtDefault,
            true,
        )
        .unwrap();
        assert_eq!(leg.protection_start(), date(2020, 1, 1));
    }

    #[test]
    fn rejects_reversed_dates() {
        let err = ContingentLeg::new(
            date(2021, 1, 1),
            date(2020, 1, 1),
            1.0,
            ProtectionPayConvention::AtDefault,
            false,
        );
        assert!(err.is_err());
    }
}
