//! # cds
//!
//! Single-name credit default swap pricing and curve construction: a
//! piecewise flat-forward discount/hazard curve engine, CDS schedule
//! generation, analytic protection/fee-leg pricing, and hazard-rate
//! bootstrapping from a strip of par-spread quotes.
//!
//! This crate is a **façade** over the underlying `ql-*` workspace crates,
//! re-exported below, plus the external entry points named by the external
//! interface: [`make_curve`], [`build_coupon_schedule`], [`cds_price`],
//! [`cds_par_spreads`], [`clean_spread_curve_bootstrap`],
//! [`defaulted_accrual`], and [`fee_leg_flows`].
//!
//! ## Quick start
//!
//! ```rust
//! use cds::core::{CompoundingBasis, Real};
//! use cds::time::{Actual365Fixed, Date, TimeUnit};
//!
//! let rate: Real = 0.05;
//! let base = Date::from_ymd(2020, 1, 1).unwrap();
//! let curve = cds::make_curve(
//!     base,
//!     vec![(base.advance(5, TimeUnit::Years).unwrap(), rate)],
//!     CompoundingBasis::Continuous,
//!     Actual365Fixed,
//! )
//! .unwrap();
//! assert!((curve.base_date().serial() - base.serial()) == 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ql_core as core;

/// Date, calendar, day counter, and schedule types.
pub use ql_time as time;

/// Mathematical utilities: interpolation, solvers, root finding.
pub use ql_math as math;

/// Term structure implementations (flat-forward discount/hazard curves).
pub use ql_termstructures as termstructures;

/// Cash flows and the fee (premium) leg.
pub use ql_cashflows as cashflows;

/// Financial instruments: the protection (contingent) leg.
pub use ql_instruments as instruments;

/// Pricing engines: protection-leg PV and hazard-rate bootstrap.
pub use ql_pricingengines as pricingengines;

mod accrual;
mod bootstrap;

/// Calendar-name resolution for the `calendarName` parameters of the
/// external interface.
pub mod calendar_lookup;
mod curve;
mod pricing;
mod schedule;

pub use accrual::defaulted_accrual;
pub use bootstrap::clean_spread_curve_bootstrap;
pub use curve::make_curve;
pub use pricing::{cds_par_spreads, cds_price};
pub use schedule::{build_coupon_schedule, fee_leg_flows};
