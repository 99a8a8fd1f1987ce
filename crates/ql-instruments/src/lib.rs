//! # ql-instruments
//!
//! Financial instruments, generalized to a single-name credit default swap:
//! the base [`Instrument`]/[`PricingEngine`] traits plus [`ContingentLeg`],
//! the protection side of a CDS.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `ContingentLeg` — the protection side of a CDS.
pub mod contingent_leg;

pub mod instrument;

pub use contingent_leg::{ContingentLeg, ProtectionPayConvention};
pub use instrument::{Instrument, PricingEngine, PricingResults};
