//! # ql-pricingengines
//!
//! Pricing engines for a single-name credit default swap.
//!
//! ## Engines
//!
//! - [`ProtectionLegEngine`] — analytic PV of the protection (contingent) leg,
//!   under a joint flat-forward discount/survival assumption.
//! - [`bootstrap_hazard_curve`] — calibrates a clean hazard-rate curve from a
//!   strip of CDS par-spread quotes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod hazard_rate_bootstrap;
pub mod protection_leg_engine;

pub use hazard_rate_bootstrap::{bootstrap_hazard_curve, BootstrapInput};
pub use protection_leg_engine::{ProtectionLegArgs, ProtectionLegEngine};
