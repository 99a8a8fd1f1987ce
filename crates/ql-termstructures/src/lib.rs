//! # ql-termstructures
//!
//! The piecewise flat-forward discount/hazard curve used for both legs of a
//! single-name credit default swap, and the risky-timeline integration grid
//! built from a pair of such curves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `FlatForwardCurve` — a piecewise flat-forward curve of (date, rate)
/// knots under an explicit compounding basis, used as both discount and
/// hazard/survival curve.
pub mod flat_forward_curve;

/// `risky_timeline` — merges two curves' pillar dates into one integration
/// grid for protection-leg and accrual-on-default pricing.
pub mod risky_timeline;

pub use flat_forward_curve::FlatForwardCurve;
pub use risky_timeline::risky_timeline;
