//! # ql-math
//!
//! Root-finding utilities shared by the pricing engines: Brent's method and
//! the bracketed/guessed solver wrappers used by the hazard-rate bootstrap.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// One-dimensional root-finding algorithms (bisection, Brent, Newton, ...).
pub mod solvers1d;
