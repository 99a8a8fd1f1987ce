//! # ql-core
//!
//! Core types, traits, and error definitions shared across the workspace:
//! type aliases, the error hierarchy, compounding conventions, and the
//! singleton pattern used by the process-wide calendar registry.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Compounding conventions shared by rate and curve types.
pub mod compounding;

/// The crate-wide error hierarchy and `ensure!`/`fail!` macros.
pub mod errors;

/// Design patterns: Singleton.
pub mod patterns;

pub use compounding::{Compounding, CompoundingBasis};
pub use errors::{Error, Result};

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Integer type used for general-purpose counting.
pub type Integer = i32;

/// Non-negative integer type.
pub type Natural = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;
