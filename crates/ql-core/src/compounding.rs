//! Compounding conventions (translates `ql/compounding.hpp`).

/// How interest is compounded.
///
/// Mirrors `QuantLib::Compounding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Compounded interest: `(1 + r)^t`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    Continuous,
    /// Simple interest **up to** the first coupon, compounded thereafter.
    SimpleThenCompounded,
    /// Compounded up to the last coupon, simple thereafter.
    CompoundedThenSimple,
}

/// The compounding basis of a curve-stored rate: a real periodic frequency
/// (1 = annual, 2 = semiannual, 4 = quarterly, 12 = monthly, ...) or one of
/// three special values. Unlike [`Compounding`], which names a fixed set of
/// conventions used by `InterestRate`, this basis carries the frequency as
/// data, matching a curve's per-point stored convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompoundingBasis {
    /// `m` periods per year, `m > 0`: `(1 + r/m)^(m·t)`.
    Periodic(f64),
    /// Simple interest: `1 + r·t`.
    Simple,
    /// Continuously compounded: `e^(r·t)`.
    Continuous,
    /// The stored "rate" is already a discount factor; no conversion.
    DiscountFactor,
}

impl CompoundingBasis {
    /// Discount factor implied by `rate` over `t` years under this basis.
    pub fn discount_factor(self, rate: f64, t: f64) -> f64 {
        match self {
            CompoundingBasis::Periodic(m) => {
                debug_assert!(m > 0.0, "periodic compounding frequency must be positive");
                (1.0 + rate / m).powf(-m * t)
            }
            CompoundingBasis::Simple => 1.0 / (1.0 + rate * t),
            CompoundingBasis::Continuous => (-rate * t).exp(),
            CompoundingBasis::DiscountFactor => rate,
        }
    }

    /// The continuously compounded rate equivalent to `rate` (stored under
    /// this basis) over `t` years. Returns 0 at `t == 0`.
    pub fn to_continuous_rate(self, rate: f64, t: f64) -> f64 {
        if t == 0.0 {
            return 0.0;
        }
        -self.discount_factor(rate, t).ln() / t
    }

    /// Inverse of [`discount_factor`][Self::discount_factor]: the rate
    /// under this basis that implies discount factor `df` over `t` years.
    pub fn rate_from_discount_factor(self, df: f64, t: f64) -> f64 {
        match self {
            CompoundingBasis::Periodic(m) if t > 0.0 => m * (df.powf(-1.0 / (m * t)) - 1.0),
            CompoundingBasis::Periodic(_) => 0.0,
            CompoundingBasis::Simple if t > 0.0 => (1.0 / df - 1.0) / t,
            CompoundingBasis::Simple => 0.0,
            CompoundingBasis::Continuous if t > 0.0 => -df.ln() / t,
            CompoundingBasis::Continuous => 0.0,
            CompoundingBasis::DiscountFactor => df,
        }
    }
}
